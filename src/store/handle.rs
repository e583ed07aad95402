use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque reference to one packed record in a store.
///
/// A handle is a capability, not a lookup key: the store keeps no record
/// of which handles are live. Presenting a handle after [`remove`] reads
/// whatever bytes occupy the range by then — callers own that precondition
/// (see the crate docs).
///
/// Handles serialize, so they can be held outside the process and
/// presented again after the store file is reopened.
///
/// `base_count` is carried alongside the byte range because packed bytes
/// alone cannot distinguish real trailing A's from padding.
///
/// [`remove`]: crate::store::SequenceStore::remove
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Handle {
    offset: u64,
    byte_len: u64,
    base_count: u64,
}

impl Handle {
    pub(crate) fn new(offset: u64, byte_len: u64, base_count: u64) -> Self {
        Self {
            offset,
            byte_len,
            base_count,
        }
    }

    /// The handle of the empty sequence. Occupies no bytes anywhere.
    pub(crate) fn empty() -> Self {
        Self::new(0, 0, 0)
    }

    /// Byte offset of the record in the backing store.
    #[inline(always)]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Length of the packed record in bytes.
    #[inline(always)]
    pub fn byte_len(&self) -> u64 {
        self.byte_len
    }

    /// Number of bases the record decodes to.
    #[inline(always)]
    pub fn base_count(&self) -> u64 {
        self.base_count
    }

    /// One past the last byte of the record.
    #[inline(always)]
    pub fn end(&self) -> u64 {
        self.offset + self.byte_len
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}) ({} bases)",
            self.offset,
            self.end(),
            self.base_count
        )
    }
}
