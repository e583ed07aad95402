use std::fmt;
use std::path::Path;

use tracing::{debug, trace};

use super::backing::{Backing, FileBacking, MemBacking};
use super::error::StoreError;
use super::free_list::{FreeBlock, FreeList};
use super::handle::Handle;
use crate::base::Sequence;
use crate::codec;

/// A sequence store over some backing resource.
///
/// The store serializes one caller's insert/get/remove operations against
/// a flat file of packed records; record boundaries exist only in the
/// [`Handle`]s it returns. It assumes a single logical owner: calls never
/// overlap in time, and the free list plus the backing resource form one
/// unit of state (to share a store across threads, wrap the whole store in
/// a mutex, never its parts separately).
///
/// Free-list accounting commits only after the corresponding write or
/// truncate has succeeded, so a failed operation changes nothing.
#[derive(Debug)]
pub struct SequenceStore<B: Backing> {
    backing: B,
    free: FreeList,
}

impl SequenceStore<FileBacking> {
    /// Open a store over the file at `path`, creating it if missing.
    ///
    /// An existing file's length becomes the extent and all of it is
    /// presumed occupied: the free list is process-local and is not
    /// recovered. Handles issued by a previous process remain readable.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::new(FileBacking::open(path)?)
    }
}

impl SequenceStore<MemBacking> {
    /// A store over a fresh in-memory buffer.
    pub fn in_memory() -> Self {
        Self {
            backing: MemBacking::new(),
            free: FreeList::with_extent(0),
        }
    }
}

impl<B: Backing> SequenceStore<B> {
    /// Wrap a backing resource, adopting its current length as the extent.
    pub fn new(backing: B) -> Result<Self, StoreError> {
        let extent = backing.len()?;
        Ok(Self {
            backing,
            free: FreeList::with_extent(extent),
        })
    }

    /// Pack `sequence` and write it into the store, reusing freed space
    /// when a first-fit range exists.
    ///
    /// Fails with [`StoreError::InvalidSymbol`] before any byte is
    /// written if the input leaves {A, C, G, T} (case-insensitive).
    pub fn insert(&mut self, sequence: &str) -> Result<Handle, StoreError> {
        let sequence: Sequence = sequence.parse()?;
        self.insert_sequence(&sequence)
    }

    /// [`insert`](Self::insert) for an already-parsed sequence.
    pub fn insert_sequence(&mut self, sequence: &Sequence) -> Result<Handle, StoreError> {
        let packed = codec::pack(sequence.bases());
        if packed.is_empty() {
            // The empty sequence occupies no bytes anywhere.
            return Ok(Handle::empty());
        }

        let placement = self.free.plan_alloc(packed.len() as u64);
        let offset = placement.offset();
        self.backing.write_at(offset, &packed)?;
        self.free.commit_alloc(placement);

        let handle = Handle::new(offset, packed.len() as u64, sequence.len() as u64);
        debug!(%handle, "inserted sequence");
        Ok(handle)
    }

    /// Read back the sequence a handle refers to.
    ///
    /// No liveness check is performed: a handle presented after
    /// [`remove`](Self::remove) decodes whatever bytes occupy the range by
    /// then. Keeping handles valid is the caller's responsibility.
    pub fn get(&mut self, handle: Handle) -> Result<Sequence, StoreError> {
        if handle.byte_len() == 0 {
            return Ok(Sequence::new());
        }

        let mut packed = vec![0u8; handle.byte_len() as usize];
        self.backing.read_at(handle.offset(), &mut packed)?;
        let sequence = codec::unpack(&packed, handle.base_count() as usize)?;
        trace!(%handle, "read sequence");
        Ok(sequence)
    }

    /// Return a record's byte range to the free list. The handle is
    /// dangling afterwards.
    ///
    /// Bytes are not zeroed; they remain until a later insert overwrites
    /// them. A freed range that ends the file shrinks the file instead of
    /// surviving as a trailing free block.
    pub fn remove(&mut self, handle: Handle) -> Result<(), StoreError> {
        if handle.byte_len() == 0 {
            return Ok(());
        }

        let release = self.free.plan_release(handle.offset(), handle.byte_len());
        if let Some(extent) = release.new_extent() {
            // Trailing range: shrink the file first, commit after.
            self.backing.set_len(extent)?;
        }
        self.free.commit_release(release);

        debug!(%handle, "removed sequence");
        Ok(())
    }

    /// Current logical end-of-store offset.
    pub fn extent(&self) -> u64 {
        self.free.extent()
    }

    /// Snapshot of the store's space accounting.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            extent: self.free.extent(),
            free_bytes: self.free.free_bytes(),
            free_blocks: self.free.blocks().to_vec(),
        }
    }

    /// The underlying backing resource, for inspection.
    pub fn backing(&self) -> &B {
        &self.backing
    }

    /// Consume the store, yielding the backing resource.
    pub fn into_backing(self) -> B {
        self.backing
    }
}

/// Snapshot of a store's space accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    /// Logical end-of-store offset.
    pub extent: u64,
    /// Total reusable bytes across all free blocks.
    pub free_bytes: u64,
    /// Free blocks in offset order.
    pub free_blocks: Vec<FreeBlock>,
}

impl fmt::Display for StoreStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "extent {} byte(s), {} free in {} block(s)",
            self.extent,
            self.free_bytes,
            self.free_blocks.len()
        )?;
        for block in &self.free_blocks {
            write!(f, " {block}")?;
        }
        Ok(())
    }
}
