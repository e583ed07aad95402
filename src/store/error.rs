use thiserror::Error;

use crate::base::InvalidSymbol;
use crate::codec::TruncatedRecord;

/// Error type for store operations.
///
/// Every failure is returned to the caller; nothing is swallowed or
/// downgraded to a sentinel value. An operation that fails performs no
/// partial write and commits no free-list change.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A character outside {A, C, G, T} reached `insert`.
    #[error(transparent)]
    InvalidSymbol(#[from] InvalidSymbol),

    /// The backing resource failed to read, write, or resize.
    #[error("backing store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A handle claimed more bases than its byte range can hold.
    #[error(transparent)]
    TruncatedRecord(#[from] TruncatedRecord),
}
