//! Seqbank: compact on-disk storage for DNA sequences.
//!
//! Sequences over {A, C, G, T} are packed four bases per byte and written
//! into a flat backing file. Freed byte ranges are tracked by an in-memory
//! first-fit free list and reused by later inserts, so the file does not
//! grow monotonically under churn.
//!
//! The store hands out opaque [`Handle`]s on insert; a handle is the only
//! way to read or remove a record. Handles are serializable and remain
//! valid across process restarts (the free list itself is process-local
//! state and is rebuilt empty when a file is reopened).

pub mod base;
pub mod codec;
pub mod store;

// The public, stable surface most consumers use. Re-exported here so the
// common path is `seqbank::SequenceStore`, `seqbank::Sequence`, etc.
pub use base::{Base, InvalidSymbol, Sequence};
pub use store::{
    Backing, FileBacking, FreeBlock, Handle, MemBacking, SequenceStore, StoreError, StoreStats,
};
