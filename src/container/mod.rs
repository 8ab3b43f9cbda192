//! In-memory containers used by the buffer pool.

pub mod hash;

pub use hash::ExtendibleHashTable;
