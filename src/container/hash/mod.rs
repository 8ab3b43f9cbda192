//! Hash-based containers.
//!
//! - [`ExtendibleHashTable`] - dynamically growing hash table used as the
//!   buffer pool's page table

mod bucket;
mod extendible_hash_table;

pub use extendible_hash_table::ExtendibleHashTable;
