//! Page-cache core: the eviction tracker and page table a buffer pool
//! manager is built on.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │              Buffer Pool Manager (external caller)              │
//! └─────────────────────────────────────────────────────────────────┘
//!            │ record_access / set_evictable        │ find / insert / remove
//!            ↓ evict / remove                       ↓
//! ┌──────────────────────────────┐  ┌──────────────────────────────┐
//! │  LruKReplacer (buffer/)      │  │  ExtendibleHashTable         │
//! │  history list │ cache list   │  │  (container/hash/)           │
//! │  (count < k)  │ (count >= k) │  │  directory ─▶ buckets        │
//! └──────────────────────────────┘  └──────────────────────────────┘
//! ```
//! The two components are independent; neither calls the other.
//!
//! # Modules
//! - [`common`] - Shared primitives (FrameId, Error, config)
//! - [`buffer`] - LRU-K replacer and its statistics
//! - [`container`] - Extendible hash table
//!
//! # Quick Start
//! ```
//! use pagecache_core::{ExtendibleHashTable, FrameId, LruKReplacer};
//!
//! let page_table = ExtendibleHashTable::new(4);
//! let replacer = LruKReplacer::new(16, 2);
//!
//! // Page 42 is loaded into frame 3.
//! page_table.insert(42u32, FrameId::new(3));
//! replacer.record_access(FrameId::new(3)).unwrap();
//!
//! // Unpinned: frame 3 becomes a victim candidate.
//! replacer.set_evictable(FrameId::new(3), true).unwrap();
//! assert_eq!(replacer.evict(), Some(FrameId::new(3)));
//! assert!(page_table.remove(&42));
//! ```

pub mod buffer;
pub mod common;
pub mod container;

// Re-export commonly used items at crate root for convenience
pub use common::config::{HashTableConfig, ReplacerConfig};
pub use common::{Error, FrameId, Result};

pub use buffer::{LruKReplacer, Replacer, ReplacerStats, ReplacerStatsSnapshot};
pub use container::ExtendibleHashTable;
