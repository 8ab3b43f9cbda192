//! Buffer pool eviction support.
//!
//! A buffer pool manager keeps a fixed set of frames and, when it needs a
//! free one, asks a replacer which unpinned frame to give up.
//!
//! # Components
//! - [`replacer`] - Eviction policy implementations
//! - [`ReplacerStats`] - Replacer counters

pub mod replacer;
mod stats;

pub use replacer::{LruKReplacer, Replacer};
pub use stats::{ReplacerStats, ReplacerStatsSnapshot};
