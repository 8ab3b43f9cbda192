//! Eviction policy implementations (replacers).
//!
//! A buffer pool manager talks to its eviction policy through the
//! [`Replacer`] trait:
//! - [`LruKReplacer`] - LRU-K (backward k-distance)

mod lru_k;
mod node_list;

pub use lru_k::LruKReplacer;

use crate::common::{FrameId, Result};

/// Trait for frame replacement policies.
///
/// Implementations synchronize internally, so every method takes `&self`
/// and a replacer can be shared across threads behind an `Arc`.
pub trait Replacer: Send + Sync {
    /// Records that the given frame was accessed.
    fn record_access(&self, frame_id: FrameId) -> Result<()>;

    /// Marks a frame as evictable (unpinned) or not.
    fn set_evictable(&self, frame_id: FrameId, evictable: bool) -> Result<()>;

    /// Selects and forgets a victim frame.
    ///
    /// Returns `None` if no frames are evictable.
    fn evict(&self) -> Option<FrameId>;

    /// Removes an evictable frame from the replacer.
    fn remove(&self, frame_id: FrameId) -> Result<()>;

    /// Returns the number of evictable frames.
    fn size(&self) -> usize;
}
