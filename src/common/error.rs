//! Error types for the replacer and hash table.

use thiserror::Error;

use crate::common::FrameId;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the frame replacer.
///
/// Not finding a victim and removing something that isn't there are normal
/// outcomes (`Option` / `bool`), not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Frame id lies outside `0..capacity`.
    ///
    /// This indicates a bug in the caller.
    #[error("Invalid frame ID: {frame_id} (capacity {capacity})")]
    InvalidFrameId { frame_id: FrameId, capacity: usize },

    /// The replacer has no record of this frame.
    #[error("{0} not found in replacer")]
    FrameNotFound(FrameId),

    /// Attempted to remove a frame that is still pinned.
    ///
    /// The caller must mark it evictable first.
    #[error("{0} is not evictable")]
    NotEvictable(FrameId),
}
