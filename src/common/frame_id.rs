//! Frame identifier type.

use std::fmt;

/// Identifies a frame tracked by a replacer.
///
/// Frame ids are assigned by the buffer pool and are dense: a replacer
/// built for `capacity` frames accepts ids in `0..capacity` and uses the id
/// directly as an index into its node table.
///
/// # Example
/// ```
/// use pagecache_core::FrameId;
///
/// let frame_id = FrameId::new(5);
/// assert_eq!(frame_id.0, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub usize);

impl FrameId {
    /// Create a new FrameId.
    #[inline]
    pub fn new(id: usize) -> Self {
        FrameId(id)
    }

    /// The id as a table index.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for FrameId {
    fn from(id: usize) -> Self {
        FrameId(id)
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({})", self.0)
    }
}
