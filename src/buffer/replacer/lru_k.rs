//! LRU-K replacement policy.
//!
//! The replacer evicts the frame with the largest backward k-distance. A
//! frame with fewer than `k` recorded accesses has infinite distance and is
//! always preferred over frames with `k` or more; among those, the one
//! touched least recently overall goes first.
//!
//! # Segments
//! ```text
//!   history (count < k):  front ─► [oldest] ... [newest] ◄─ back
//!   cache   (count >= k): front ─► [oldest] ... [newest] ◄─ back
//! ```
//! Every access moves the frame to the back of the segment its new count
//! belongs to, so each segment stays ordered by last touch. Eviction scans
//! history front to back, then cache front to back, and takes the first
//! evictable frame.
//!
//! Within the cache segment frames are ranked by their most recent access
//! rather than by the exact timestamp of their k-th previous access. Only a
//! count and a list position are stored per frame.

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::buffer::replacer::node_list::{NodeList, Segment};
use crate::buffer::replacer::Replacer;
use crate::buffer::stats::{ReplacerStats, ReplacerStatsSnapshot};
use crate::common::config::ReplacerConfig;
use crate::common::{Error, FrameId, Result};

/// LRU-K frame replacer.
///
/// # Thread Safety
/// All state sits behind one `Mutex`; each public method holds it for its
/// full duration, so concurrent calls are serialized. Statistics are atomic
/// and live outside the lock.
///
/// # Example
/// ```
/// use pagecache_core::{FrameId, LruKReplacer};
///
/// let replacer = LruKReplacer::new(8, 2);
/// replacer.record_access(FrameId::new(1)).unwrap();
/// replacer.set_evictable(FrameId::new(1), true).unwrap();
///
/// assert_eq!(replacer.size(), 1);
/// assert_eq!(replacer.evict(), Some(FrameId::new(1)));
/// assert_eq!(replacer.evict(), None);
/// ```
pub struct LruKReplacer {
    inner: Mutex<LruKInner>,

    /// Number of addressable frames (immutable after construction).
    capacity: usize,

    /// Accesses needed to reach the cache segment.
    k: usize,

    stats: ReplacerStats,
}

struct LruKInner {
    nodes: NodeList,

    /// Number of nodes with `evictable == true`.
    evictable_count: usize,
}

impl LruKReplacer {
    /// Create a replacer for frames `0..capacity`.
    ///
    /// # Panics
    /// Panics if `capacity` or `k` is 0.
    pub fn new(capacity: usize, k: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        assert!(k > 0, "k must be > 0");

        Self {
            inner: Mutex::new(LruKInner {
                nodes: NodeList::with_capacity(capacity),
                evictable_count: 0,
            }),
            capacity,
            k,
            stats: ReplacerStats::new(),
        }
    }

    /// Create a replacer from a [`ReplacerConfig`].
    ///
    /// # Panics
    /// Panics if `config.capacity` or `config.k` is 0.
    pub fn with_config(config: ReplacerConfig) -> Self {
        Self::new(config.capacity, config.k)
    }

    // ========================================================================
    // Public API
    // ========================================================================

    /// Record an access to `frame_id`.
    ///
    /// An unseen frame gets a fresh, non-evictable record at the back of the
    /// history segment (or of the cache segment when `k == 1`). A known
    /// frame has its count bumped and moves to the back of the segment its
    /// new count belongs to.
    ///
    /// # Errors
    /// - `Error::InvalidFrameId` if `frame_id >= capacity`
    pub fn record_access(&self, frame_id: FrameId) -> Result<()> {
        let idx = frame_id.index();
        if idx >= self.capacity {
            warn!(
                frame_id = idx,
                capacity = self.capacity,
                "rejected access to out-of-range frame"
            );
            return Err(Error::InvalidFrameId {
                frame_id,
                capacity: self.capacity,
            });
        }

        let mut inner = self.inner.lock();
        ReplacerStats::incr(&self.stats.accesses);

        let Some(node) = inner.nodes.get_mut(idx) else {
            let segment = self.segment_for(1);
            inner.nodes.push_new(idx, segment);
            trace!(frame_id = idx, ?segment, "tracking new frame");
            return Ok(());
        };

        node.access_count += 1;
        let count = node.access_count;
        let was = node.segment();
        let segment = self.segment_for(count);

        if was == Segment::History && segment == Segment::Cache {
            ReplacerStats::incr(&self.stats.promotions);
            trace!(frame_id = idx, count, "promoted to cache segment");
        }
        inner.nodes.move_to_back(idx, segment);
        Ok(())
    }

    /// Mark a frame as evictable or pinned.
    ///
    /// The frame keeps its position; only its candidacy changes. Setting the
    /// flag it already has is a no-op.
    ///
    /// # Errors
    /// - `Error::FrameNotFound` if the frame is not tracked
    pub fn set_evictable(&self, frame_id: FrameId, evictable: bool) -> Result<()> {
        let mut inner = self.inner.lock();
        let node = inner
            .nodes
            .get_mut(frame_id.index())
            .ok_or(Error::FrameNotFound(frame_id))?;

        if node.evictable == evictable {
            return Ok(());
        }
        node.evictable = evictable;

        if evictable {
            inner.evictable_count += 1;
        } else {
            inner.evictable_count -= 1;
        }
        Ok(())
    }

    /// Pick and forget a victim frame.
    ///
    /// Returns the first evictable frame in the history segment, falling back
    /// to the cache segment. Returns `None` if every tracked frame is pinned.
    pub fn evict(&self) -> Option<FrameId> {
        let mut inner = self.inner.lock();
        if inner.evictable_count == 0 {
            return None;
        }

        let victim = [Segment::History, Segment::Cache]
            .into_iter()
            .find_map(|segment| {
                inner
                    .nodes
                    .iter(segment)
                    .find(|&idx| inner.nodes.get(idx).is_some_and(|n| n.evictable))
            })?;

        inner.nodes.remove(victim);
        inner.evictable_count -= 1;
        ReplacerStats::incr(&self.stats.evictions);
        debug!(frame_id = victim, "evicted frame");

        Some(FrameId::new(victim))
    }

    /// Drop an evictable frame and its access history.
    ///
    /// Unlike [`evict`](Self::evict) this removes the named frame regardless
    /// of its rank. Removing an untracked frame does nothing.
    ///
    /// # Errors
    /// - `Error::NotEvictable` if the frame is tracked but pinned
    pub fn remove(&self, frame_id: FrameId) -> Result<()> {
        let mut inner = self.inner.lock();
        let idx = frame_id.index();

        match inner.nodes.get(idx) {
            None => return Ok(()),
            Some(node) if !node.evictable => return Err(Error::NotEvictable(frame_id)),
            Some(_) => {}
        }

        inner.nodes.remove(idx);
        inner.evictable_count -= 1;
        ReplacerStats::incr(&self.stats.removals);
        debug!(frame_id = idx, "removed frame");
        Ok(())
    }

    /// Number of evictable frames.
    pub fn size(&self) -> usize {
        self.inner.lock().evictable_count
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Number of addressable frames.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The `k` in LRU-K.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of frames with a record, evictable or not.
    pub fn tracked_count(&self) -> usize {
        self.inner.lock().nodes.len()
    }

    /// Recorded access count for a frame, if tracked.
    pub fn access_count(&self, frame_id: FrameId) -> Option<usize> {
        self.inner
            .lock()
            .nodes
            .get(frame_id.index())
            .map(|node| node.access_count)
    }

    /// Snapshot of the replacer's counters.
    pub fn stats(&self) -> ReplacerStatsSnapshot {
        self.stats.snapshot()
    }

    /// Check internal consistency. Panics on violation.
    pub fn debug_validate_invariants(&self) {
        let inner = self.inner.lock();
        inner.nodes.debug_validate_invariants();

        let mut evictable = 0;
        for segment in [Segment::History, Segment::Cache] {
            for idx in inner.nodes.iter(segment) {
                if let Some(node) = inner.nodes.get(idx) {
                    assert_eq!(self.segment_for(node.access_count), segment);
                    if node.evictable {
                        evictable += 1;
                    }
                }
            }
        }
        assert_eq!(inner.evictable_count, evictable);
    }

    #[inline]
    fn segment_for(&self, count: usize) -> Segment {
        if count < self.k {
            Segment::History
        } else {
            Segment::Cache
        }
    }

    #[cfg(test)]
    fn segment_order(&self, segment: Segment) -> Vec<usize> {
        self.inner.lock().nodes.iter(segment).collect()
    }
}

impl Replacer for LruKReplacer {
    fn record_access(&self, frame_id: FrameId) -> Result<()> {
        LruKReplacer::record_access(self, frame_id)
    }

    fn set_evictable(&self, frame_id: FrameId, evictable: bool) -> Result<()> {
        LruKReplacer::set_evictable(self, frame_id, evictable)
    }

    fn evict(&self) -> Option<FrameId> {
        LruKReplacer::evict(self)
    }

    fn remove(&self, frame_id: FrameId) -> Result<()> {
        LruKReplacer::remove(self, frame_id)
    }

    fn size(&self) -> usize {
        LruKReplacer::size(self)
    }
}

impl std::fmt::Debug for LruKReplacer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("LruKReplacer")
            .field("capacity", &self.capacity)
            .field("k", &self.k)
            .field("history", &inner.nodes.segment_len(Segment::History))
            .field("cache", &inner.nodes.segment_len(Segment::Cache))
            .field("evictable", &inner.evictable_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fid(id: usize) -> FrameId {
        FrameId::new(id)
    }

    #[test]
    fn test_new_frame_starts_in_history_pinned() {
        let replacer = LruKReplacer::new(4, 2);
        replacer.record_access(fid(0)).unwrap();

        assert_eq!(replacer.size(), 0);
        assert_eq!(replacer.tracked_count(), 1);
        assert_eq!(replacer.access_count(fid(0)), Some(1));
        assert_eq!(replacer.segment_order(Segment::History), vec![0]);
        assert_eq!(replacer.evict(), None);
    }

    #[test]
    fn test_k_equal_one_goes_straight_to_cache() {
        let replacer = LruKReplacer::new(4, 1);
        replacer.record_access(fid(2)).unwrap();

        assert_eq!(replacer.segment_order(Segment::History), Vec::<usize>::new());
        assert_eq!(replacer.segment_order(Segment::Cache), vec![2]);
        replacer.debug_validate_invariants();
    }

    #[test]
    fn test_promotion_at_k() {
        let replacer = LruKReplacer::new(4, 3);
        replacer.record_access(fid(1)).unwrap();
        replacer.record_access(fid(1)).unwrap();
        assert_eq!(replacer.segment_order(Segment::History), vec![1]);

        replacer.record_access(fid(1)).unwrap();
        assert_eq!(replacer.segment_order(Segment::Cache), vec![1]);
        assert_eq!(replacer.stats().promotions, 1);

        // Further accesses never bring it back.
        replacer.record_access(fid(1)).unwrap();
        assert_eq!(replacer.segment_order(Segment::Cache), vec![1]);
        assert_eq!(replacer.stats().promotions, 1);
    }

    #[test]
    fn test_reaccess_moves_to_back_of_history() {
        let replacer = LruKReplacer::new(8, 3);
        for i in 0..3 {
            replacer.record_access(fid(i)).unwrap();
        }
        replacer.record_access(fid(0)).unwrap();

        assert_eq!(replacer.segment_order(Segment::History), vec![1, 2, 0]);
    }

    #[test]
    fn test_invalid_frame_id_leaves_state_untouched() {
        let replacer = LruKReplacer::new(4, 2);
        let err = replacer.record_access(fid(4)).unwrap_err();

        assert_eq!(
            err,
            Error::InvalidFrameId {
                frame_id: fid(4),
                capacity: 4
            }
        );
        assert_eq!(replacer.tracked_count(), 0);
        assert_eq!(replacer.stats().accesses, 0);
    }

    #[test]
    fn test_set_evictable_unknown_frame() {
        let replacer = LruKReplacer::new(4, 2);
        assert_eq!(
            replacer.set_evictable(fid(1), true),
            Err(Error::FrameNotFound(fid(1)))
        );
        assert_eq!(replacer.size(), 0);
    }

    #[test]
    fn test_set_evictable_is_idempotent() {
        let replacer = LruKReplacer::new(4, 2);
        replacer.record_access(fid(0)).unwrap();

        replacer.set_evictable(fid(0), true).unwrap();
        replacer.set_evictable(fid(0), true).unwrap();
        assert_eq!(replacer.size(), 1);

        replacer.set_evictable(fid(0), false).unwrap();
        replacer.set_evictable(fid(0), false).unwrap();
        assert_eq!(replacer.size(), 0);
    }

    #[test]
    fn test_set_evictable_keeps_position() {
        let replacer = LruKReplacer::new(4, 2);
        replacer.record_access(fid(0)).unwrap();
        replacer.record_access(fid(1)).unwrap();

        replacer.set_evictable(fid(1), true).unwrap();
        replacer.set_evictable(fid(0), true).unwrap();

        assert_eq!(replacer.evict(), Some(fid(0)));
    }

    #[test]
    fn test_evict_prefers_history() {
        let replacer = LruKReplacer::new(4, 2);
        replacer.record_access(fid(0)).unwrap();
        replacer.record_access(fid(0)).unwrap();
        replacer.record_access(fid(1)).unwrap();

        replacer.set_evictable(fid(0), true).unwrap();
        replacer.set_evictable(fid(1), true).unwrap();

        // Frame 0 is older, but frame 1 has infinite k-distance.
        assert_eq!(replacer.evict(), Some(fid(1)));
        assert_eq!(replacer.evict(), Some(fid(0)));
    }

    #[test]
    fn test_evict_skips_pinned() {
        let replacer = LruKReplacer::new(4, 2);
        for i in 0..3 {
            replacer.record_access(fid(i)).unwrap();
        }
        replacer.set_evictable(fid(2), true).unwrap();

        assert_eq!(replacer.evict(), Some(fid(2)));
        assert_eq!(replacer.evict(), None);
        assert_eq!(replacer.tracked_count(), 2);
    }

    #[test]
    fn test_evict_forgets_history() {
        let replacer = LruKReplacer::new(4, 2);
        replacer.record_access(fid(0)).unwrap();
        replacer.record_access(fid(0)).unwrap();
        replacer.set_evictable(fid(0), true).unwrap();
        assert_eq!(replacer.evict(), Some(fid(0)));

        replacer.record_access(fid(0)).unwrap();
        assert_eq!(replacer.access_count(fid(0)), Some(1));
        assert_eq!(replacer.segment_order(Segment::History), vec![0]);
    }

    #[test]
    fn test_remove_semantics() {
        let replacer = LruKReplacer::new(4, 2);
        replacer.record_access(fid(0)).unwrap();

        assert_eq!(replacer.remove(fid(0)), Err(Error::NotEvictable(fid(0))));
        assert_eq!(replacer.tracked_count(), 1);

        replacer.set_evictable(fid(0), true).unwrap();
        replacer.remove(fid(0)).unwrap();
        assert_eq!(replacer.size(), 0);
        assert_eq!(replacer.tracked_count(), 0);

        // Unknown frame: silent no-op.
        replacer.remove(fid(0)).unwrap();
        replacer.remove(fid(3)).unwrap();
        assert_eq!(replacer.stats().removals, 1);
    }

    #[test]
    fn test_trait_object() {
        let replacer: Box<dyn Replacer> = Box::new(LruKReplacer::new(2, 2));
        replacer.record_access(fid(1)).unwrap();
        replacer.set_evictable(fid(1), true).unwrap();
        assert_eq!(replacer.size(), 1);
        assert_eq!(replacer.evict(), Some(fid(1)));
    }

    #[test]
    fn test_with_config() {
        let replacer = LruKReplacer::with_config(ReplacerConfig::new(7).with_k(4));
        assert_eq!(replacer.capacity(), 7);
        assert_eq!(replacer.k(), 4);
    }

    #[test]
    #[should_panic(expected = "k must be > 0")]
    fn test_zero_k_panics() {
        let _ = LruKReplacer::new(4, 0);
    }
}
