//! Replacer statistics tracking.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics tracked by a replacer.
///
/// All fields are atomic so they can be read without taking the replacer's
/// lock.
///
/// # Memory Ordering
/// We use `Ordering::Relaxed` for all operations because:
/// - We only need atomicity (no partial updates)
/// - We don't need synchronization between different counters
/// - Statistics are "eventually consistent" - exact ordering doesn't matter
///
/// # Example
/// ```
/// use pagecache_core::ReplacerStats;
/// use std::sync::atomic::Ordering;
///
/// let stats = ReplacerStats::new();
/// stats.accesses.fetch_add(1, Ordering::Relaxed);
/// assert_eq!(stats.accesses.load(Ordering::Relaxed), 1);
/// ```
#[derive(Debug)]
pub struct ReplacerStats {
    /// Number of accesses recorded.
    pub accesses: AtomicU64,

    /// Number of frames promoted from the history segment to the cache segment.
    pub promotions: AtomicU64,

    /// Number of victims returned by `evict`.
    pub evictions: AtomicU64,

    /// Number of frames dropped through `remove`.
    pub removals: AtomicU64,
}

impl ReplacerStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            accesses: AtomicU64::new(0),
            promotions: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
            removals: AtomicU64::new(0),
        }
    }

    /// Get a snapshot of current statistics.
    pub fn snapshot(&self) -> ReplacerStatsSnapshot {
        ReplacerStatsSnapshot {
            accesses: self.accesses.load(Ordering::Relaxed),
            promotions: self.promotions.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            removals: self.removals.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.accesses.store(0, Ordering::Relaxed);
        self.promotions.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
        self.removals.store(0, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for ReplacerStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of replacer statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplacerStatsSnapshot {
    pub accesses: u64,
    pub promotions: u64,
    pub evictions: u64,
    pub removals: u64,
}

impl fmt::Display for ReplacerStatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ReplacerStats {{ accesses: {}, promotions: {}, evictions: {}, removals: {} }}",
            self.accesses, self.promotions, self.evictions, self.removals
        )
    }
}
