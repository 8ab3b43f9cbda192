//! Extendible hash table.
//!
//! # Layout
//! ```text
//!   global_depth = 2
//!
//!   directory            buckets
//!   ┌────┬────┐          ┌──────────────────────┐
//!   │ 00 │ ───┼────┬────▶│ B0 (local_depth = 1) │
//!   │ 01 │ ───┼──┐ │     └──────────────────────┘
//!   │ 10 │ ───┼──┼─┘     ┌──────────────────────┐
//!   │ 11 │ ───┼──┼──────▶│ B2 (local_depth = 2) │
//!   └────┴────┘  │       └──────────────────────┘
//!                │       ┌──────────────────────┐
//!                └──────▶│ B1 (local_depth = 2) │
//!                        └──────────────────────┘
//! ```
//! A key is routed by the low `global_depth` bits of its hash. A bucket with
//! `local_depth < global_depth` is shared by `2^(global_depth - local_depth)`
//! slots. When an insert hits a full bucket, the directory doubles (if the
//! bucket is not shared) and the bucket splits on its next hash bit; the
//! insert then retries until it fits.
//!
//! Buckets live in an arena (`Vec<Bucket>`) and directory slots store arena
//! indices, so a split only rewrites indices in the affected slots.

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::common::config::HashTableConfig;
use crate::container::hash::bucket::Bucket;

/// Thread-safe extendible hash table.
///
/// # Thread Safety
/// One `Mutex` guards the directory and every bucket. Each public method
/// holds it for its whole duration, so a caller never sees a half-finished
/// split or doubling.
///
/// # Example
/// ```
/// use pagecache_core::ExtendibleHashTable;
///
/// let table = ExtendibleHashTable::new(2);
/// table.insert(1, "a");
/// table.insert(2, "b");
/// table.insert(3, "c");
///
/// assert_eq!(table.find(&2), Some("b"));
/// assert!(table.remove(&2));
/// assert_eq!(table.find(&2), None);
/// ```
pub struct ExtendibleHashTable<K, V, S = RandomState> {
    inner: Mutex<Directory<K, V>>,

    /// Maximum entries per bucket (immutable after construction).
    bucket_size: usize,

    hash_builder: S,
}

struct Directory<K, V> {
    global_depth: usize,

    /// Slot -> index into `buckets`. Always `2^global_depth` long.
    slots: Vec<usize>,

    /// Bucket arena. Buckets are never freed, so its length is the number
    /// of distinct buckets.
    buckets: Vec<Bucket<K, V>>,

    /// Total stored entries.
    len: usize,
}

impl<K, V> Directory<K, V> {
    #[inline]
    fn index_for(&self, hash: u64) -> usize {
        let mask = (1usize << self.global_depth) - 1;
        (hash as usize) & mask
    }

    /// Double the directory; slot `i + old_len` mirrors slot `i`.
    fn grow(&mut self) {
        self.global_depth += 1;
        self.slots.extend_from_within(..);
        debug!(
            global_depth = self.global_depth,
            slots = self.slots.len(),
            "doubled hash directory"
        );
    }
}

impl<K: Eq, V> Directory<K, V> {
    /// Split `bucket` on its next hash bit and repoint the slots that now
    /// belong to the new sibling.
    fn split(&mut self, bucket: usize, bucket_size: usize, hash_of: impl Fn(&K) -> u64) {
        self.buckets[bucket].increment_depth();
        let depth = self.buckets[bucket].depth();
        let bit = 1usize << (depth - 1);

        let mask = (1usize << self.global_depth) - 1;
        let moved = self.buckets[bucket].drain_where(|k| ((hash_of(k) as usize) & mask) & bit != 0);
        let sibling = self.buckets.len();
        self.buckets.push(Bucket::from_items(moved, bucket_size, depth));

        for (i, slot) in self.slots.iter_mut().enumerate() {
            if *slot == bucket && i & bit != 0 {
                *slot = sibling;
            }
        }

        debug!(
            bucket,
            sibling,
            local_depth = depth,
            num_buckets = self.buckets.len(),
            "split hash bucket"
        );
    }
}

impl<K, V> ExtendibleHashTable<K, V, RandomState>
where
    K: Hash + Eq,
{
    /// Create an empty table whose buckets hold `bucket_size` entries.
    ///
    /// # Panics
    /// Panics if `bucket_size` is 0.
    pub fn new(bucket_size: usize) -> Self {
        Self::with_hasher(bucket_size, RandomState::new())
    }

    /// Create an empty table from a [`HashTableConfig`].
    ///
    /// # Panics
    /// Panics if `config.bucket_size` is 0.
    pub fn with_config(config: HashTableConfig) -> Self {
        Self::new(config.bucket_size)
    }
}

impl<K, V> Default for ExtendibleHashTable<K, V, RandomState>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::with_config(HashTableConfig::default())
    }
}

impl<K, V, S> ExtendibleHashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Create an empty table that hashes keys with `hash_builder`.
    ///
    /// # Panics
    /// Panics if `bucket_size` is 0.
    pub fn with_hasher(bucket_size: usize, hash_builder: S) -> Self {
        assert!(bucket_size > 0, "bucket_size must be > 0");

        Self {
            inner: Mutex::new(Directory {
                global_depth: 0,
                slots: vec![0],
                buckets: vec![Bucket::new(bucket_size, 0)],
                len: 0,
            }),
            bucket_size,
            hash_builder,
        }
    }

    // ========================================================================
    // Public API
    // ========================================================================

    /// Directory slot `key` currently routes to.
    pub fn index_of(&self, key: &K) -> usize {
        let hash = self.hash(key);
        self.inner.lock().index_for(hash)
    }

    /// Look up the value stored for `key`.
    pub fn find(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let hash = self.hash(key);
        let dir = self.inner.lock();
        let bucket = dir.slots[dir.index_for(hash)];
        dir.buckets[bucket].find(key).cloned()
    }

    /// Remove `key`; returns whether an entry was removed.
    pub fn remove(&self, key: &K) -> bool {
        let hash = self.hash(key);
        let mut dir = self.inner.lock();
        let bucket = dir.slots[dir.index_for(hash)];
        let removed = dir.buckets[bucket].remove(key);
        if removed {
            dir.len -= 1;
        }
        removed
    }

    /// Insert or overwrite the value for `key`.
    ///
    /// A full bucket is split (doubling the directory first when the bucket
    /// is not shared) until the key's bucket has room.
    pub fn insert(&self, key: K, value: V) {
        let hash = self.hash(&key);
        let mut dir = self.inner.lock();

        loop {
            let bucket = dir.slots[dir.index_for(hash)];

            if let Some(slot) = dir.buckets[bucket].find_mut(&key) {
                *slot = value;
                return;
            }

            if !dir.buckets[bucket].is_full() {
                dir.buckets[bucket].push(key, value);
                dir.len += 1;
                return;
            }

            // No amount of splitting separates keys with identical hashes.
            if dir.buckets[bucket].keys().all(|k| self.hash(k) == hash) {
                warn!(bucket, "bucket overflow: all keys share one hash");
                dir.buckets[bucket].push(key, value);
                dir.len += 1;
                return;
            }

            if dir.buckets[bucket].depth() == dir.global_depth {
                dir.grow();
            }
            dir.split(bucket, self.bucket_size, |k| self.hash(k));
        }
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Number of hash bits used to index the directory.
    pub fn global_depth(&self) -> usize {
        self.inner.lock().global_depth
    }

    /// Local depth of the bucket behind directory slot `dir_index`.
    ///
    /// Returns `None` if `dir_index >= 2^global_depth`.
    pub fn local_depth(&self, dir_index: usize) -> Option<usize> {
        let dir = self.inner.lock();
        dir.slots
            .get(dir_index)
            .map(|&bucket| dir.buckets[bucket].depth())
    }

    /// Number of distinct buckets.
    pub fn num_buckets(&self) -> usize {
        self.inner.lock().buckets.len()
    }

    /// Number of directory slots (`2^global_depth`).
    pub fn dir_size(&self) -> usize {
        self.inner.lock().slots.len()
    }

    /// Maximum entries per bucket.
    pub fn bucket_size(&self) -> usize {
        self.bucket_size
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check directory/bucket consistency. Panics on violation.
    pub fn debug_validate_invariants(&self) {
        let dir = self.inner.lock();
        assert_eq!(dir.slots.len(), 1usize << dir.global_depth);

        for (i, &bucket) in dir.slots.iter().enumerate() {
            let local = dir.buckets[bucket].depth();
            assert!(local <= dir.global_depth, "slot {} deeper than directory", i);

            // Every slot sharing the low `local` bits points at this bucket.
            let base = i & ((1usize << local) - 1);
            assert_eq!(dir.slots[base], bucket, "slot {} not aliased to {}", i, base);

            for key in dir.buckets[bucket].keys() {
                assert_eq!(dir.index_for(self.hash(key)) & ((1usize << local) - 1), base);
            }
        }

        let mut referenced = dir.slots.clone();
        referenced.sort_unstable();
        referenced.dedup();
        assert_eq!(referenced.len(), dir.buckets.len());

        let stored: usize = dir.buckets.iter().map(Bucket::len).sum();
        assert_eq!(stored, dir.len);
    }

    #[inline]
    fn hash(&self, key: &K) -> u64 {
        self.hash_builder.hash_one(key)
    }
}

impl<K, V, S> std::fmt::Debug for ExtendibleHashTable<K, V, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dir = self.inner.lock();
        f.debug_struct("ExtendibleHashTable")
            .field("global_depth", &dir.global_depth)
            .field("num_buckets", &dir.buckets.len())
            .field("len", &dir.len)
            .field("bucket_size", &self.bucket_size)
            .finish()
    }
}
