//! Configuration constants and settings.

/// Default `k` for the LRU-K replacer.
///
/// A frame needs this many recorded accesses before it leaves the history
/// segment and is ranked by recency in the cache segment.
pub const LRUK_REPLACER_K: usize = 10;

/// Default number of entries a hash table bucket holds before it splits.
pub const DEFAULT_BUCKET_SIZE: usize = 4;

/// Settings for an [`LruKReplacer`](crate::buffer::replacer::LruKReplacer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplacerConfig {
    /// Number of addressable frames. Valid frame ids are `0..capacity`.
    pub capacity: usize,

    /// Accesses needed to promote a frame into the cache segment.
    pub k: usize,
}

impl ReplacerConfig {
    /// Create a config for `capacity` frames using the default `k`.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            k: LRUK_REPLACER_K,
        }
    }

    /// Override `k`.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }
}

/// Settings for an [`ExtendibleHashTable`](crate::container::hash::ExtendibleHashTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashTableConfig {
    /// Maximum entries per bucket.
    pub bucket_size: usize,
}

impl Default for HashTableConfig {
    fn default() -> Self {
        Self {
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replacer_config_defaults_k() {
        let config = ReplacerConfig::new(16);
        assert_eq!(config.capacity, 16);
        assert_eq!(config.k, LRUK_REPLACER_K);
    }

    #[test]
    fn test_replacer_config_with_k() {
        let config = ReplacerConfig::new(8).with_k(2);
        assert_eq!(config.k, 2);
        assert_eq!(config.capacity, 8);
    }

    #[test]
    fn test_hash_table_config_default() {
        assert_eq!(HashTableConfig::default().bucket_size, DEFAULT_BUCKET_SIZE);
    }
}
