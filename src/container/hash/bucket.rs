//! Fixed-capacity bucket of key/value pairs.

use std::mem;

/// A bucket holds at most `capacity` entries in insertion order, plus the
/// number of low hash bits (`depth`) shared by every key routed to it.
#[derive(Debug)]
pub(crate) struct Bucket<K, V> {
    items: Vec<(K, V)>,
    capacity: usize,
    depth: usize,
}

impl<K: Eq, V> Bucket<K, V> {
    pub(crate) fn new(capacity: usize, depth: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            depth,
        }
    }

    #[inline]
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub(crate) fn increment_depth(&mut self) {
        self.depth += 1;
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub(crate) fn find(&self, key: &K) -> Option<&V> {
        self.items.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub(crate) fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        self.items
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Remove `key`; returns whether it was present.
    pub(crate) fn remove(&mut self, key: &K) -> bool {
        match self.items.iter().position(|(k, _)| k == key) {
            Some(pos) => {
                self.items.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Append a new entry. Caller checks for an existing key and spare room.
    pub(crate) fn push(&mut self, key: K, value: V) {
        self.items.push((key, value));
    }

    /// Move out every entry whose key matches `pred`, keeping relative order
    /// on both sides.
    pub(crate) fn drain_where(&mut self, mut pred: impl FnMut(&K) -> bool) -> Vec<(K, V)> {
        let (moved, kept): (Vec<_>, Vec<_>) =
            mem::take(&mut self.items).into_iter().partition(|(k, _)| pred(k));
        self.items = kept;
        moved
    }

    /// Build a bucket from entries moved out of a split sibling.
    pub(crate) fn from_items(items: Vec<(K, V)>, capacity: usize, depth: usize) -> Self {
        Self {
            items,
            capacity,
            depth,
        }
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &K> {
        self.items.iter().map(|(k, _)| k)
    }
}
