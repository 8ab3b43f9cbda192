//! Index-linked frame lists for the LRU-K replacer.
//!
//! Nodes live in a dense table indexed by frame id. Each node is linked into
//! exactly one of two segments through `prev`/`next` indices, so moving a
//! frame to the tail of a segment is an O(1) unlink + relink with no
//! reference cycles.
//!
//! ```text
//!   nodes: Vec<Option<FrameNode>>   (index = frame id)
//!
//!   history: head ─► [2] ◄──► [3] ◄── tail      (count < k)
//!   cache:   head ─► [1] ◄── tail               (count >= k)
//! ```

/// Which ordered segment a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment {
    /// Frames with fewer than `k` accesses (infinite backward k-distance).
    History,
    /// Frames with at least `k` accesses.
    Cache,
}

/// Per-frame bookkeeping.
#[derive(Debug, Clone)]
pub(crate) struct FrameNode {
    pub(crate) access_count: usize,
    pub(crate) evictable: bool,
    segment: Segment,
    prev: Option<usize>,
    next: Option<usize>,
}

impl FrameNode {
    #[inline]
    pub(crate) fn segment(&self) -> Segment {
        self.segment
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Ends {
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

/// Dense node table plus the two segment lists threaded through it.
#[derive(Debug)]
pub(crate) struct NodeList {
    nodes: Vec<Option<FrameNode>>,
    history: Ends,
    cache: Ends,
}

impl NodeList {
    /// Create a table able to hold frames `0..capacity`.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: vec![None; capacity],
            history: Ends::default(),
            cache: Ends::default(),
        }
    }

    /// Number of frames currently linked.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.history.len + self.cache.len
    }

    /// Number of frames in one segment.
    #[inline]
    pub(crate) fn segment_len(&self, segment: Segment) -> usize {
        self.ends(segment).len
    }

    #[inline]
    pub(crate) fn get(&self, idx: usize) -> Option<&FrameNode> {
        self.nodes.get(idx).and_then(Option::as_ref)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, idx: usize) -> Option<&mut FrameNode> {
        self.nodes.get_mut(idx).and_then(Option::as_mut)
    }

    /// Insert a fresh node for `idx` at the tail of `segment`.
    ///
    /// `idx` must be in range and not already present.
    pub(crate) fn push_new(&mut self, idx: usize, segment: Segment) {
        debug_assert!(self.get(idx).is_none(), "frame {} already linked", idx);
        self.nodes[idx] = Some(FrameNode {
            access_count: 1,
            evictable: false,
            segment,
            prev: None,
            next: None,
        });
        self.link_back(idx, segment);
    }

    /// Move an existing node to the tail of `segment`.
    pub(crate) fn move_to_back(&mut self, idx: usize, segment: Segment) {
        self.unlink(idx);
        self.link_back(idx, segment);
    }

    /// Unlink and drop the node for `idx`, returning it.
    pub(crate) fn remove(&mut self, idx: usize) -> Option<FrameNode> {
        self.get(idx)?;
        self.unlink(idx);
        self.nodes[idx].take()
    }

    /// Iterate frame indices of `segment` from front (oldest) to back.
    pub(crate) fn iter(&self, segment: Segment) -> SegmentIter<'_> {
        SegmentIter {
            list: self,
            current: self.ends(segment).head,
        }
    }

    #[inline]
    fn ends(&self, segment: Segment) -> &Ends {
        match segment {
            Segment::History => &self.history,
            Segment::Cache => &self.cache,
        }
    }

    #[inline]
    fn ends_mut(&mut self, segment: Segment) -> &mut Ends {
        match segment {
            Segment::History => &mut self.history,
            Segment::Cache => &mut self.cache,
        }
    }

    fn link_back(&mut self, idx: usize, segment: Segment) {
        let old_tail = self.ends(segment).tail;
        if let Some(node) = self.nodes[idx].as_mut() {
            node.segment = segment;
            node.prev = old_tail;
            node.next = None;
        }
        match old_tail {
            Some(tail) => {
                if let Some(node) = self.nodes[tail].as_mut() {
                    node.next = Some(idx);
                }
            }
            None => self.ends_mut(segment).head = Some(idx),
        }
        let ends = self.ends_mut(segment);
        ends.tail = Some(idx);
        ends.len += 1;
    }

    fn unlink(&mut self, idx: usize) {
        let (segment, prev, next) = match self.nodes[idx].as_mut() {
            Some(node) => {
                let links = (node.segment, node.prev, node.next);
                node.prev = None;
                node.next = None;
                links
            }
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.nodes[p].as_mut() {
                    node.next = next;
                }
            }
            None => self.ends_mut(segment).head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.nodes[n].as_mut() {
                    node.prev = prev;
                }
            }
            None => self.ends_mut(segment).tail = prev,
        }
        self.ends_mut(segment).len -= 1;
    }

    /// Check link consistency. Panics on violation.
    pub(crate) fn debug_validate_invariants(&self) {
        let mut seen = 0;
        for segment in [Segment::History, Segment::Cache] {
            let mut prev = None;
            let mut count = 0;
            for idx in self.iter(segment) {
                let Some(node) = self.get(idx) else {
                    panic!("linked index {} holds no node", idx);
                };
                assert_eq!(node.segment, segment);
                assert_eq!(node.prev, prev);
                prev = Some(idx);
                count += 1;
            }
            assert_eq!(self.ends(segment).tail, prev);
            assert_eq!(self.ends(segment).len, count);
            seen += count;
        }
        let present = self.nodes.iter().filter(|n| n.is_some()).count();
        assert_eq!(present, seen);
    }
}

/// Front-to-back iterator over one segment.
pub(crate) struct SegmentIter<'a> {
    list: &'a NodeList,
    current: Option<usize>,
}

impl Iterator for SegmentIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.current?;
        self.current = self.list.get(idx).and_then(|node| node.next);
        Some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(list: &NodeList, segment: Segment) -> Vec<usize> {
        list.iter(segment).collect()
    }

    #[test]
    fn test_push_new_appends_in_order() {
        let mut list = NodeList::with_capacity(8);
        list.push_new(3, Segment::History);
        list.push_new(1, Segment::History);
        list.push_new(5, Segment::Cache);

        assert_eq!(collect(&list, Segment::History), vec![3, 1]);
        assert_eq!(collect(&list, Segment::Cache), vec![5]);
        assert_eq!(list.len(), 3);
        list.debug_validate_invariants();
    }

    #[test]
    fn test_move_to_back_within_segment() {
        let mut list = NodeList::with_capacity(4);
        for i in 0..4 {
            list.push_new(i, Segment::History);
        }

        list.move_to_back(1, Segment::History);
        assert_eq!(collect(&list, Segment::History), vec![0, 2, 3, 1]);

        list.move_to_back(0, Segment::History);
        assert_eq!(collect(&list, Segment::History), vec![2, 3, 1, 0]);
        list.debug_validate_invariants();
    }

    #[test]
    fn test_move_across_segments() {
        let mut list = NodeList::with_capacity(4);
        list.push_new(0, Segment::History);
        list.push_new(1, Segment::History);
        list.push_new(2, Segment::History);

        list.move_to_back(1, Segment::Cache);

        assert_eq!(collect(&list, Segment::History), vec![0, 2]);
        assert_eq!(collect(&list, Segment::Cache), vec![1]);
        assert_eq!(list.get(1).map(FrameNode::segment), Some(Segment::Cache));
        assert_eq!(list.segment_len(Segment::History), 2);
        assert_eq!(list.segment_len(Segment::Cache), 1);
        list.debug_validate_invariants();
    }

    #[test]
    fn test_remove_head_middle_tail() {
        let mut list = NodeList::with_capacity(5);
        for i in 0..5 {
            list.push_new(i, Segment::History);
        }

        assert!(list.remove(0).is_some());
        assert!(list.remove(2).is_some());
        assert!(list.remove(4).is_some());
        assert!(list.remove(4).is_none());

        assert_eq!(collect(&list, Segment::History), vec![1, 3]);
        assert_eq!(list.len(), 2);
        list.debug_validate_invariants();
    }

    #[test]
    fn test_remove_last_node_empties_segment() {
        let mut list = NodeList::with_capacity(2);
        list.push_new(1, Segment::Cache);
        list.remove(1);

        assert_eq!(collect(&list, Segment::Cache), Vec::<usize>::new());
        assert_eq!(list.len(), 0);

        // Slot can be reused after removal.
        list.push_new(1, Segment::History);
        assert_eq!(list.get(1).map(|n| n.access_count), Some(1));
        list.debug_validate_invariants();
    }

    #[test]
    fn test_get_out_of_range() {
        let list = NodeList::with_capacity(2);
        assert!(list.get(2).is_none());
        assert!(list.get(100).is_none());
    }
}
