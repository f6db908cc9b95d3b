use crate::errors::PathFinderError;

use std::{collections::BinaryHeap, cmp::Ordering};


/// Minimum priority queue over (priority, item) pairs
/// - the same item may be queued many times with different priorities,
///   stale entries are expected to be filtered by the caller on extraction
/// - equal priorities come out in insertion order (FIFO)
#[derive(Debug)]
pub struct MinPriorityQueue<P, T> {
    heap: BinaryHeap<Entry<P, T>>,
    next_seq: u64, // insertion counter used for FIFO tie-breaking
}

impl<P: Ord, T> MinPriorityQueue<P, T> {

    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Queue an item, amortized O(log n)
    pub fn insert(&mut self, priority: P, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { priority, seq, item });
    }

    /// Remove the entry with the smallest priority
    pub fn extract_min(&mut self) -> Result<(P, T), PathFinderError> {
        match self.heap.pop() {
            Some(Entry { priority, item, .. }) => Ok((priority, item)),
            None => Err(PathFinderError::EmptyQueue),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of queued entries, stale duplicates included
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn peek_priority(&self) -> Option<&P> {
        self.heap.peek().map(|e| &e.priority)
    }
}

impl<P: Ord, T> Default for MinPriorityQueue<P, T> {
    fn default() -> Self {
        Self::new()
    }
}


/// Heap entry
/// - BinaryHeap sorts Biggest to Smallest, so the ordering is reversed
/// - only priority and seq take part in the ordering, the item never does
#[derive(Debug)]
struct Entry<P, T> {
    priority: P,
    seq: u64,
    item: T,
}

impl<P: Ord, T> Ord for Entry<P, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.priority.cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}
impl<P: Ord, T> PartialOrd for Entry<P, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<P: Ord, T> PartialEq for Entry<P, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl<P: Ord, T> Eq for Entry<P, T> {}
