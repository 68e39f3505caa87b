//! Max-heap priority index.

use crate::record::{CardNumber, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeapEntry {
    key: CardNumber,
    id: RecordId,
}

/// Implicit-array binary max-heap over card numbers.
///
/// The heap is a destructive point-in-time snapshot: it is built from
/// the canonical sequence once and never follows later mutations.
/// [`MaxHeap::extract_max`] removes elements from the heap's own view
/// only; the underlying records are untouched.
#[derive(Debug, Default, Clone)]
pub struct MaxHeap {
    entries: Vec<HeapEntry>,
}

impl MaxHeap {
    /// Creates an empty heap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a heap from a snapshot of key-handle pairs.
    ///
    /// Uses bottom-up heapify: sift down every internal node starting
    /// from the last one.
    pub fn from_snapshot<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (CardNumber, RecordId)>,
    {
        let entries: Vec<HeapEntry> = entries
            .into_iter()
            .map(|(key, id)| HeapEntry { key, id })
            .collect();
        let mut heap = Self { entries };
        for i in (0..heap.entries.len() / 2).rev() {
            heap.sift_down(i);
        }
        heap
    }

    /// Removes and returns the handle with the largest key.
    ///
    /// Returns `None` when the heap is empty (a recoverable no-op).
    pub fn extract_max(&mut self) -> Option<RecordId> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let max = self.entries.pop()?;
        self.sift_down(0);
        Some(max.id)
    }

    /// Returns the handle with the largest key without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<RecordId> {
        self.entries.first().map(|entry| entry.id)
    }

    /// Returns the number of elements remaining in this view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the view has been fully drained (or never filled).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn sift_down(&mut self, mut i: usize) {
        loop {
            let left = 2 * i + 1;
            let right = 2 * i + 2;
            let mut largest = i;
            if left < self.entries.len() && self.entries[left].key > self.entries[largest].key {
                largest = left;
            }
            if right < self.entries.len() && self.entries[right].key > self.entries[largest].key {
                largest = right;
            }
            if largest == i {
                return;
            }
            self.entries.swap(i, largest);
            i = largest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: u64) -> (CardNumber, RecordId) {
        (CardNumber::new(key), RecordId::new(key))
    }

    #[test]
    fn extracts_in_descending_key_order() {
        let mut heap = MaxHeap::from_snapshot([entry(10), entry(50), entry(30)]);

        assert_eq!(heap.extract_max(), Some(RecordId::new(50)));
        assert_eq!(heap.extract_max(), Some(RecordId::new(30)));
        assert_eq!(heap.extract_max(), Some(RecordId::new(10)));
        assert_eq!(heap.extract_max(), None);
    }

    #[test]
    fn empty_heap_is_a_noop() {
        let mut heap = MaxHeap::new();
        assert_eq!(heap.extract_max(), None);
        assert!(heap.is_empty());
    }

    #[test]
    fn peek_does_not_remove() {
        let mut heap = MaxHeap::from_snapshot([entry(1), entry(9), entry(5)]);
        assert_eq!(heap.peek(), Some(RecordId::new(9)));
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.extract_max(), Some(RecordId::new(9)));
        assert_eq!(heap.len(), 2);
    }

    #[test]
    fn large_snapshot_drains_sorted() {
        let keys = [7u64, 3, 99, 42, 0, 18, 77, 12, 63, 5];
        let mut heap = MaxHeap::from_snapshot(keys.map(entry));

        let mut drained = Vec::new();
        while let Some(id) = heap.extract_max() {
            drained.push(id.as_u64());
        }
        let mut expected = keys.to_vec();
        expected.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(drained, expected);
    }
}
