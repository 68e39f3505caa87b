//! Chaining hash table over PINs.

use crate::record::{Pin, RecordId};

/// One entry of a bucket chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainEntry {
    /// PIN stored in this entry.
    pub pin: Pin,
    /// Handle of the indexed record.
    pub id: RecordId,
}

/// Occupancy statistics of a chain table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChainStats {
    /// Total entries across all buckets.
    pub entries: usize,
    /// Buckets holding at least one entry.
    pub non_empty_buckets: usize,
    /// Length of the longest chain.
    pub longest_chain: usize,
    /// Entries divided by capacity.
    pub load_factor: f64,
}

/// Fixed-capacity hash table resolving collisions by chaining.
///
/// New entries are prepended to their bucket, so within a bucket the
/// most recently inserted entry is seen first; no other ordering holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainTable {
    buckets: Vec<Vec<ChainEntry>>,
    len: usize,
}

impl ChainTable {
    /// Creates an empty table with the given fixed capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: vec![Vec::new(); capacity],
            len: 0,
        }
    }

    /// Returns the fixed bucket count.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Prepends a PIN-handle pair to its bucket. Chaining never fills up.
    pub fn insert(&mut self, pin: Pin, id: RecordId) {
        let capacity = self.capacity();
        if capacity == 0 {
            return;
        }
        let bucket = pin.slot(capacity);
        self.buckets[bucket].insert(0, ChainEntry { pin, id });
        self.len += 1;
    }

    /// Looks up a record by PIN; the first equality match in the chain wins.
    #[must_use]
    pub fn search(&self, pin: Pin) -> Option<RecordId> {
        let capacity = self.capacity();
        if capacity == 0 {
            return None;
        }
        self.buckets[pin.slot(capacity)]
            .iter()
            .find(|entry| entry.pin == pin)
            .map(|entry| entry.id)
    }

    /// Returns every non-empty bucket with its chain, in bucket order.
    #[must_use]
    pub fn entries(&self) -> Vec<(usize, Vec<ChainEntry>)> {
        self.buckets
            .iter()
            .enumerate()
            .filter(|(_, chain)| !chain.is_empty())
            .map(|(i, chain)| (i, chain.clone()))
            .collect()
    }

    /// Computes occupancy statistics.
    #[must_use]
    pub fn stats(&self) -> ChainStats {
        let non_empty_buckets = self.buckets.iter().filter(|c| !c.is_empty()).count();
        let longest_chain = self.buckets.iter().map(Vec::len).max().unwrap_or(0);
        let load_factor = if self.capacity() == 0 {
            0.0
        } else {
            self.len as f64 / self.capacity() as f64
        };
        ChainStats {
            entries: self.len,
            non_empty_buckets,
            longest_chain,
            load_factor,
        }
    }

    /// Empties every bucket.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Returns the total entry count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if every bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
