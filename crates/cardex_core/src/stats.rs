//! Store statistics and telemetry.
//!
//! Counters for every operation class the store performs. All counters
//! are atomic and monotonically increasing; [`StoreStats::snapshot`]
//! clones them out into a plain struct.

use std::sync::atomic::{AtomicU64, Ordering};

/// Operation counters for a store instance.
#[derive(Debug, Default)]
pub struct StoreStats {
    /// Records appended to the canonical sequence.
    appends: AtomicU64,
    /// Records deleted by key (including undo-driven deletes).
    deletes: AtomicU64,
    /// Undo operations that removed a record.
    undos: AtomicU64,
    /// Reorders of the canonical sequence.
    reorders: AtomicU64,
    /// Index lookups across all access paths.
    lookups: AtomicU64,
    /// Full rebuilds of the two hash tables.
    hash_rebuilds: AtomicU64,
    /// Rebuilds of the two tree indices.
    tree_rebuilds: AtomicU64,
    /// Priority snapshots taken.
    heap_rebuilds: AtomicU64,
    /// Destructive priority extractions that returned a record.
    extractions: AtomicU64,
}

impl StoreStats {
    /// Creates a zeroed stats instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_append(&self) {
        self.appends.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_undo(&self) {
        self.undos.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_reorder(&self) {
        self.reorders.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_lookup(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_hash_rebuild(&self) {
        self.hash_rebuilds.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_tree_rebuild(&self) {
        self.tree_rebuilds.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_heap_rebuild(&self) {
        self.heap_rebuilds.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_extraction(&self) {
        self.extractions.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the total number of appends.
    pub fn appends(&self) -> u64 {
        self.appends.load(Ordering::Relaxed)
    }

    /// Returns the total number of deletes.
    pub fn deletes(&self) -> u64 {
        self.deletes.load(Ordering::Relaxed)
    }

    /// Returns the total number of effective undo operations.
    pub fn undos(&self) -> u64 {
        self.undos.load(Ordering::Relaxed)
    }

    /// Returns the total number of reorders.
    pub fn reorders(&self) -> u64 {
        self.reorders.load(Ordering::Relaxed)
    }

    /// Returns the total number of index lookups.
    pub fn lookups(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }

    /// Returns the total number of hash-table rebuilds.
    pub fn hash_rebuilds(&self) -> u64 {
        self.hash_rebuilds.load(Ordering::Relaxed)
    }

    /// Returns the total number of tree-index rebuilds.
    pub fn tree_rebuilds(&self) -> u64 {
        self.tree_rebuilds.load(Ordering::Relaxed)
    }

    /// Returns the total number of priority snapshots.
    pub fn heap_rebuilds(&self) -> u64 {
        self.heap_rebuilds.load(Ordering::Relaxed)
    }

    /// Returns the total number of successful extractions.
    pub fn extractions(&self) -> u64 {
        self.extractions.load(Ordering::Relaxed)
    }

    /// Returns a point-in-time snapshot of all counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            appends: self.appends(),
            deletes: self.deletes(),
            undos: self.undos(),
            reorders: self.reorders(),
            lookups: self.lookups(),
            hash_rebuilds: self.hash_rebuilds(),
            tree_rebuilds: self.tree_rebuilds(),
            heap_rebuilds: self.heap_rebuilds(),
            extractions: self.extractions(),
        }
    }
}

/// A point-in-time snapshot of store statistics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    /// Records appended.
    pub appends: u64,
    /// Records deleted by key.
    pub deletes: u64,
    /// Effective undo operations.
    pub undos: u64,
    /// Reorders of the canonical sequence.
    pub reorders: u64,
    /// Index lookups.
    pub lookups: u64,
    /// Hash-table rebuilds.
    pub hash_rebuilds: u64,
    /// Tree-index rebuilds.
    pub tree_rebuilds: u64,
    /// Priority snapshots taken.
    pub heap_rebuilds: u64,
    /// Successful priority extractions.
    pub extractions: u64,
}
