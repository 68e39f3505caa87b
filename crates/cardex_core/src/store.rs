//! The multi-index card store.
//!
//! `CardStore` owns the canonical sequence and every access path over
//! it, and enforces the consistency discipline between them:
//!
//! 1. Every mutation (append, delete, reorder, undo) rebuilds BOTH hash
//!    tables before returning, so hash lookups are always current.
//! 2. Mutations mark the tree indices stale; the next tree query
//!    rebuilds them lazily. The asymmetry is deliberate: tree rebuilds
//!    are on demand, hash rebuilds are eager.
//! 3. The priority heap is an explicit point-in-time snapshot
//!    ([`CardStore::rebuild_priority`]); mutations never touch it.
//!
//! # Invariants
//!
//! - Only the canonical sequence creates or destroys record storage.
//! - Indices hold handles, never records; a dead handle resolves to
//!   `None` instead of dangling.
//! - No operation aborts the store: misses are `Option::None`, a full
//!   open-addressing table is logged and skipped.

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::history::InsertHistory;
use crate::index::{
    AvlIndex, BstIndex, ChainEntry, ChainStats, ChainTable, MaxHeap, OpenSlot, OpenTable,
};
use crate::record::{CardNumber, Pin, Record, RecordId};
use crate::sequence::CardSequence;
use crate::sort::SortStrategy;
use crate::stats::{StatsSnapshot, StoreStats};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

/// In-memory multi-index store for card records.
#[derive(Debug)]
pub struct CardStore {
    config: StoreConfig,
    /// Canonical sequence; source of truth and sole owner of records.
    seq: RwLock<CardSequence>,
    /// Unbalanced ordered index by card number.
    bst: RwLock<BstIndex>,
    /// Balanced (AVL) ordered index by card number.
    avl: RwLock<AvlIndex>,
    /// Open-addressing hash table by PIN.
    open: RwLock<OpenTable>,
    /// Chaining hash table by PIN.
    chain: RwLock<ChainTable>,
    /// Priority snapshot by card number.
    heap: RwLock<MaxHeap>,
    /// LIFO insertion log for undo.
    history: RwLock<InsertHistory>,
    /// Set by mutations, cleared by tree rebuilds.
    trees_stale: AtomicBool,
    stats: StoreStats,
}

impl CardStore {
    /// Creates an empty store with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::build(StoreConfig::default())
    }

    /// Creates an empty store with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidConfig`] for a zero hash capacity.
    pub fn with_config(config: StoreConfig) -> StoreResult<Self> {
        if config.hash_capacity == 0 {
            return Err(StoreError::invalid_config("hash capacity must be nonzero"));
        }
        Ok(Self::build(config))
    }

    fn build(config: StoreConfig) -> Self {
        let capacity = config.hash_capacity;
        Self {
            config,
            seq: RwLock::new(CardSequence::new()),
            bst: RwLock::new(BstIndex::new()),
            avl: RwLock::new(AvlIndex::new()),
            open: RwLock::new(OpenTable::with_capacity(capacity)),
            chain: RwLock::new(ChainTable::with_capacity(capacity)),
            heap: RwLock::new(MaxHeap::new()),
            history: RwLock::new(InsertHistory::new()),
            trees_stale: AtomicBool::new(false),
            stats: StoreStats::new(),
        }
    }

    // === Mutations ===

    /// Appends a record at the tail of the canonical sequence.
    ///
    /// The insertion is logged for undo and both hash tables are rebuilt
    /// before returning; the tree indices become stale.
    pub fn append(&self, record: Record) -> RecordId {
        let id = self.seq.write().append(record);
        self.history.write().push(id);
        self.rebuild_hash_indices();
        self.trees_stale.store(true, Ordering::Relaxed);
        self.stats.record_append();
        debug!(%id, "record appended");
        id
    }

    /// Deletes the record matching BOTH keys.
    ///
    /// Returns whether a match was found. On a hit both hash tables are
    /// rebuilt and the tree indices become stale.
    pub fn delete_by_key(&self, card_number: CardNumber, pin: Pin) -> bool {
        let removed = self.seq.write().remove(card_number, pin);
        match removed {
            Some(_) => {
                self.rebuild_hash_indices();
                self.trees_stale.store(true, Ordering::Relaxed);
                self.stats.record_delete();
                debug!(%card_number, "record deleted");
                true
            }
            None => false,
        }
    }

    /// Loads a batch of records, then builds every index once.
    ///
    /// This is the ingestion path: per-record hash rebuilds are skipped
    /// and the priority snapshot is taken at the end.
    pub fn bulk_load<I>(&self, records: I) -> usize
    where
        I: IntoIterator<Item = Record>,
    {
        let mut count = 0;
        {
            let mut seq = self.seq.write();
            let mut history = self.history.write();
            for record in records {
                let id = seq.append(record);
                history.push(id);
                self.stats.record_append();
                count += 1;
            }
        }
        self.rebuild_hash_indices();
        self.rebuild_trees();
        self.rebuild_priority();
        debug!(count, "bulk load complete");
        count
    }

    /// Reorders the canonical sequence by PIN with the chosen algorithm.
    ///
    /// Both hash tables are rebuilt afterwards and the tree indices
    /// become stale, so no access path observes the pre-sort ordering.
    pub fn reorder(&self, strategy: SortStrategy) {
        self.seq.write().reorder(strategy);
        self.rebuild_hash_indices();
        self.trees_stale.store(true, Ordering::Relaxed);
        self.stats.record_reorder();
        debug!(?strategy, "sequence reordered");
    }

    /// Undoes the most recent insertion that is still extant.
    ///
    /// Handles of records already deleted by key are skipped. Returns
    /// the removed record, or `None` when the history is exhausted (a
    /// no-op, not an error).
    pub fn undo_last_insertion(&self) -> Option<Record> {
        loop {
            let id = self.history.write().pop()?;
            let record = self.seq.read().get(id).cloned();
            if let Some(record) = record {
                if self.delete_by_key(record.card_number, record.pin) {
                    self.stats.record_undo();
                    return Some(record);
                }
            }
        }
    }

    /// Returns the most recent still-extant insertion without removing it.
    #[must_use]
    pub fn peek_last_insertion(&self) -> Option<Record> {
        let history = self.history.read();
        let seq = self.seq.read();
        let result = history
            .iter_newest_first()
            .find_map(|id| seq.get(id).cloned());
        result
    }

    // === Rebuilds ===

    /// Rebuilds both hash tables from the canonical sequence.
    ///
    /// Idempotent: rebuilding twice without an intervening mutation
    /// yields identical table contents. A record that does not fit the
    /// open-addressing table is logged and omitted from that one index.
    pub fn rebuild_hash_indices(&self) {
        let seq = self.seq.read();
        let mut open = self.open.write();
        let mut chain = self.chain.write();
        open.clear();
        chain.clear();
        for (id, record) in seq.iter_ordered() {
            if let Err(err) = open.insert(record.pin, id) {
                warn!(%err, "open addressing insert skipped");
            }
            chain.insert(record.pin, id);
        }
        self.stats.record_hash_rebuild();
        debug!(entries = seq.len(), "hash tables rebuilt");
    }

    fn rebuild_trees(&self) {
        let seq = self.seq.read();
        let entries = || seq.iter_ordered().map(|(id, r)| (r.card_number, id));
        *self.bst.write() = BstIndex::build(entries());
        *self.avl.write() = AvlIndex::build(entries());
        self.trees_stale.store(false, Ordering::Relaxed);
        self.stats.record_tree_rebuild();
        debug!(entries = seq.len(), "tree indices rebuilt");
    }

    fn ensure_trees(&self) {
        if self.trees_stale.load(Ordering::Relaxed) {
            self.rebuild_trees();
        }
    }

    /// Takes a fresh priority snapshot of the canonical sequence.
    ///
    /// The snapshot is the only way the heap ever changes besides
    /// extraction; mutations of the sequence never touch it.
    pub fn rebuild_priority(&self) {
        let seq = self.seq.read();
        *self.heap.write() = MaxHeap::from_snapshot(
            seq.iter_ordered().map(|(id, r)| (r.card_number, id)),
        );
        self.stats.record_heap_rebuild();
        debug!(entries = seq.len(), "priority snapshot taken");
    }

    // === Queries ===

    /// Looks up a record by card number through the unbalanced index.
    ///
    /// Rebuilds the tree first iff a mutation left it stale.
    #[must_use]
    pub fn search_ordered(&self, card_number: CardNumber) -> Option<Record> {
        self.ensure_trees();
        self.stats.record_lookup();
        let id = self.bst.read().search(card_number)?;
        self.seq.read().get(id).cloned()
    }

    /// Looks up a record by card number through the AVL index.
    #[must_use]
    pub fn search_balanced(&self, card_number: CardNumber) -> Option<Record> {
        self.ensure_trees();
        self.stats.record_lookup();
        let id = self.avl.read().search(card_number)?;
        self.seq.read().get(id).cloned()
    }

    /// Returns records in ascending card-number order (ordered-index walk).
    #[must_use]
    pub fn in_order_traversal(&self) -> Vec<Record> {
        self.ensure_trees();
        let ids = self.bst.read().in_order();
        let seq = self.seq.read();
        ids.iter().filter_map(|id| seq.get(*id).cloned()).collect()
    }

    /// Looks up a record by PIN through the open-addressing table.
    #[must_use]
    pub fn search_open_addressing(&self, pin: Pin) -> Option<Record> {
        self.stats.record_lookup();
        let id = self.open.read().search(pin)?;
        self.seq.read().get(id).cloned()
    }

    /// Looks up a record by PIN through the chain table.
    #[must_use]
    pub fn search_chained(&self, pin: Pin) -> Option<Record> {
        self.stats.record_lookup();
        let id = self.chain.read().search(pin)?;
        self.seq.read().get(id).cloned()
    }

    /// Destructively extracts the maximum-card-number record from the
    /// current priority snapshot.
    ///
    /// Handles whose records were deleted after the snapshot are
    /// skipped. Returns `None` once the snapshot is drained.
    pub fn extract_max_priority(&self) -> Option<Record> {
        let mut heap = self.heap.write();
        loop {
            let id = heap.extract_max()?;
            if let Some(record) = self.seq.read().get(id).cloned() {
                self.stats.record_extraction();
                return Some(record);
            }
        }
    }

    /// Scans the canonical order for a PIN.
    ///
    /// Returns the position and record of the first match.
    #[must_use]
    pub fn search_linear(&self, pin: Pin) -> Option<(usize, Record)> {
        self.stats.record_lookup();
        let seq = self.seq.read();
        let result = seq
            .iter_ordered()
            .enumerate()
            .find(|(_, (_, r))| r.pin == pin)
            .map(|(pos, (_, r))| (pos, r.clone()));
        result
    }

    /// Binary-searches the sequence by PIN.
    ///
    /// This is a mutating query: the sequence is merge-sorted by PIN
    /// first (hash tables rebuilt accordingly), then the sorted
    /// positions are bisected. Returns the position and record of a
    /// match in the post-sort ordering.
    pub fn search_binary(&self, pin: Pin) -> Option<(usize, Record)> {
        self.reorder(SortStrategy::Merge);
        self.stats.record_lookup();
        let seq = self.seq.read();
        let order = seq.order();
        let mut lo = 0;
        let mut hi = order.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let record = seq.get(order[mid])?;
            if record.pin == pin {
                return Some((mid, record.clone()));
            }
            if record.pin < pin {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        None
    }

    // === Subsets and listings ===

    /// Returns clones of all records satisfying a predicate, in
    /// canonical order. A pure read: no index is touched.
    #[must_use]
    pub fn snapshot_subset<P>(&self, predicate: P) -> Vec<Record>
    where
        P: Fn(&Record) -> bool,
    {
        self.seq
            .read()
            .iter_ordered()
            .filter(|(_, r)| predicate(r))
            .map(|(_, r)| r.clone())
            .collect()
    }

    /// Returns all records issued by a bank, in canonical order.
    #[must_use]
    pub fn records_by_bank(&self, bank: &str) -> Vec<Record> {
        self.snapshot_subset(|r| r.bank == bank)
    }

    /// Returns all records held by a person, in canonical order.
    #[must_use]
    pub fn records_by_holder(&self, holder: &str) -> Vec<Record> {
        self.snapshot_subset(|r| r.holder == holder)
    }

    /// Returns all records in canonical order.
    #[must_use]
    pub fn records(&self) -> Vec<Record> {
        self.snapshot_subset(|_| true)
    }

    // === Inspection ===

    /// Returns the number of records in the canonical sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seq.read().len()
    }

    /// Returns true if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seq.read().is_empty()
    }

    /// Returns the occupied open-addressing slots in slot order.
    #[must_use]
    pub fn open_entries(&self) -> Vec<(usize, OpenSlot)> {
        self.open.read().entries()
    }

    /// Returns the number of entries in the open-addressing table.
    #[must_use]
    pub fn open_len(&self) -> usize {
        self.open.read().len()
    }

    /// Returns the slot contents of the open-addressing table at an index.
    #[must_use]
    pub fn open_entry_at(&self, slot: usize) -> Option<OpenSlot> {
        self.open.read().entry_at(slot)
    }

    /// Returns every non-empty chain bucket in bucket order.
    #[must_use]
    pub fn chain_entries(&self) -> Vec<(usize, Vec<ChainEntry>)> {
        self.chain.read().entries()
    }

    /// Returns the number of entries in the chain table.
    #[must_use]
    pub fn chain_len(&self) -> usize {
        self.chain.read().len()
    }

    /// Returns occupancy statistics of the chain table.
    #[must_use]
    pub fn chain_stats(&self) -> ChainStats {
        self.chain.read().stats()
    }

    /// Returns the number of elements left in the priority snapshot.
    #[must_use]
    pub fn priority_len(&self) -> usize {
        self.heap.read().len()
    }

    /// Returns a snapshot of the operation counters.
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Returns the store configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

impl Default for CardStore {
    fn default() -> Self {
        Self::new()
    }
}
