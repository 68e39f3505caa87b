//! Canonical record sequence.
//!
//! The sequence is the single owner of record storage: an arena keyed by
//! [`RecordId`] plus an insertion-ordered handle vector. It is the only
//! structure authorized to create or destroy a record; every index holds
//! handles into it and becomes stale, never dangling, when it mutates.

use crate::record::{CardNumber, Pin, Record, RecordId};
use crate::sort::{self, SortStrategy};
use std::collections::HashMap;

/// Ordered, mutable collection of records; the store's source of truth.
#[derive(Debug, Default)]
pub struct CardSequence {
    arena: HashMap<RecordId, Record>,
    order: Vec<RecordId>,
    next_id: u64,
}

impl CardSequence {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record at the tail and returns its handle.
    pub fn append(&mut self, record: Record) -> RecordId {
        let id = RecordId::new(self.next_id);
        self.next_id += 1;
        self.arena.insert(id, record);
        self.order.push(id);
        id
    }

    /// Removes the first record matching BOTH keys.
    ///
    /// Returns the removed record, or `None` when no record matches the
    /// card number and PIN together.
    pub fn remove(&mut self, card_number: CardNumber, pin: Pin) -> Option<Record> {
        let pos = self.order.iter().position(|id| {
            self.arena
                .get(id)
                .is_some_and(|r| r.card_number == card_number && r.pin == pin)
        })?;
        let id = self.order.remove(pos);
        self.arena.remove(&id)
    }

    /// Resolves a handle. Dead handles yield `None`.
    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.arena.get(&id)
    }

    /// Returns whether a handle is still live.
    #[must_use]
    pub fn contains(&self, id: RecordId) -> bool {
        self.arena.contains_key(&id)
    }

    /// Returns the current ordering of handles.
    #[must_use]
    pub fn order(&self) -> &[RecordId] {
        &self.order
    }

    /// Iterates records in canonical order.
    pub fn iter_ordered(&self) -> impl Iterator<Item = (RecordId, &Record)> {
        self.order
            .iter()
            .filter_map(|id| self.arena.get(id).map(|r| (*id, r)))
    }

    /// Permutes the ordering by PIN with the chosen algorithm.
    ///
    /// No record is created or destroyed; only the ordering changes.
    pub fn reorder(&mut self, strategy: SortStrategy) {
        sort::sort_by_pin(&mut self.order, &self.arena, strategy);
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the sequence holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
