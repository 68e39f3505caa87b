//! Open-addressing hash table over PINs.

use crate::error::{StoreError, StoreResult};
use crate::record::{Pin, RecordId};

/// One occupied slot of the open-addressing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenSlot {
    /// PIN stored in this slot.
    pub pin: Pin,
    /// Handle of the indexed record.
    pub id: RecordId,
}

/// Fixed-capacity hash table with linear probing.
///
/// Slots are indexed by `pin mod capacity` (normalized non-negative);
/// collisions probe forward with wraparound. The table is never resized.
///
/// Slots are never cleared in place: removal happens only through
/// [`OpenTable::clear`] followed by a full rebuild. That discipline is
/// what keeps the empty-slot early exit in [`OpenTable::search`] sound;
/// point-deletion would require tombstone markers instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTable {
    slots: Vec<Option<OpenSlot>>,
    len: usize,
}

impl OpenTable {
    /// Creates an empty table with the given fixed capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            len: 0,
        }
    }

    /// Returns the fixed slot count.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Inserts a PIN-handle pair at the first free slot on its probe path.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CapacityExhausted`] when a full probe cycle
    /// finds no empty slot. The record is then absent from this table;
    /// the condition is recoverable and must not abort the store.
    pub fn insert(&mut self, pin: Pin, id: RecordId) -> StoreResult<()> {
        let capacity = self.capacity();
        if capacity == 0 {
            return Err(StoreError::capacity_exhausted(pin.as_i64(), capacity));
        }
        let start = pin.slot(capacity);
        for probe in 0..capacity {
            let slot = (start + probe) % capacity;
            if self.slots[slot].is_none() {
                self.slots[slot] = Some(OpenSlot { pin, id });
                self.len += 1;
                return Ok(());
            }
        }
        Err(StoreError::capacity_exhausted(pin.as_i64(), capacity))
    }

    /// Looks up the first record stored under a PIN.
    ///
    /// Probing stops at the first empty slot: because entries are never
    /// removed in place, an empty slot proves the PIN is absent.
    #[must_use]
    pub fn search(&self, pin: Pin) -> Option<RecordId> {
        let capacity = self.capacity();
        if capacity == 0 {
            return None;
        }
        let start = pin.slot(capacity);
        for probe in 0..capacity {
            let slot = (start + probe) % capacity;
            match self.slots[slot] {
                Some(entry) if entry.pin == pin => return Some(entry.id),
                Some(_) => {}
                None => return None,
            }
        }
        None
    }

    /// Returns the slot contents at an index, if occupied.
    #[must_use]
    pub fn entry_at(&self, slot: usize) -> Option<OpenSlot> {
        self.slots.get(slot).copied().flatten()
    }

    /// Returns all occupied slots in slot order.
    #[must_use]
    pub fn entries(&self) -> Vec<(usize, OpenSlot)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|entry| (i, entry)))
            .collect()
    }

    /// Empties every slot. The only supported form of removal.
    pub fn clear(&mut self) {
        self.slots.fill(None);
        self.len = 0;
    }

    /// Returns the number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no slot is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colliding_pins_probe_forward() {
        let mut table = OpenTable::with_capacity(1000);
        table.insert(Pin::new(5), RecordId::new(1)).unwrap();
        table.insert(Pin::new(1005), RecordId::new(2)).unwrap();
        table.insert(Pin::new(2005), RecordId::new(3)).unwrap();

        assert_eq!(table.entry_at(5).map(|e| e.id), Some(RecordId::new(1)));
        assert_eq!(table.entry_at(6).map(|e| e.id), Some(RecordId::new(2)));
        assert_eq!(table.entry_at(7).map(|e| e.id), Some(RecordId::new(3)));

        // Probes through slots 5 and 6 before matching at 7.
        assert_eq!(table.search(Pin::new(2005)), Some(RecordId::new(3)));
    }

    #[test]
    fn search_stops_at_first_empty_slot() {
        let mut table = OpenTable::with_capacity(1000);
        table.insert(Pin::new(5), RecordId::new(1)).unwrap();

        // 1005 hashes to slot 5 but slot 6 is empty, so it is absent.
        assert_eq!(table.search(Pin::new(1005)), None);
    }

    #[test]
    fn wraparound_probing() {
        let mut table = OpenTable::with_capacity(4);
        table.insert(Pin::new(3), RecordId::new(1)).unwrap();
        table.insert(Pin::new(7), RecordId::new(2)).unwrap();

        // Second entry wrapped past the end to slot 0.
        assert_eq!(table.entry_at(0).map(|e| e.id), Some(RecordId::new(2)));
        assert_eq!(table.search(Pin::new(7)), Some(RecordId::new(2)));
    }

    #[test]
    fn full_table_reports_exhaustion() {
        let mut table = OpenTable::with_capacity(2);
        table.insert(Pin::new(0), RecordId::new(1)).unwrap();
        table.insert(Pin::new(1), RecordId::new(2)).unwrap();

        let err = table.insert(Pin::new(2), RecordId::new(3)).unwrap_err();
        assert!(matches!(err, StoreError::CapacityExhausted { .. }));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn negative_pins_normalize() {
        let mut table = OpenTable::with_capacity(10);
        table.insert(Pin::new(-3), RecordId::new(1)).unwrap();
        assert_eq!(table.entry_at(7).map(|e| e.id), Some(RecordId::new(1)));
        assert_eq!(table.search(Pin::new(-3)), Some(RecordId::new(1)));
    }

    #[test]
    fn clear_then_rebuild_yields_identical_contents() {
        let mut table = OpenTable::with_capacity(100);
        for (i, pin) in [17i64, 117, 5, -5].into_iter().enumerate() {
            table.insert(Pin::new(pin), RecordId::new(i as u64)).unwrap();
        }
        let first = table.clone();

        table.clear();
        assert!(table.is_empty());
        for (i, pin) in [17i64, 117, 5, -5].into_iter().enumerate() {
            table.insert(Pin::new(pin), RecordId::new(i as u64)).unwrap();
        }
        assert_eq!(table, first);
    }
}
