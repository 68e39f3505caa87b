//! Reorder strategies for the canonical sequence.
//!
//! All four algorithms permute the sequence's handle vector in place,
//! comparing records by PIN. Set membership never changes: no record is
//! created or destroyed by a reorder.

use crate::record::{Record, RecordId};
use std::collections::HashMap;

/// Algorithm selected by [`crate::CardStore::reorder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortStrategy {
    /// Adjacent-swap passes until no swap occurs.
    Bubble,
    /// Repeated minimum selection.
    Selection,
    /// Shift-into-place insertion sort.
    Insertion,
    /// Top-down merge sort.
    Merge,
}

/// Sorts `order` ascending by PIN using the chosen strategy.
pub(crate) fn sort_by_pin(
    order: &mut Vec<RecordId>,
    arena: &HashMap<RecordId, Record>,
    strategy: SortStrategy,
) {
    match strategy {
        SortStrategy::Bubble => bubble(order, arena),
        SortStrategy::Selection => selection(order, arena),
        SortStrategy::Insertion => insertion(order, arena),
        SortStrategy::Merge => {
            let sorted = merge_sort(order.as_slice(), arena);
            *order = sorted;
        }
    }
}

// The order vector only ever holds live handles; the fallback key keeps
// this function total without panicking.
fn pin_of(arena: &HashMap<RecordId, Record>, id: RecordId) -> i64 {
    arena.get(&id).map_or(i64::MAX, |r| r.pin.as_i64())
}

fn bubble(order: &mut [RecordId], arena: &HashMap<RecordId, Record>) {
    if order.is_empty() {
        return;
    }
    let mut swapped = true;
    while swapped {
        swapped = false;
        for i in 0..order.len() - 1 {
            if pin_of(arena, order[i]) > pin_of(arena, order[i + 1]) {
                order.swap(i, i + 1);
                swapped = true;
            }
        }
    }
}

fn selection(order: &mut [RecordId], arena: &HashMap<RecordId, Record>) {
    for i in 0..order.len() {
        let mut min = i;
        for j in i + 1..order.len() {
            if pin_of(arena, order[j]) < pin_of(arena, order[min]) {
                min = j;
            }
        }
        order.swap(i, min);
    }
}

fn insertion(order: &mut [RecordId], arena: &HashMap<RecordId, Record>) {
    for i in 1..order.len() {
        let current = order[i];
        let key = pin_of(arena, current);
        let mut j = i;
        while j > 0 && pin_of(arena, order[j - 1]) > key {
            order[j] = order[j - 1];
            j -= 1;
        }
        order[j] = current;
    }
}

fn merge_sort(order: &[RecordId], arena: &HashMap<RecordId, Record>) -> Vec<RecordId> {
    if order.len() <= 1 {
        return order.to_vec();
    }
    let mid = order.len() / 2;
    let left = merge_sort(&order[..mid], arena);
    let right = merge_sort(&order[mid..], arena);
    merge(left, right, arena)
}

fn merge(
    left: Vec<RecordId>,
    right: Vec<RecordId>,
    arena: &HashMap<RecordId, Record>,
) -> Vec<RecordId> {
    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut l = left.into_iter().peekable();
    let mut r = right.into_iter().peekable();
    loop {
        match (l.peek(), r.peek()) {
            (Some(&a), Some(&b)) => {
                // <= keeps the merge stable for equal PINs.
                if pin_of(arena, a) <= pin_of(arena, b) {
                    out.push(a);
                    l.next();
                } else {
                    out.push(b);
                    r.next();
                }
            }
            (Some(_), None) => {
                out.extend(l);
                break;
            }
            (None, _) => {
                out.extend(r);
                break;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CardNumber, Pin};

    fn arena_of(pins: &[i64]) -> (Vec<RecordId>, HashMap<RecordId, Record>) {
        let mut arena = HashMap::new();
        let mut order = Vec::new();
        for (i, &pin) in pins.iter().enumerate() {
            let id = RecordId::new(i as u64);
            arena.insert(
                id,
                Record::new(
                    format!("holder-{i}"),
                    "bank",
                    CardNumber::new(i as u64),
                    "01/30",
                    1,
                    Pin::new(pin),
                ),
            );
            order.push(id);
        }
        (order, arena)
    }

    fn pins_in_order(order: &[RecordId], arena: &HashMap<RecordId, Record>) -> Vec<i64> {
        order.iter().map(|id| arena[id].pin.as_i64()).collect()
    }

    #[test]
    fn all_strategies_sort_ascending() {
        for strategy in [
            SortStrategy::Bubble,
            SortStrategy::Selection,
            SortStrategy::Insertion,
            SortStrategy::Merge,
        ] {
            let (mut order, arena) = arena_of(&[42, -7, 0, 13, 42, 5]);
            sort_by_pin(&mut order, &arena, strategy);
            assert_eq!(
                pins_in_order(&order, &arena),
                vec![-7, 0, 5, 13, 42, 42],
                "{strategy:?}"
            );
        }
    }

    #[test]
    fn empty_and_singleton() {
        for strategy in [SortStrategy::Bubble, SortStrategy::Merge] {
            let (mut order, arena) = arena_of(&[]);
            sort_by_pin(&mut order, &arena, strategy);
            assert!(order.is_empty());

            let (mut order, arena) = arena_of(&[9]);
            sort_by_pin(&mut order, &arena, strategy);
            assert_eq!(pins_in_order(&order, &arena), vec![9]);
        }
    }

    #[test]
    fn merge_is_stable_for_equal_pins() {
        let (mut order, arena) = arena_of(&[7, 7, 7]);
        let before = order.clone();
        sort_by_pin(&mut order, &arena, SortStrategy::Merge);
        assert_eq!(order, before);
    }

    #[test]
    fn membership_is_preserved() {
        let (mut order, arena) = arena_of(&[3, 1, 2]);
        let mut before = order.clone();
        sort_by_pin(&mut order, &arena, SortStrategy::Selection);
        let mut after = order.clone();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }
}
