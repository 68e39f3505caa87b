//! Integration tests for the multi-index store.

use cardex_core::{CardNumber, CardStore, Pin, SortStrategy, StoreConfig};
use cardex_testkit::prelude::*;
use proptest::prelude::*;

#[test]
fn ordered_and_balanced_lookups_agree_on_fixtures() {
    let store = populated_store();
    for r in sample_records() {
        let ordered = store.search_ordered(r.card_number);
        let balanced = store.search_balanced(r.card_number);
        assert_eq!(ordered, balanced);
        assert_eq!(ordered.map(|found| found.holder), Some(r.holder));
    }
    // Absent keys miss on both paths.
    assert_eq!(store.search_ordered(CardNumber::new(999_999)), None);
    assert_eq!(store.search_balanced(CardNumber::new(999_999)), None);
}

#[test]
fn balanced_lookup_and_in_order_traversal_scenario() {
    let store = CardStore::new();
    store.append(record("A", "Acme", 10, "01/30", 1, 100));
    store.append(record("B", "Acme", 5, "01/30", 2, 200));
    store.append(record("C", "Acme", 20, "01/30", 3, 300));

    let found = store.search_balanced(CardNumber::new(5)).unwrap();
    assert_eq!(found.holder, "B");

    let holders: Vec<String> = store
        .in_order_traversal()
        .into_iter()
        .map(|r| r.holder)
        .collect();
    assert_eq!(holders, vec!["B", "A", "C"]);
}

#[test]
fn priority_extraction_scenario() {
    let store = CardStore::new();
    store.append(record("a", "Acme", 10, "01/30", 1, 1));
    store.append(record("b", "Acme", 50, "01/30", 2, 2));
    store.append(record("c", "Acme", 30, "01/30", 3, 3));
    store.rebuild_priority();

    let cards: Vec<u64> = std::iter::from_fn(|| store.extract_max_priority())
        .map(|r| r.card_number.as_u64())
        .collect();
    assert_eq!(cards, vec![50, 30, 10]);
    assert_eq!(store.extract_max_priority(), None);
    // Extraction drains only the snapshot, never the sequence.
    assert_eq!(store.len(), 3);
}

#[test]
fn undo_scenario() {
    let store = CardStore::new();
    store.append(record("A", "Acme", 1, "01/30", 1, 10));
    store.append(record("B", "Acme", 2, "01/30", 2, 20));

    assert_eq!(store.undo_last_insertion().map(|r| r.holder), Some("B".into()));
    let holders: Vec<String> = store.records().into_iter().map(|r| r.holder).collect();
    assert_eq!(holders, vec!["A"]);

    assert_eq!(store.undo_last_insertion().map(|r| r.holder), Some("A".into()));
    assert_eq!(store.undo_last_insertion(), None);
    assert!(store.is_empty());
}

#[test]
fn open_addressing_probe_placement() {
    // Default capacity is 1000; PINs 5, 1005 and 2005 all hash to slot 5.
    let store = CardStore::new();
    store.append(record("a", "Acme", 1, "01/30", 1, 5));
    store.append(record("b", "Acme", 2, "01/30", 2, 1005));
    store.append(record("c", "Acme", 3, "01/30", 3, 2005));

    assert_eq!(
        store.open_entry_at(5).map(|e| e.pin),
        Some(Pin::new(5))
    );
    assert_eq!(
        store.open_entry_at(6).map(|e| e.pin),
        Some(Pin::new(1005))
    );
    assert_eq!(
        store.open_entry_at(7).map(|e| e.pin),
        Some(Pin::new(2005))
    );

    // The probe walks slots 5 and 6 before matching at 7.
    assert_eq!(
        store.search_open_addressing(Pin::new(2005)).map(|r| r.holder),
        Some("c".to_string())
    );
}

#[test]
fn insert_then_delete_everything_leaves_all_indices_empty() {
    let store = CardStore::new();
    let records = sample_records();
    for r in records.clone() {
        store.append(r);
    }
    store.rebuild_priority();

    // Delete in an order unrelated to insertion order.
    for r in records.iter().rev() {
        assert!(store.delete_by_key(r.card_number, r.pin));
    }

    assert_eq!(store.len(), 0);
    assert_eq!(store.open_len(), 0);
    assert_eq!(store.chain_len(), 0);
    assert!(store.search_ordered(records[0].card_number).is_none());
    assert!(store.search_balanced(records[0].card_number).is_none());
    // The stale snapshot drains without yielding deleted records.
    assert_eq!(store.extract_max_priority(), None);
}

#[test]
fn hash_rebuild_is_idempotent() {
    let store = populated_store();

    store.rebuild_hash_indices();
    let open_first = store.open_entries();
    let chain_first = store.chain_entries();

    store.rebuild_hash_indices();
    assert_eq!(store.open_entries(), open_first);
    assert_eq!(store.chain_entries(), chain_first);
}

#[test]
fn duplicate_pins_are_reachable_through_the_chain_table() {
    let store = populated_store();

    // Bob and Erin share PIN 1111; the open-addressing table keeps both,
    // the chain lookup resolves to one of them.
    let found = store.search_chained(Pin::new(1111)).unwrap();
    assert!(found.holder == "Bob" || found.holder == "Erin");
    assert_eq!(store.open_len(), 5);
}

#[test]
fn every_sort_strategy_reorders_and_keeps_indices_current() {
    for strategy in [
        SortStrategy::Bubble,
        SortStrategy::Selection,
        SortStrategy::Insertion,
        SortStrategy::Merge,
    ] {
        let store = populated_store();
        store.reorder(strategy);

        let pins: Vec<i64> = store.records().iter().map(|r| r.pin.as_i64()).collect();
        let mut sorted = pins.clone();
        sorted.sort_unstable();
        assert_eq!(pins, sorted, "{strategy:?}");
        assert_eq!(store.len(), 5, "{strategy:?}");

        // Hash lookups stay trustworthy right after the sort.
        for r in sample_records() {
            assert!(store.search_chained(r.pin).is_some(), "{strategy:?}");
            assert!(store.search_open_addressing(r.pin).is_some(), "{strategy:?}");
        }
    }
}

#[test]
fn capacity_exhaustion_degrades_only_the_open_table() {
    let store = CardStore::with_config(StoreConfig::new().hash_capacity(2)).unwrap();
    store.append(record("a", "Acme", 1, "01/30", 1, 0));
    store.append(record("b", "Acme", 2, "01/30", 2, 1));
    store.append(record("c", "Acme", 3, "01/30", 3, 2));

    // The third record no longer fits the open table but the store and
    // the chain table carry on.
    assert_eq!(store.len(), 3);
    assert_eq!(store.open_len(), 2);
    assert_eq!(store.chain_len(), 3);
    assert!(store.search_chained(Pin::new(2)).is_some());
    assert_eq!(store.search_open_addressing(Pin::new(2)), None);
}

proptest! {
    #[test]
    fn avl_balance_invariant_holds_after_every_insert(
        keys in prop::collection::vec(1u64..1_000_000, 0..200)
    ) {
        use cardex_core::index::AvlIndex;
        use cardex_core::RecordId;

        let mut index = AvlIndex::new();
        for (i, key) in keys.iter().enumerate() {
            index.insert(CardNumber::new(*key), RecordId::new(i as u64));
            prop_assert!(index.is_balanced());
        }
    }

    #[test]
    fn ordered_and_balanced_lookups_agree(records in unique_card_records_strategy(60)) {
        let store = CardStore::new();
        let loaded = store.bulk_load(records.clone());
        prop_assert_eq!(loaded, records.len());

        for r in &records {
            let ordered = store.search_ordered(r.card_number);
            let balanced = store.search_balanced(r.card_number);
            prop_assert_eq!(ordered.as_ref(), balanced.as_ref());
            prop_assert_eq!(ordered.map(|f| f.card_number), Some(r.card_number));
        }
    }

    #[test]
    fn round_trip_leaves_the_store_empty(records in unique_card_records_strategy(40)) {
        let store = CardStore::new();
        store.bulk_load(records.clone());

        for r in &records {
            prop_assert!(store.delete_by_key(r.card_number, r.pin));
        }

        prop_assert_eq!(store.len(), 0);
        prop_assert_eq!(store.open_len(), 0);
        prop_assert_eq!(store.chain_len(), 0);
    }

    #[test]
    fn traversal_is_sorted_by_card_number(records in unique_card_records_strategy(60)) {
        let store = CardStore::new();
        store.bulk_load(records);

        let cards: Vec<u64> = store
            .in_order_traversal()
            .iter()
            .map(|r| r.card_number.as_u64())
            .collect();
        let mut sorted = cards.clone();
        sorted.sort_unstable();
        prop_assert_eq!(cards, sorted);
    }
}
