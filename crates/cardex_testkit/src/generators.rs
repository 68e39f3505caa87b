//! Property-based test generators using proptest.
//!
//! Strategies for random records and insert batches that maintain the
//! store's key assumptions (unique card numbers, signed PINs).

use cardex_core::{CardNumber, Pin, Record};
use proptest::prelude::*;

/// Strategy for card numbers.
pub fn card_number_strategy() -> impl Strategy<Value = CardNumber> {
    (1u64..1_000_000_000).prop_map(CardNumber::new)
}

/// Strategy for PINs, including negative values.
pub fn pin_strategy() -> impl Strategy<Value = Pin> {
    (-99_999i64..100_000).prop_map(Pin::new)
}

/// Strategy for `MM/YY` expiry strings.
pub fn expiry_strategy() -> impl Strategy<Value = String> {
    (1u32..=12, 0u32..100).prop_map(|(month, year)| format!("{month:02}/{year:02}"))
}

/// Strategy for a single record.
pub fn record_strategy() -> impl Strategy<Value = Record> {
    (
        "[a-z]{3,10}",
        prop::sample::select(vec!["North Bank", "South Bank", "East Bank"]),
        card_number_strategy(),
        expiry_strategy(),
        1i32..=28,
        pin_strategy(),
    )
        .prop_map(|(holder, bank, card_number, expiry, billing_date, pin)| {
            Record::new(holder, bank, card_number, expiry, billing_date, pin)
        })
}

/// Strategy for a batch of records with pairwise-distinct card numbers,
/// in random order.
pub fn unique_card_records_strategy(max: usize) -> impl Strategy<Value = Vec<Record>> {
    prop::collection::btree_set(1u64..1_000_000_000, 0..max)
        .prop_flat_map(|cards| {
            let cards: Vec<u64> = cards.into_iter().collect();
            let len = cards.len();
            (
                Just(cards),
                prop::collection::vec(pin_strategy(), len),
                prop::collection::vec(expiry_strategy(), len),
            )
                .prop_map(|(cards, pins, expiries)| {
                    cards
                        .into_iter()
                        .zip(pins)
                        .zip(expiries)
                        .map(|((card, pin), expiry)| {
                            Record::new(
                                format!("holder-{card}"),
                                "Generated Bank",
                                CardNumber::new(card),
                                expiry,
                                (card % 28) as i32 + 1,
                                pin,
                            )
                        })
                        .collect::<Vec<_>>()
                })
        })
        .prop_shuffle()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    proptest! {
        #[test]
        fn expiry_strings_are_well_formed(expiry in expiry_strategy()) {
            prop_assert_eq!(expiry.len(), 5);
            prop_assert_eq!(&expiry[2..3], "/");
            let month: u32 = expiry[..2].parse().unwrap();
            prop_assert!((1..=12).contains(&month));
        }

        #[test]
        fn unique_batches_have_distinct_cards(records in unique_card_records_strategy(50)) {
            let cards: HashSet<u64> =
                records.iter().map(|r| r.card_number.as_u64()).collect();
            prop_assert_eq!(cards.len(), records.len());
        }
    }
}
