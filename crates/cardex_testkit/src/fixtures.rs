//! Test fixtures and store helpers.
//!
//! Canned records with known keys, a pre-populated store, and a sample
//! CSV file in the ingestion column layout.

use cardex_core::{CardNumber, CardStore, Pin, Record};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Builds a record from plain values.
#[must_use]
pub fn record(
    holder: &str,
    bank: &str,
    card_number: u64,
    expiry: &str,
    billing_date: i32,
    pin: i64,
) -> Record {
    Record::new(
        holder,
        bank,
        CardNumber::new(card_number),
        expiry,
        billing_date,
        Pin::new(pin),
    )
}

/// Returns the canned record set used across integration tests.
///
/// Three "North Bank" and two "South Bank" records; Bob and Erin share
/// PIN 1111 to exercise duplicate-PIN lookups.
#[must_use]
pub fn sample_records() -> Vec<Record> {
    vec![
        record("Alice", "North Bank", 5010, "01/27", 12, 4321),
        record("Bob", "North Bank", 5002, "06/28", 5, 1111),
        record("Carol", "South Bank", 5077, "11/26", 20, 2222),
        record("Dan", "North Bank", 5044, "03/29", 7, 3333),
        record("Erin", "South Bank", 5023, "09/27", 28, 1111),
    ]
}

/// Returns a store bulk-loaded with [`sample_records`].
///
/// All indices (trees, hash tables, priority snapshot) are built.
#[must_use]
pub fn populated_store() -> CardStore {
    let store = CardStore::new();
    store.bulk_load(sample_records());
    store
}

/// Writes [`sample_records`] as a CSV file in the ingestion layout
/// (bank at column 2, card number at 3, holder at 4, expiry at 7,
/// billing date at 8, PIN at 9).
///
/// Returns the temp directory (keep it alive) and the file path.
#[must_use]
pub fn sample_csv() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("cards.csv");

    let mut contents = String::from(
        "id,region,bank,card_number,holder,street,city,expiry,billing_date,pin\n",
    );
    for (i, r) in sample_records().iter().enumerate() {
        contents.push_str(&format!(
            "{i},west,{},{},{},Main St,Springfield,{},{},{}\n",
            r.bank,
            r.card_number.as_u64(),
            r.holder,
            r.expiry,
            r.billing_date,
            r.pin.as_i64(),
        ));
    }
    fs::write(&path, contents).expect("write sample csv");
    (dir, path)
}
