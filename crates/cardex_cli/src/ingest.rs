//! CSV ingestion boundary.
//!
//! Rows arrive in a wide export layout; only six columns matter here:
//! bank (2), card number (3), holder (4), expiry (7), billing date (8)
//! and PIN (9). The header line is skipped. A malformed row is logged
//! and skipped; only an unreadable file aborts the load.

use cardex_core::{CardNumber, CardStore, Pin, Record, StoreConfig};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

const COL_BANK: usize = 2;
const COL_CARD: usize = 3;
const COL_HOLDER: usize = 4;
const COL_EXPIRY: usize = 7;
const COL_BILLING: usize = 8;
const COL_PIN: usize = 9;

/// Errors from the ingestion boundary.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The CSV file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// Path that failed to open.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A row could not be parsed into a record.
    #[error("row {line}: {message}")]
    MalformedRow {
        /// 1-based line number in the file.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// The store rejected its configuration.
    #[error(transparent)]
    Store(#[from] cardex_core::StoreError),
}

impl IngestError {
    fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedRow {
            line,
            message: message.into(),
        }
    }
}

/// Parses one CSV data row into a record.
pub fn parse_row(line: &str, line_no: usize) -> Result<Record, IngestError> {
    let fields: Vec<&str> = line.split(',').collect();
    let field = |idx: usize, name: &str| {
        fields
            .get(idx)
            .map(|f| f.trim())
            .ok_or_else(|| IngestError::malformed(line_no, format!("missing {name} column")))
    };

    let bank = field(COL_BANK, "bank")?;
    let card: u64 = field(COL_CARD, "card number")?
        .parse()
        .map_err(|_| IngestError::malformed(line_no, "card number is not a number"))?;
    let holder = field(COL_HOLDER, "holder")?;
    let expiry = field(COL_EXPIRY, "expiry")?;
    let billing: i32 = field(COL_BILLING, "billing date")?
        .parse()
        .map_err(|_| IngestError::malformed(line_no, "billing date is not a number"))?;
    let pin: i64 = field(COL_PIN, "pin")?
        .parse()
        .map_err(|_| IngestError::malformed(line_no, "pin is not a number"))?;

    Ok(Record::new(
        holder,
        bank,
        CardNumber::new(card),
        expiry,
        billing,
        Pin::new(pin),
    ))
}

/// Loads a CSV file into a freshly built store.
///
/// Malformed rows are logged and skipped. All indices are built once
/// after the load.
///
/// # Errors
///
/// Fails only when the file cannot be read or the store configuration
/// is invalid.
pub fn load_csv(path: &Path, config: StoreConfig) -> Result<CardStore, IngestError> {
    let contents = fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    // Line 1 is the header.
    for (i, line) in contents.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        match parse_row(line, i + 1) {
            Ok(record) => records.push(record),
            Err(err) => {
                skipped += 1;
                warn!(%err, "row skipped");
            }
        }
    }

    let store = CardStore::with_config(config)?;
    let loaded = store.bulk_load(records);
    info!(loaded, skipped, "csv ingestion finished");
    Ok(store)
}
