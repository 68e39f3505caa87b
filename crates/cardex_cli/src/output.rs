//! Console rendering of records, tables and statistics.

use cardex_core::index::ChainStats;
use cardex_core::{Record, StatsSnapshot};
use clap::ValueEnum;
use serde_json::json;

/// Output format for structured results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text, one record per line.
    Text,
    /// A JSON document.
    Json,
}

fn record_json(record: &Record) -> serde_json::Value {
    json!({
        "holder": record.holder,
        "bank": record.bank,
        "card_number": record.card_number.as_u64(),
        "expiry": record.expiry,
        "billing_date": record.billing_date,
        "pin": record.pin.as_i64(),
    })
}

/// Renders one record on a single line.
#[must_use]
pub fn record_line(record: &Record) -> String {
    format!(
        "{} | {} | card {} | expires {} | billing day {} | pin {}",
        record.holder,
        record.bank,
        record.card_number.as_u64(),
        record.expiry,
        record.billing_date,
        record.pin.as_i64(),
    )
}

/// Renders a record listing.
#[must_use]
pub fn render_records(records: &[Record], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if records.is_empty() {
                "no records".to_string()
            } else {
                records
                    .iter()
                    .map(record_line)
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        OutputFormat::Json => {
            let values: Vec<_> = records.iter().map(record_json).collect();
            json!(values).to_string()
        }
    }
}

/// Renders chain-table occupancy statistics.
#[must_use]
pub fn render_chain_stats(stats: &ChainStats, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!(
            "entries: {}\nnon-empty buckets: {}\nlongest chain: {}\nload factor: {:.3}",
            stats.entries, stats.non_empty_buckets, stats.longest_chain, stats.load_factor,
        ),
        OutputFormat::Json => json!({
            "entries": stats.entries,
            "non_empty_buckets": stats.non_empty_buckets,
            "longest_chain": stats.longest_chain,
            "load_factor": stats.load_factor,
        })
        .to_string(),
    }
}

/// Renders the store's operation counters.
#[must_use]
pub fn render_stats(snapshot: &StatsSnapshot, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!(
            "appends: {}\ndeletes: {}\nundos: {}\nreorders: {}\nlookups: {}\n\
             hash rebuilds: {}\ntree rebuilds: {}\npriority snapshots: {}\nextractions: {}",
            snapshot.appends,
            snapshot.deletes,
            snapshot.undos,
            snapshot.reorders,
            snapshot.lookups,
            snapshot.hash_rebuilds,
            snapshot.tree_rebuilds,
            snapshot.heap_rebuilds,
            snapshot.extractions,
        ),
        OutputFormat::Json => json!({
            "appends": snapshot.appends,
            "deletes": snapshot.deletes,
            "undos": snapshot.undos,
            "reorders": snapshot.reorders,
            "lookups": snapshot.lookups,
            "hash_rebuilds": snapshot.hash_rebuilds,
            "tree_rebuilds": snapshot.tree_rebuilds,
            "heap_rebuilds": snapshot.heap_rebuilds,
            "extractions": snapshot.extractions,
        })
        .to_string(),
    }
}
