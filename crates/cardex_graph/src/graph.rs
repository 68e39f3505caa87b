//! Similarity-graph construction over a record subset.
//!
//! The subset arrives as an ordered list of owned records snapshotted
//! from the store; vertex `i` is the record at position `i`. Nothing in
//! this module (or crate) mutates the store.

use crate::error::{GraphError, GraphResult};
use cardex_core::Record;

/// Converts an `MM/YY` expiry period to a month count (`year*12 + month`).
pub fn expiry_to_months(expiry: &str) -> GraphResult<i32> {
    let (month, year) = expiry
        .split_once('/')
        .ok_or_else(|| GraphError::invalid_expiry(expiry))?;
    let month: i32 = month
        .parse()
        .map_err(|_| GraphError::invalid_expiry(expiry))?;
    let year: i32 = year
        .parse()
        .map_err(|_| GraphError::invalid_expiry(expiry))?;
    if !(1..=12).contains(&month) {
        return Err(GraphError::invalid_expiry(expiry));
    }
    Ok(year * 12 + month)
}

/// Builds the ring adjacency used by the traversals: each vertex is
/// linked to its successor and predecessor on the subset ring.
#[must_use]
pub fn ring_adjacency(n: usize) -> Vec<Vec<usize>> {
    let mut adj = vec![Vec::new(); n];
    if n <= 1 {
        return adj;
    }
    for (i, neighbors) in adj.iter_mut().enumerate() {
        let next = (i + 1) % n;
        let prev = (i + n - 1) % n;
        // Successor first; with two vertices the ring collapses to one edge.
        neighbors.push(next);
        if prev != next {
            neighbors.push(prev);
        }
    }
    adj
}

/// Dense |expiry-month difference| weight matrix.
///
/// Fails on the first malformed expiry field in the subset.
pub(crate) fn expiry_weights(records: &[Record]) -> GraphResult<Vec<Vec<i64>>> {
    let months: Vec<i32> = records
        .iter()
        .map(|r| expiry_to_months(&r.expiry))
        .collect::<GraphResult<_>>()?;
    let n = records.len();
    let mut weights = vec![vec![0i64; n]; n];
    for i in 0..n {
        for j in 0..n {
            if i != j {
                weights[i][j] = i64::from((months[i] - months[j]).abs());
            }
        }
    }
    Ok(weights)
}

/// Dense |billing-date difference| weight matrix.
pub(crate) fn billing_weights(records: &[Record]) -> Vec<Vec<i64>> {
    let n = records.len();
    let mut weights = vec![vec![0i64; n]; n];
    for i in 0..n {
        for j in 0..n {
            if i != j {
                weights[i][j] =
                    i64::from((records[i].billing_date - records[j].billing_date).abs());
            }
        }
    }
    weights
}
