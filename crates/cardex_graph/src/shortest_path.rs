//! Single-source shortest path over expiry similarity.

use crate::error::GraphResult;
use crate::graph::expiry_weights;
use cardex_core::{CardNumber, Record};
use tracing::debug;

/// Computes the cheapest total expiry-month distance between two cards
/// of the subset.
///
/// The subset forms a dense graph weighted by |expiry-month difference|.
/// Pairs with identical expiry (weight 0) carry no edge. Returns
/// `Ok(None)` when either endpoint is not in the subset or no path
/// exists.
///
/// # Errors
///
/// Fails on a malformed expiry field anywhere in the subset.
pub fn dijkstra(
    records: &[Record],
    src: CardNumber,
    dest: CardNumber,
) -> GraphResult<Option<i64>> {
    let n = records.len();
    let src_idx = records.iter().position(|r| r.card_number == src);
    let dest_idx = records.iter().position(|r| r.card_number == dest);
    let (Some(src_idx), Some(dest_idx)) = (src_idx, dest_idx) else {
        return Ok(None);
    };

    let weights = expiry_weights(records)?;
    let mut dist = vec![i64::MAX; n];
    let mut visited = vec![false; n];
    dist[src_idx] = 0;

    for _ in 0..n {
        // Greedy selection of the closest unvisited vertex.
        let u = (0..n)
            .filter(|&i| !visited[i] && dist[i] < i64::MAX)
            .min_by_key(|&i| dist[i]);
        let Some(u) = u else { break };
        visited[u] = true;

        for v in 0..n {
            // Zero-weight pairs are unconnected.
            if !visited[v] && weights[u][v] != 0 {
                let candidate = dist[u] + weights[u][v];
                if candidate < dist[v] {
                    dist[v] = candidate;
                }
            }
        }
    }

    let total = (dist[dest_idx] < i64::MAX).then_some(dist[dest_idx]);
    debug!(?total, "dijkstra finished");
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardex_testkit::fixtures::record;

    #[test]
    fn direct_edge_distance() {
        let records = vec![
            record("a", "b", 1, "01/27", 1, 1),
            record("c", "b", 2, "04/27", 2, 2),
        ];
        let total = dijkstra(&records, CardNumber::new(1), CardNumber::new(2)).unwrap();
        assert_eq!(total, Some(3));
    }

    #[test]
    fn triangle_inequality_shortcut() {
        // 1 -> 3 directly costs 10 months; through 2 it costs 5 + 5.
        // The dense graph offers both; the direct edge is not cheaper.
        let records = vec![
            record("a", "b", 1, "01/27", 1, 1),
            record("c", "b", 2, "06/27", 2, 2),
            record("d", "b", 3, "11/27", 3, 3),
        ];
        let total = dijkstra(&records, CardNumber::new(1), CardNumber::new(3)).unwrap();
        assert_eq!(total, Some(10));
    }

    #[test]
    fn source_equals_destination() {
        let records = vec![record("a", "b", 1, "01/27", 1, 1)];
        let total = dijkstra(&records, CardNumber::new(1), CardNumber::new(1)).unwrap();
        assert_eq!(total, Some(0));
    }

    #[test]
    fn unknown_endpoints_yield_none() {
        let records = vec![record("a", "b", 1, "01/27", 1, 1)];
        assert_eq!(
            dijkstra(&records, CardNumber::new(1), CardNumber::new(9)).unwrap(),
            None
        );
        assert_eq!(
            dijkstra(&records, CardNumber::new(9), CardNumber::new(1)).unwrap(),
            None
        );
    }

    #[test]
    fn identical_expiries_are_unconnected() {
        let records = vec![
            record("a", "b", 1, "01/27", 1, 1),
            record("c", "b", 2, "01/27", 2, 2),
        ];
        let total = dijkstra(&records, CardNumber::new(1), CardNumber::new(2)).unwrap();
        assert_eq!(total, None);
    }

    #[test]
    fn malformed_expiry_is_an_error() {
        let records = vec![
            record("a", "b", 1, "01/27", 1, 1),
            record("c", "b", 2, "bogus", 2, 2),
        ];
        assert!(dijkstra(&records, CardNumber::new(1), CardNumber::new(2)).is_err());
    }
}
