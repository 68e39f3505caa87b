//! Minimum-spanning-tree totals over billing-date similarity.
//!
//! Two variants over the same dense |billing-date difference| weights:
//! greedy vertex growth (Prim) and greedy edge selection with a
//! union-find (Kruskal). Both return the total tree weight.

use crate::graph::billing_weights;
use cardex_core::Record;
use tracing::debug;

/// Union-find with path compression and union by rank.
#[derive(Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl DisjointSet {
    /// Creates `n` singleton sets.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Finds the representative of `x`, compressing the path.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cursor = x;
        while self.parent[cursor] != root {
            let next = self.parent[cursor];
            self.parent[cursor] = root;
            cursor = next;
        }
        root
    }

    /// Merges the sets of `a` and `b`. Returns false if already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        if self.rank[ra] < self.rank[rb] {
            self.parent[ra] = rb;
        } else if self.rank[ra] > self.rank[rb] {
            self.parent[rb] = ra;
        } else {
            self.parent[rb] = ra;
            self.rank[ra] += 1;
        }
        true
    }
}

/// Computes the MST total weight by greedy vertex growth.
#[must_use]
pub fn prim_total(records: &[Record]) -> i64 {
    let n = records.len();
    if n == 0 {
        return 0;
    }
    let weights = billing_weights(records);
    let mut key = vec![i64::MAX; n];
    let mut in_tree = vec![false; n];
    key[0] = 0;
    let mut total = 0;

    for _ in 0..n {
        let u = (0..n)
            .filter(|&i| !in_tree[i] && key[i] < i64::MAX)
            .min_by_key(|&i| key[i]);
        let Some(u) = u else { break };
        in_tree[u] = true;
        total += key[u];

        for v in 0..n {
            if !in_tree[v] && weights[u][v] < key[v] {
                key[v] = weights[u][v];
            }
        }
    }
    debug!(total, "prim finished");
    total
}

/// Computes the MST total weight by edge sorting and union-find.
#[must_use]
pub fn kruskal_total(records: &[Record]) -> i64 {
    let n = records.len();
    if n <= 1 {
        return 0;
    }
    let weights = billing_weights(records);
    let mut edges = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in i + 1..n {
            edges.push((weights[i][j], i, j));
        }
    }
    edges.sort_unstable();

    let mut sets = DisjointSet::new(n);
    let mut total = 0;
    let mut added = 0;
    for (weight, u, v) in edges {
        if sets.union(u, v) {
            total += weight;
            added += 1;
            if added == n - 1 {
                break;
            }
        }
    }
    debug!(total, "kruskal finished");
    total
}
