//! # Cardex Graph
//!
//! Graph analyses over card-record subsets.
//!
//! This crate consumes ordered record subsets snapshotted from a
//! [`cardex_core::CardStore`] (typically all records of one bank) and
//! derives a similarity graph over them:
//!
//! - Ring traversal order (breadth-first / depth-first)
//! - Single-source shortest path over expiry-month distances
//! - Minimum-spanning-tree totals over billing-date distances
//!   (greedy vertex growth and edge-sorted union-find)
//!
//! Subset extraction is a pure read on the store side; nothing here
//! participates in index consistency or mutates a record.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod graph;
mod mst;
mod shortest_path;
mod traversal;

pub use error::{GraphError, GraphResult};
pub use graph::{expiry_to_months, ring_adjacency};
pub use mst::{kruskal_total, prim_total, DisjointSet};
pub use shortest_path::dijkstra;
pub use traversal::{bfs, dfs};
