//! Index structures over the canonical sequence.
//!
//! Each index stores [`crate::RecordId`] handles, never records. The
//! store keeps them consistent with the canonical sequence:
//!
//! - [`OpenTable`] / [`ChainTable`]: rebuilt eagerly inside every
//!   mutation, so hash lookups are always current.
//! - [`BstIndex`] / [`AvlIndex`]: marked stale by mutations and rebuilt
//!   lazily by the next tree query.
//! - [`MaxHeap`]: an explicit point-in-time snapshot, never auto-rebuilt.

mod avl;
mod bst;
mod chaining;
mod heap;
mod open_addressing;

pub use avl::AvlIndex;
pub use bst::BstIndex;
pub use chaining::{ChainEntry, ChainStats, ChainTable};
pub use heap::MaxHeap;
pub use open_addressing::{OpenSlot, OpenTable};
