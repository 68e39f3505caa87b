//! Store configuration.

/// Default slot/bucket count for both hash tables.
pub const DEFAULT_HASH_CAPACITY: usize = 1000;

/// Configuration for constructing a [`crate::CardStore`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Fixed capacity of the open-addressing table and the chain table.
    ///
    /// The tables are never resized; an open-addressing insert into a
    /// full table is reported and skipped rather than grown.
    pub hash_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            hash_capacity: DEFAULT_HASH_CAPACITY,
        }
    }
}

impl StoreConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fixed hash-table capacity.
    #[must_use]
    pub const fn hash_capacity(mut self, capacity: usize) -> Self {
        self.hash_capacity = capacity;
        self
    }
}
