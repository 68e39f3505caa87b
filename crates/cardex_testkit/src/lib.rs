//! # Cardex Testkit
//!
//! Test utilities for Cardex.
//!
//! This crate provides:
//! - Canned records and populated-store fixtures
//! - A sample CSV file in the ingestion column layout
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cardex_testkit::prelude::*;
//!
//! #[test]
//! fn test_with_store() {
//!     let store = populated_store();
//!     // ... test operations
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
