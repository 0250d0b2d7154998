//! # Congelator Testkit
//!
//! Test utilities for Congelator.
//!
//! This crate provides:
//! - Sample inventories and documents, including the legacy array shape
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```
//! use congelator_testkit::prelude::*;
//! use congelator_model::decode;
//!
//! let doc = decode(LEGACY_SOUP_DOCUMENT).unwrap();
//! assert_eq!(doc.items, vec![legacy_soup_item()]);
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
