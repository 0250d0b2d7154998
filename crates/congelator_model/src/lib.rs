//! # Congelator Model
//!
//! Data model and document codec for the Congelator freezer inventory.
//!
//! This crate provides:
//! - `Item`, `Category`, `Location` and the freshness horizon
//! - `AuditLogEntry` for the mutation history
//! - `Document`, the whole remote-persisted state
//! - The document codec, including migration of the legacy array shape
//! - Parsing of the creation endpoint's response
//! - Export formats (JSON item backup, plain-text history)
//! - The starter inventory offered to a new document
//!
//! This is a pure crate with no I/O operations.
//!
//! ## Usage
//!
//! ```
//! use congelator_model::{decode, encode, Document};
//!
//! let legacy = r#"[{"id":"1","name":"Soup","category":"Plat","location":"Freezer","dateAdded":"2024-01-01T00:00:00Z"}]"#;
//! let doc = decode(legacy).unwrap();
//! assert_eq!(doc.items.len(), 1);
//! assert!(doc.logs.is_empty());
//!
//! // Always written back in the object shape.
//! assert!(encode(&doc).unwrap().starts_with("{\"items\""));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod audit;
mod codec;
mod create;
mod document;
mod error;
pub mod export;
mod item;
mod starter;

pub use audit::{AuditAction, AuditLogEntry};
pub use codec::{
    decode, decode_detailed, decode_with, encode, inspect_shape, DecodeOptions, Decoded,
    DocumentShape, InvalidRecordPolicy, UnknownShapePolicy,
};
pub use create::CreateResponse;
pub use document::Document;
pub use error::{CodecError, CodecResult};
pub use item::{
    Category, CategoryFilter, Item, ItemId, Location, UnknownVariant, FRESHNESS_HORIZON_DAYS,
};
pub use starter::starter_items;
