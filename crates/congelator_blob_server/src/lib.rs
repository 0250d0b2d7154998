//! # Congelator Blob Server
//!
//! In-memory reference implementation of the JSON blob service that
//! Congelator synchronizes with.
//!
//! This crate provides:
//! - CREATE / EXISTS / GET / PUT over whole JSON documents
//! - API-key checks on writes (401 for unknown keys, 403 for foreign documents)
//! - Both creation response shapes seen in the wild (locator object, bare id)
//! - Fault injection for exercising client retry paths
//!
//! The service is transport-agnostic: requests arrive as [`BlobRequest`]
//! values, so it can sit behind a loopback client in tests or behind a
//! real HTTP listener.
//!
//! ## Routes
//!
//! | method | path              | effect                              |
//! |--------|-------------------|-------------------------------------|
//! | POST   | `{base}`          | create, `201` with the new locator  |
//! | GET    | `{base}/{id}`     | read, `404` if unknown              |
//! | PUT    | `{base}/{id}`     | overwrite, `200`                    |

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod config;
mod error;
mod request;
mod service;

pub use config::{CreateResponseStyle, ServerConfig};
pub use error::{BlobError, BlobResult};
pub use request::{BlobMethod, BlobRequest, BlobResponse};
pub use service::{BlobService, ServerStats};
