//! # Congelator Sync
//!
//! Remote document sync engine for the Congelator freezer inventory.
//!
//! This crate provides:
//! - HTTP client abstraction (`reqwest` in production, loopback and mock
//!   clients in tests)
//! - Transport with exponential-backoff retry of transient failures
//! - Sync client: create, check, fetch and replace a remote document
//! - Session configuration with file-backed persistence
//! - Local store: the canonical in-memory document and its state machine
//!
//! ## Architecture
//!
//! The remote service stores one JSON document per household and offers
//! no partial update. Every mutation therefore builds a candidate
//! document from the last known local state and overwrites the remote
//! copy with it:
//! 1. Hydrate: fetch and decode (legacy shapes are upgraded)
//! 2. Mutate: build candidate = local document + change + audit entry
//! 3. Replace: write the whole candidate
//! 4. Adopt the candidate per the mutation's failure policy
//!
//! ## Key Invariants
//!
//! - No mutation is sent before a successful hydrate of the session
//! - A document with unreadable records is never overwritten
//! - A failed add never changes local state
//! - A failed remove stays applied locally and raises the error flag
//! - Every successful mutation adds exactly one audit entry
//! - A missing remote document discards the session
//! - Writes always use the object shape

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod error;
mod http;
mod session;
mod store;
mod transport;

pub use client::SyncClient;
pub use config::{AuthScheme, ClientConfig, RetryConfig, DEFAULT_BASE_URL};
pub use error::{ErrorKind, SyncError, SyncResult};
pub use http::{
    HttpClient, HttpMethod, HttpRequest, HttpResponse, LoopbackClient, LoopbackServer,
    ReqwestClient,
};
pub use session::{
    ConfigStore, FileConfigStore, MemoryConfigStore, SessionConfig, SessionContext, CONFIG_KEY,
};
pub use store::{ErrorFlag, FailurePolicy, LocalStore, StoreState};
pub use transport::{
    is_transient_status, redact_url, MockHttpClient, RecordedCall, Transport,
};
