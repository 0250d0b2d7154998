//! The blob service.

use crate::config::{CreateResponseStyle, ServerConfig};
use crate::error::{BlobError, BlobResult};
use crate::request::{BlobMethod, BlobRequest, BlobResponse};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use tracing::{debug, warn};
use uuid::Uuid;

/// Request counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServerStats {
    /// Every request received.
    pub requests: u64,
    /// Successful creations.
    pub creates: u64,
    /// Successful reads.
    pub reads: u64,
    /// Successful overwrites.
    pub writes: u64,
    /// Requests answered with an error (injected faults excluded).
    pub rejected: u64,
    /// Requests answered with an injected fault.
    pub faults: u64,
}

#[derive(Debug)]
struct StoredDocument {
    owner: String,
    body: String,
}

#[derive(Debug, Default)]
struct Inner {
    documents: HashMap<String, StoredDocument>,
    faults: VecDeque<u16>,
    stats: ServerStats,
}

/// In-memory JSON blob service.
///
/// # Example
///
/// ```
/// use congelator_blob_server::{BlobMethod, BlobRequest, BlobService, ServerConfig};
///
/// let service = BlobService::new(ServerConfig::default().with_api_key("k"));
/// let id = service.insert_document("k", "[]");
///
/// let response = service.handle(&BlobRequest::new(BlobMethod::Get, format!("/v1/json/{id}")));
/// assert_eq!(response.status, 200);
/// assert_eq!(response.body, "[]");
/// ```
#[derive(Debug)]
pub struct BlobService {
    config: ServerConfig,
    inner: Mutex<Inner>,
}

impl BlobService {
    /// Creates an empty service.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Handles one request.
    pub fn handle(&self, request: &BlobRequest) -> BlobResponse {
        let mut inner = self.inner.lock();
        inner.stats.requests += 1;

        if let Some(status) = inner.faults.pop_front() {
            inner.stats.faults += 1;
            warn!(method = %request.method, path = %request.path, status, "injecting fault");
            return BlobError::InjectedFault(status).into();
        }

        match self.route(&mut inner, request) {
            Ok(response) => response,
            Err(err) => {
                inner.stats.rejected += 1;
                debug!(method = %request.method, path = %request.path, error = %err, "request rejected");
                err.into()
            }
        }
    }

    /// Answers the next `count` requests with `status`.
    pub fn fail_next(&self, count: usize, status: u16) {
        let mut inner = self.inner.lock();
        inner.faults.extend(std::iter::repeat_n(status, count));
    }

    /// Stores a raw document owned by `owner` and returns its id.
    ///
    /// The body is stored verbatim, so legacy or blank documents can be
    /// seeded.
    pub fn insert_document(&self, owner: &str, body: impl Into<String>) -> String {
        let id = Uuid::new_v4().to_string();
        self.insert_document_with_id(&id, owner, body);
        id
    }

    /// Stores a raw document under a chosen id, replacing any existing one.
    pub fn insert_document_with_id(&self, id: &str, owner: &str, body: impl Into<String>) {
        self.inner.lock().documents.insert(
            id.to_string(),
            StoredDocument {
                owner: owner.to_string(),
                body: body.into(),
            },
        );
    }

    /// Returns the stored body of a document.
    pub fn document(&self, id: &str) -> Option<String> {
        self.inner.lock().documents.get(id).map(|d| d.body.clone())
    }

    /// Deletes a document. Returns true if it existed.
    pub fn delete_document(&self, id: &str) -> bool {
        self.inner.lock().documents.remove(id).is_some()
    }

    /// Number of stored documents.
    pub fn document_count(&self) -> usize {
        self.inner.lock().documents.len()
    }

    /// Returns the request counters.
    pub fn stats(&self) -> ServerStats {
        self.inner.lock().stats
    }

    fn route(&self, inner: &mut Inner, request: &BlobRequest) -> BlobResult<BlobResponse> {
        let base: Vec<&str> = self
            .config
            .base_path()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        let segments = request.segments();

        let under_base = segments.len() >= base.len()
            && segments.iter().zip(&base).all(|(s, b)| s == b);
        if !under_base {
            return Err(BlobError::NotFound(request.path.clone()));
        }

        match (request.method, &segments[base.len()..]) {
            (BlobMethod::Post, []) => self.create(inner, request),
            (BlobMethod::Get, [id]) => self.read(inner, request, id),
            (BlobMethod::Put, [id]) => self.write(inner, request, id),
            (method, []) | (method, [_]) => Err(BlobError::MethodNotAllowed(method.to_string())),
            _ => Err(BlobError::NotFound(request.path.clone())),
        }
    }

    fn create(&self, inner: &mut Inner, request: &BlobRequest) -> BlobResult<BlobResponse> {
        let key = self.authorize(request)?;
        validate_json(&request.body)?;

        let id = Uuid::new_v4().to_string();
        inner.documents.insert(
            id.clone(),
            StoredDocument {
                owner: key.to_string(),
                body: request.body.clone(),
            },
        );
        inner.stats.creates += 1;
        debug!(document_id = %id, "document created");

        let body = match self.config.create_style {
            CreateResponseStyle::Locator => self.locator_body(&id),
            CreateResponseStyle::BareId => serde_json::Value::String(id).to_string(),
        };
        Ok(BlobResponse::new(201, body))
    }

    fn read(&self, inner: &mut Inner, request: &BlobRequest, id: &str) -> BlobResult<BlobResponse> {
        if self.config.require_key_for_read {
            self.authorize(request)?;
        }
        let body = inner
            .documents
            .get(id)
            .map(|d| d.body.clone())
            .ok_or_else(|| BlobError::NotFound(id.to_string()))?;
        inner.stats.reads += 1;
        Ok(BlobResponse::new(200, body))
    }

    fn write(&self, inner: &mut Inner, request: &BlobRequest, id: &str) -> BlobResult<BlobResponse> {
        let key = self.authorize(request)?;
        let document = inner
            .documents
            .get_mut(id)
            .ok_or_else(|| BlobError::NotFound(id.to_string()))?;
        if document.owner != key {
            return Err(BlobError::Forbidden(format!("document {id} belongs to another key")));
        }
        validate_json(&request.body)?;

        document.body = request.body.clone();
        inner.stats.writes += 1;
        Ok(BlobResponse::new(200, self.locator_body(id)))
    }

    fn authorize<'r>(&self, request: &'r BlobRequest) -> BlobResult<&'r str> {
        let key = request
            .api_key()
            .ok_or_else(|| BlobError::Unauthorized("missing api key".into()))?;
        if !self.config.accepts_key(key) {
            return Err(BlobError::Unauthorized("unknown api key".into()));
        }
        Ok(key)
    }

    fn locator_body(&self, id: &str) -> String {
        serde_json::json!({ "uri": format!("{}/{}", self.config.base_uri, id) }).to_string()
    }
}

/// Blank bodies are allowed; anything else must be JSON.
fn validate_json(body: &str) -> BlobResult<()> {
    if body.trim().is_empty() {
        return Ok(());
    }
    serde_json::from_str::<serde_json::Value>(body)
        .map(|_| ())
        .map_err(|e| BlobError::InvalidRequest(format!("body is not JSON: {e}")))
}
