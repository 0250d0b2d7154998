//! Request and response values.

use crate::error::BlobError;
use percent_encoding::percent_decode_str;
use std::fmt;

/// Request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobMethod {
    /// Read.
    Get,
    /// Create.
    Post,
    /// Overwrite.
    Put,
    /// Not supported by any route.
    Delete,
}

impl fmt::Display for BlobMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BlobMethod::Get => "GET",
            BlobMethod::Post => "POST",
            BlobMethod::Put => "PUT",
            BlobMethod::Delete => "DELETE",
        })
    }
}

/// An incoming request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobRequest {
    /// Method.
    pub method: BlobMethod,
    /// Path as sent, without query string.
    pub path: String,
    /// Decoded query parameters.
    pub query: Vec<(String, String)>,
    /// Headers.
    pub headers: Vec<(String, String)>,
    /// Body text.
    pub body: String,
}

impl BlobRequest {
    /// Creates a request for `path` with no query, headers or body.
    pub fn new(method: BlobMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// Builds a request from an absolute or origin-relative URL.
    pub fn from_url(method: BlobMethod, url: &str) -> Self {
        let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
        let path_and_query = if url.contains("://") {
            without_scheme
                .find('/')
                .map_or("", |i| &without_scheme[i..])
        } else {
            without_scheme
        };
        let (path, query) = path_and_query
            .split_once('?')
            .unwrap_or((path_and_query, ""));

        let query = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                (decode(k), decode(v))
            })
            .collect();

        Self {
            method,
            path: path.to_string(),
            query,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// Adds a query parameter.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Decoded, non-empty path segments.
    pub fn segments(&self) -> Vec<String> {
        self.path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(decode)
            .collect()
    }

    /// First query parameter named `name`.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// First header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The API key from `?apiKey=` or an `Authorization: Bearer` header.
    pub fn api_key(&self) -> Option<&str> {
        self.query_param("apiKey").or_else(|| {
            self.header("authorization")
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(str::trim)
        })
    }
}

fn decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// An outgoing response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobResponse {
    /// Status code.
    pub status: u16,
    /// Body text.
    pub body: String,
}

impl BlobResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl From<BlobError> for BlobResponse {
    fn from(err: BlobError) -> Self {
        let body = serde_json::json!({ "error": err.to_string() }).to_string();
        BlobResponse::new(err.status(), body)
    }
}
