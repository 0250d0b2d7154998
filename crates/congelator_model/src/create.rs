//! Parsing of the creation endpoint's response.

use crate::error::{CodecError, CodecResult};
use serde::Deserialize;

/// Response body returned when a new remote document is created.
///
/// Backends disagree on the shape; each supported shape is a variant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CreateResponse {
    /// A bare identifier or locator string.
    Identifier(String),
    /// An object carrying a locator URI.
    Locator {
        /// Locator of the new document; its last path segment is the id.
        uri: String,
    },
}

impl CreateResponse {
    /// Parses a response body.
    ///
    /// Bodies that are not JSON are taken as a bare identifier.
    pub fn parse(body: &str) -> CodecResult<Self> {
        let body = body.trim();
        if body.is_empty() {
            return Err(CodecError::unexpected_create_response("empty body"));
        }

        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => serde_json::from_value(value).map_err(|_| {
                CodecError::unexpected_create_response(format!(
                    "expected a string or an object with `uri`, got {body}"
                ))
            }),
            Err(_) => Ok(CreateResponse::Identifier(body.to_string())),
        }
    }

    /// Returns the raw locator string.
    pub fn locator(&self) -> &str {
        match self {
            CreateResponse::Identifier(s) => s,
            CreateResponse::Locator { uri } => uri,
        }
    }

    /// Extracts the document id: the trailing path segment of the locator.
    pub fn document_id(&self) -> CodecResult<String> {
        let locator = self.locator().trim_end_matches('/');
        let id = locator.rsplit('/').next().unwrap_or(locator).trim();
        if id.is_empty() {
            return Err(CodecError::unexpected_create_response(format!(
                "no document id in {:?}",
                self.locator()
            )));
        }
        Ok(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locator_object() {
        let resp =
            CreateResponse::parse(r#"{"uri":"https://api.jsonstorage.net/v1/json/abc/def-123"}"#)
                .unwrap();
        assert!(matches!(resp, CreateResponse::Locator { .. }));
        assert_eq!(resp.document_id().unwrap(), "def-123");
    }

    #[test]
    fn quoted_identifier() {
        let resp = CreateResponse::parse(r#""doc-42""#).unwrap();
        assert_eq!(resp, CreateResponse::Identifier("doc-42".into()));
        assert_eq!(resp.document_id().unwrap(), "doc-42");
    }

    #[test]
    fn raw_text_identifier() {
        let resp = CreateResponse::parse("https://host/v1/json/xyz\n").unwrap();
        assert_eq!(resp.document_id().unwrap(), "xyz");
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let resp = CreateResponse::Locator {
            uri: "https://host/json/abc/".into(),
        };
        assert_eq!(resp.document_id().unwrap(), "abc");
    }

    #[test]
    fn unexpected_shapes() {
        assert!(CreateResponse::parse("").is_err());
        assert!(CreateResponse::parse("42").is_err());
        assert!(CreateResponse::parse(r#"{"id":"x"}"#).is_err());
        assert!(CreateResponse::Identifier("/".into()).document_id().is_err());
    }
}
