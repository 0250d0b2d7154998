//! Document codec.
//!
//! Decoding accepts every shape the remote document has had over time:
//!
//! | input                          | result                              |
//! |--------------------------------|-------------------------------------|
//! | empty / whitespace             | empty document                      |
//! | JSON array (legacy)            | `{ items: <array>, logs: [] }`      |
//! | object with an `items` array   | `{ items, logs: logs or [] }`       |
//! | any other valid JSON           | empty document, or an error under   |
//! |                                | [`UnknownShapePolicy::Reject`]      |
//! | invalid JSON                   | [`CodecError::MalformedJson`]       |
//!
//! Records that do not match the item or log schema are skipped and
//! reported in [`Decoded::skipped`] (or rejected under
//! [`InvalidRecordPolicy::Reject`]). A caller that writes the whole
//! document back must check [`Decoded::is_lossless`] first, otherwise the
//! skipped records are deleted remotely.
//!
//! Encoding always produces the object shape; the legacy array is never
//! written back.

use crate::document::Document;
use crate::error::{CodecError, CodecResult};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Top-level shape of a raw document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentShape {
    /// Empty or whitespace-only body (a freshly created document).
    Blank,
    /// Bare array of items, written before the audit log existed.
    Legacy,
    /// `{ items, logs }` object.
    Canonical,
    /// Valid JSON of any other shape.
    Unrecognized,
}

/// What to do with parseable JSON of an unrecognized shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownShapePolicy {
    /// Treat it as an empty document.
    #[default]
    Empty,
    /// Report [`CodecError::UnrecognizedShape`].
    Reject,
}

/// What to do with an item or log record that does not match its schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidRecordPolicy {
    /// Leave it out and list it in [`Decoded::skipped`].
    #[default]
    Skip,
    /// Fail with [`CodecError::InvalidRecord`].
    Reject,
}

/// Options for [`decode_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    /// Policy for unrecognized shapes.
    pub unknown_shape: UnknownShapePolicy,
    /// Policy for records that do not match the schema.
    pub invalid_records: InvalidRecordPolicy,
}

impl DecodeOptions {
    /// Options that reject unrecognized shapes and invalid records.
    pub fn strict() -> Self {
        Self {
            unknown_shape: UnknownShapePolicy::Reject,
            invalid_records: InvalidRecordPolicy::Reject,
        }
    }
}

/// Result of [`decode_detailed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// The usable part of the document.
    pub document: Document,
    /// Top-level shape of the input.
    pub shape: DocumentShape,
    /// One [`CodecError::InvalidRecord`] per record left out.
    pub skipped: Vec<CodecError>,
}

impl Decoded {
    /// Returns true if every record of the input made it into the document.
    pub fn is_lossless(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Reports the top-level shape of `raw` without decoding records.
pub fn inspect_shape(raw: &str) -> CodecResult<DocumentShape> {
    if raw.trim().is_empty() {
        return Ok(DocumentShape::Blank);
    }
    let value = parse_json(raw)?;
    Ok(classify(&value))
}

/// Decodes a raw document with the default options.
pub fn decode(raw: &str) -> CodecResult<Document> {
    decode_with(raw, DecodeOptions::default())
}

/// Decodes a raw document, upgrading legacy shapes.
pub fn decode_with(raw: &str, options: DecodeOptions) -> CodecResult<Document> {
    decode_detailed(raw, options).map(|decoded| decoded.document)
}

/// Decodes a raw document and reports its shape and any skipped records.
pub fn decode_detailed(raw: &str, options: DecodeOptions) -> CodecResult<Decoded> {
    if raw.trim().is_empty() {
        return Ok(Decoded {
            document: Document::empty(),
            shape: DocumentShape::Blank,
            skipped: Vec::new(),
        });
    }

    let value = parse_json(raw)?;
    let shape = classify(&value);
    let mut records = RecordParser {
        policy: options.invalid_records,
        skipped: Vec::new(),
    };

    let document = match value {
        Value::Array(items) => Document::from_items(records.parse("items", items)?),
        Value::Object(map) if shape == DocumentShape::Canonical => {
            records.decode_object(map)?
        }
        other => match options.unknown_shape {
            UnknownShapePolicy::Empty => Document::empty(),
            UnknownShapePolicy::Reject => {
                return Err(CodecError::UnrecognizedShape {
                    found: json_type(&other),
                })
            }
        },
    };

    Ok(Decoded {
        document,
        shape,
        skipped: records.skipped,
    })
}

/// Encodes a document in the canonical object shape.
pub fn encode(document: &Document) -> CodecResult<String> {
    serde_json::to_string(document).map_err(|e| CodecError::encoding_failed(e.to_string()))
}

fn parse_json(raw: &str) -> CodecResult<Value> {
    serde_json::from_str(raw).map_err(|e| CodecError::malformed(e.to_string()))
}

fn classify(value: &Value) -> DocumentShape {
    match value {
        Value::Array(_) => DocumentShape::Legacy,
        Value::Object(map) if has_item_array(map) => DocumentShape::Canonical,
        _ => DocumentShape::Unrecognized,
    }
}

fn has_item_array(map: &Map<String, Value>) -> bool {
    matches!(map.get("items"), Some(Value::Array(_)))
}

struct RecordParser {
    policy: InvalidRecordPolicy,
    skipped: Vec<CodecError>,
}

impl RecordParser {
    fn decode_object(&mut self, mut map: Map<String, Value>) -> CodecResult<Document> {
        let items = match map.remove("items") {
            Some(Value::Array(items)) => self.parse("items", items)?,
            _ => Vec::new(),
        };

        let logs = match map.remove("logs") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(logs)) => self.parse("logs", logs)?,
            Some(other) => {
                self.reject(CodecError::invalid_record(
                    "logs",
                    format!("expected an array, found {}", json_type(&other)),
                ))?;
                Vec::new()
            }
        };

        Ok(Document { items, logs })
    }

    fn parse<T: DeserializeOwned>(
        &mut self,
        field: &'static str,
        values: Vec<Value>,
    ) -> CodecResult<Vec<T>> {
        let mut records = Vec::with_capacity(values.len());
        for (index, value) in values.into_iter().enumerate() {
            match serde_json::from_value(value) {
                Ok(record) => records.push(record),
                Err(e) => {
                    self.reject(CodecError::invalid_record(field, format!("#{index}: {e}")))?
                }
            }
        }
        Ok(records)
    }

    fn reject(&mut self, err: CodecError) -> CodecResult<()> {
        match self.policy {
            InvalidRecordPolicy::Skip => {
                self.skipped.push(err);
                Ok(())
            }
            InvalidRecordPolicy::Reject => Err(err),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
