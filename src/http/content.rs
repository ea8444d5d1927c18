//! Content classification of upstream bodies.

use serde_json::value::RawValue;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Detected kind of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Json,
    Text,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Json => "json",
            ContentKind::Text => "text",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ContentKind::Json => JSON_CONTENT_TYPE,
            ContentKind::Text => TEXT_CONTENT_TYPE,
        }
    }
}

/// Upstream body after classification.
///
/// JSON keeps the upstream text verbatim (validated, never re-serialized),
/// so key order and number formatting survive the round trip.
#[derive(Debug)]
pub enum Payload {
    Json(Box<RawValue>),
    Text(String),
}

impl Payload {
    /// Classify a body: JSON when the trimmed text starts with `{` or `[`
    /// and parses, plain text otherwise. A leading byte-order mark is
    /// ignored for detection and dropped from JSON output.
    pub fn classify(text: String) -> Self {
        let trimmed = text.trim_start_matches('\u{feff}').trim();
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            match serde_json::from_str::<Box<RawValue>>(trimmed) {
                Ok(raw) => return Payload::Json(raw),
                Err(e) => {
                    tracing::debug!(error = %e, "Body looks like JSON but does not parse, serving as text");
                }
            }
        }
        Payload::Text(text)
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            Payload::Json(_) => ContentKind::Json,
            Payload::Text(_) => ContentKind::Text,
        }
    }

    /// Length of the body that will be sent, in bytes.
    pub fn len(&self) -> usize {
        match self {
            Payload::Json(raw) => raw.get().len(),
            Payload::Text(text) => text.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Response body text.
    pub fn into_body(self) -> String {
        match self {
            Payload::Json(raw) => raw.get().to_owned(),
            Payload::Text(text) => text,
        }
    }
}
