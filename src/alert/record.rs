//! The alert record type
//!
//! An [`Alert`] wraps a decoded JSON object. Validation checks key presence
//! only; values stay untyped until a stage actually needs them (timestamp
//! parsing in the filter/dedup stages, numeric extraction at scoring time).
//! Records are never mutated after construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names every alert must carry to be structurally valid.
pub const REQUIRED_KEYS: [&str; 9] = [
    "id",
    "timestamp",
    "service",
    "component",
    "severity",
    "metric",
    "value",
    "threshold",
    "description",
];

/// Placeholder identity for records whose `id` is missing or not a string.
pub const MISSING_ID: &str = "<missing id>";

/// A single monitoring observation record.
///
/// Extra fields beyond [`REQUIRED_KEYS`] are kept and ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Alert {
    fields: Map<String, Value>,
}

impl Alert {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    fn num_field(&self, key: &str) -> Option<f64> {
        match self.fields.get(key) {
            Some(Value::Number(n)) => n.as_f64(),
            _ => None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    /// Identity for diagnostics: the `id` field, or [`MISSING_ID`] when it
    /// is absent or not a string. Total, so reporting on a malformed record
    /// never fails.
    pub fn display_id(&self) -> &str {
        self.id().unwrap_or(MISSING_ID)
    }

    /// Canonical identity key for deduplication: the JSON serialization of
    /// the `id` field. Any JSON value can serve as an id, and distinct
    /// values yield distinct keys (the string `"42"` and the number `42`
    /// stay apart). A missing id and an explicit null share one key.
    pub fn id_key(&self) -> String {
        self.fields
            .get("id")
            .map_or_else(|| Value::Null.to_string(), |v| v.to_string())
    }

    pub fn timestamp_raw(&self) -> Option<&str> {
        self.str_field("timestamp")
    }

    pub fn service(&self) -> Option<&str> {
        self.str_field("service")
    }

    pub fn component(&self) -> Option<&str> {
        self.str_field("component")
    }

    pub fn severity(&self) -> Option<&str> {
        self.str_field("severity")
    }

    pub fn metric(&self) -> Option<&str> {
        self.str_field("metric")
    }

    pub fn description(&self) -> Option<&str> {
        self.str_field("description")
    }

    /// Measured value, if it is a JSON number.
    pub fn value(&self) -> Option<f64> {
        self.num_field("value")
    }

    /// Alerting threshold, if it is a JSON number.
    pub fn threshold(&self) -> Option<f64> {
        self.num_field("threshold")
    }

    /// True iff every one of [`REQUIRED_KEYS`] is present as a key.
    /// Values are not type-checked here.
    pub fn is_valid(&self) -> bool {
        REQUIRED_KEYS.iter().all(|key| self.fields.contains_key(*key))
    }

    /// Parse the `timestamp` field as RFC 3339 into a UTC instant.
    ///
    /// Offset-less timestamps fail to parse, so every instant in a batch is
    /// timezone-aware and comparisons are consistent.
    pub fn parsed_timestamp(&self) -> Result<DateTime<Utc>, TimestampError> {
        let raw = self
            .timestamp_raw()
            .ok_or_else(|| TimestampError::NotAString {
                id: self.display_id().to_string(),
            })?;
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|source| TimestampError::Unparseable {
                id: self.display_id().to_string(),
                input: raw.to_string(),
                source,
            })
    }
}

/// Record-level timestamp failure, carrying the offending alert's identity.
#[derive(Debug, thiserror::Error)]
pub enum TimestampError {
    #[error("alert {id}: timestamp is missing or not a string")]
    NotAString { id: String },

    #[error("alert {id}: unparseable timestamp {input:?}: {source}")]
    Unparseable {
        id: String,
        input: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Test helper: build an alert from a `serde_json::json!` object literal.
#[cfg(test)]
pub(crate) fn alert_from_json(value: Value) -> Alert {
    match value {
        Value::Object(map) => Alert::new(map),
        _ => panic!("test alert must be a JSON object"),
    }
}
