//! Envelope check
//!
//! The input document must carry its records under a top-level `"alerts"`
//! array. Individual record shape is not checked here; that is the filter
//! stage's inline validation.

use serde_json::{Map, Value};

use super::PipelineError;
use crate::alert::Alert;

/// Extract the alert list from a decoded document.
///
/// Fails with [`PipelineError::Format`] when the `"alerts"` key is absent
/// or not an array. Non-object entries become empty records, which fail
/// structural validation downstream and are skipped with a diagnostic.
pub fn load_alerts(doc: Value) -> Result<Vec<Alert>, PipelineError> {
    let Value::Object(mut envelope) = doc else {
        return Err(PipelineError::Format);
    };
    let Some(Value::Array(items)) = envelope.remove("alerts") else {
        return Err(PipelineError::Format);
    };

    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::Object(fields) => Alert::new(fields),
            _ => Alert::new(Map::new()),
        })
        .collect())
}
