//! Priority scoring
//!
//! `score = severity_weight × (1 + deviation) × component_factor`, where
//! deviation is the fractional overage above threshold floored at zero and
//! component_factor scales linearly with the size of the alert's component
//! group.

use crate::alert::{Alert, Severity};

/// Per-alert scoring rejection. Aborts only this alert's scoring; callers
/// report it and continue with the rest of the batch.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScoreError {
    #[error("alert {id}: unknown severity {severity:?}")]
    UnknownSeverity { id: String, severity: String },

    #[error("alert {id}: value is not numeric")]
    NonNumericValue { id: String },

    #[error("alert {id}: threshold is not numeric")]
    NonNumericThreshold { id: String },

    #[error("alert {id}: threshold is zero")]
    ZeroThreshold { id: String },
}

/// Compute the priority score for one alert.
///
/// `component_count` is the size of the alert's component group, supplied
/// by the caller after grouping; a solitary alert has factor 1.0.
///
/// The result is rounded to two decimals with ties going away from zero
/// (the `f64::round` convention), e.g. 10.125 rounds to 10.13. This is a
/// deliberate, tested contract; see `score_rounds_half_away_from_zero`.
pub fn priority_score(alert: &Alert, component_count: usize) -> Result<f64, ScoreError> {
    let id = alert.display_id();

    let raw_severity = alert.severity().unwrap_or("");
    let severity =
        Severity::parse(raw_severity).ok_or_else(|| ScoreError::UnknownSeverity {
            id: id.to_string(),
            severity: raw_severity.to_string(),
        })?;

    let value = alert.value().ok_or_else(|| ScoreError::NonNumericValue {
        id: id.to_string(),
    })?;
    let threshold = alert
        .threshold()
        .ok_or_else(|| ScoreError::NonNumericThreshold {
            id: id.to_string(),
        })?;
    if threshold == 0.0 {
        return Err(ScoreError::ZeroThreshold { id: id.to_string() });
    }

    // Only positive overage counts; at or below threshold contributes zero.
    let deviation = ((value - threshold) / threshold).max(0.0);
    let component_factor = 1.0 + component_count.saturating_sub(1) as f64 * 0.1;
    let score = severity.weight() * (1.0 + deviation) * component_factor;

    Ok((score * 100.0).round() / 100.0)
}
