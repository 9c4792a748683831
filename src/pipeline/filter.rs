//! Attribute and time-window filtering
//!
//! The filter re-validates every record inline: structurally invalid ones
//! are skipped with a warning and never reach later stages. Output order is
//! input order among the survivors.

use chrono::{DateTime, Utc};

use super::{ParsePolicy, PipelineError};
use crate::alert::Alert;

/// Optional narrowing criteria for a batch.
///
/// Severity matches case-insensitively, service case-sensitively, and the
/// time window is inclusive at both bounds.
#[derive(Debug, Clone, Default)]
pub struct AlertFilter {
    pub severity: Option<String>,
    pub service: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl AlertFilter {
    /// Build a filter from external string arguments, parsing the window
    /// bounds once up front. A bad bound is always an error.
    pub fn from_args(
        severity: Option<&str>,
        service: Option<&str>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Self, PipelineError> {
        Ok(Self {
            severity: severity.map(str::to_string),
            service: service.map(str::to_string),
            start: parse_bound("start", start)?,
            end: parse_bound("end", end)?,
        })
    }

    fn has_window(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }
}

fn parse_bound(
    which: &'static str,
    raw: Option<&str>,
) -> Result<Option<DateTime<Utc>>, PipelineError> {
    raw.map(|input| {
        DateTime::parse_from_rfc3339(input)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|source| PipelineError::Bound {
                which,
                input: input.to_string(),
                source,
            })
    })
    .transpose()
}

/// Apply `filter` to a batch, preserving input order among survivors.
///
/// An empty result is not an error. Unparseable record timestamps are
/// handled per `policy`; they only matter when a time window is active.
pub fn filter_alerts(
    alerts: Vec<Alert>,
    filter: &AlertFilter,
    policy: ParsePolicy,
) -> Result<Vec<Alert>, PipelineError> {
    let mut kept = Vec::new();

    for alert in alerts {
        if !alert.is_valid() {
            tracing::warn!(
                alert_id = %alert.display_id(),
                "skipping structurally invalid alert"
            );
            continue;
        }

        if let Some(want) = &filter.severity {
            let severity = alert.severity().unwrap_or("");
            if !severity.eq_ignore_ascii_case(want) {
                continue;
            }
        }

        if let Some(want) = &filter.service {
            if alert.service() != Some(want.as_str()) {
                continue;
            }
        }

        if filter.has_window() {
            let ts = match alert.parsed_timestamp() {
                Ok(ts) => ts,
                Err(e) => match policy {
                    ParsePolicy::Skip => {
                        tracing::warn!(
                            alert_id = %alert.display_id(),
                            error = %e,
                            "skipping alert with unparseable timestamp"
                        );
                        continue;
                    }
                    ParsePolicy::Abort => return Err(e.into()),
                },
            };
            if filter.start.is_some_and(|start| ts < start) {
                continue;
            }
            if filter.end.is_some_and(|end| ts > end) {
                continue;
            }
        }

        kept.push(alert);
    }

    Ok(kept)
}
