//! Full pipeline runs and report building
//!
//! [`process_document`] composes the stages over one decoded document and
//! produces a [`Report`]: scored alerts per component group, plus the
//! scoring failures that were set aside along the way. A failure in one
//! alert's scoring never suppresses output for the others.

use serde::Serialize;
use serde_json::Value;

use crate::pipeline::{
    dedupe_alerts, filter_alerts, group_by_component, load_alerts, priority_score, AlertFilter,
    ParsePolicy, PipelineError,
};

/// Result of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub groups: Vec<GroupReport>,
    pub score_failures: Vec<ScoreFailure>,
}

/// One component group with its scored alerts.
#[derive(Debug, Clone, Serialize)]
pub struct GroupReport {
    pub component: String,
    pub alerts: Vec<ScoredAlert>,
}

/// An alert that made it through the pipeline, with its priority attached.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredAlert {
    pub id: String,
    pub severity: String,
    pub timestamp: String,
    pub description: String,
    pub priority: f64,
}

/// An alert that survived filtering and dedup but could not be scored.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreFailure {
    pub id: String,
    pub reason: String,
}

/// Run the whole pipeline over a decoded document.
///
/// `component_count` for scoring is the size of each alert's component
/// group. Unscoreable alerts land in [`Report::score_failures`] and are
/// logged; the rest of the batch is unaffected.
pub fn process_document(
    doc: Value,
    filter: &AlertFilter,
    policy: ParsePolicy,
) -> Result<Report, PipelineError> {
    let alerts = load_alerts(doc)?;
    let filtered = filter_alerts(alerts, filter, policy)?;
    let deduped = dedupe_alerts(filtered, policy)?;
    let groups = group_by_component(deduped);

    let mut report = Report {
        groups: Vec::with_capacity(groups.len()),
        score_failures: Vec::new(),
    };

    for group in groups {
        let component_count = group.alerts.len();
        let mut scored = Vec::with_capacity(component_count);

        for alert in &group.alerts {
            match priority_score(alert, component_count) {
                Ok(priority) => scored.push(ScoredAlert {
                    id: alert.display_id().to_string(),
                    severity: alert.severity().unwrap_or("").to_string(),
                    timestamp: alert.timestamp_raw().unwrap_or("").to_string(),
                    description: alert.description().unwrap_or("").to_string(),
                    priority,
                }),
                Err(e) => {
                    tracing::warn!(
                        alert_id = %alert.display_id(),
                        error = %e,
                        "alert could not be scored"
                    );
                    report.score_failures.push(ScoreFailure {
                        id: alert.display_id().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        report.groups.push(GroupReport {
            component: group.component,
            alerts: scored,
        });
    }

    Ok(report)
}

/// Priority as printed: always at least one decimal place, so a whole
/// number renders as `11.0`, not `11`.
fn format_priority(priority: f64) -> String {
    if priority.fract() == 0.0 {
        format!("{:.1}", priority)
    } else {
        format!("{}", priority)
    }
}

impl Report {
    /// Render the report as the CLI's text output.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        for group in &self.groups {
            out.push_str(&format!("\nComponent: {}\n", group.component));
            for alert in &group.alerts {
                out.push_str(&format!(
                    "  - {} | {} | {} | {} | priority: {}\n",
                    alert.id,
                    alert.severity,
                    alert.timestamp,
                    alert.description,
                    format_priority(alert.priority)
                ));
            }
        }

        if !self.score_failures.is_empty() {
            out.push_str("\nUnscored alerts:\n");
            for failure in &self.score_failures {
                out.push_str(&format!("  - {}\n", failure.reason));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn no_filter() -> AlertFilter {
        AlertFilter::default()
    }

    #[test]
    fn end_to_end_reference_example() {
        let doc = json!({
            "alerts": [{
                "id": "a1",
                "timestamp": "2025-06-06T00:00:00Z",
                "service": "s1",
                "component": "c1",
                "severity": "critical",
                "metric": "cpu",
                "value": 90,
                "threshold": 80,
                "description": "high cpu"
            }]
        });

        let report = process_document(doc, &no_filter(), ParsePolicy::Skip).unwrap();
        assert_eq!(report.groups.len(), 1);
        assert!(report.score_failures.is_empty());

        let group = &report.groups[0];
        assert_eq!(group.component, "c1");
        assert_eq!(group.alerts.len(), 1);
        assert_eq!(group.alerts[0].id, "a1");
        assert_eq!(group.alerts[0].priority, 11.25);
    }

    #[test]
    fn duplicate_ids_keep_only_the_latest() {
        let doc = json!({
            "alerts": [
                {
                    "id": "a1",
                    "timestamp": "2025-06-06T00:00:00Z",
                    "service": "s1",
                    "component": "c1",
                    "severity": "critical",
                    "metric": "cpu",
                    "value": 90,
                    "threshold": 80,
                    "description": "older"
                },
                {
                    "id": "a1",
                    "timestamp": "2025-06-07T00:00:00Z",
                    "service": "s1",
                    "component": "c1",
                    "severity": "critical",
                    "metric": "cpu",
                    "value": 95,
                    "threshold": 80,
                    "description": "newer"
                }
            ]
        });

        let report = process_document(doc, &no_filter(), ParsePolicy::Skip).unwrap();
        let group = &report.groups[0];
        assert_eq!(group.alerts.len(), 1);
        assert_eq!(group.alerts[0].description, "newer");
    }

    #[test]
    fn component_count_is_the_group_size() {
        let doc = json!({
            "alerts": [
                {
                    "id": "a1",
                    "timestamp": "2025-06-06T00:00:00Z",
                    "service": "s1",
                    "component": "db",
                    "severity": "critical",
                    "metric": "cpu",
                    "value": 80,
                    "threshold": 80,
                    "description": "d"
                },
                {
                    "id": "a2",
                    "timestamp": "2025-06-06T01:00:00Z",
                    "service": "s1",
                    "component": "db",
                    "severity": "critical",
                    "metric": "mem",
                    "value": 80,
                    "threshold": 80,
                    "description": "d"
                }
            ]
        });

        let report = process_document(doc, &no_filter(), ParsePolicy::Skip).unwrap();
        let group = &report.groups[0];
        assert_eq!(group.alerts.len(), 2);
        // Zero deviation, two alerts in the group: 10 * 1.0 * 1.1.
        assert_eq!(group.alerts[0].priority, 11.0);
        assert_eq!(group.alerts[1].priority, 11.0);
    }

    #[test]
    fn score_failure_does_not_suppress_other_alerts() {
        let doc = json!({
            "alerts": [
                {
                    "id": "bad",
                    "timestamp": "2025-06-06T00:00:00Z",
                    "service": "s1",
                    "component": "c1",
                    "severity": "critical",
                    "metric": "cpu",
                    "value": 90,
                    "threshold": 0,
                    "description": "zero threshold"
                },
                {
                    "id": "good",
                    "timestamp": "2025-06-06T01:00:00Z",
                    "service": "s1",
                    "component": "c1",
                    "severity": "critical",
                    "metric": "cpu",
                    "value": 90,
                    "threshold": 80,
                    "description": "fine"
                }
            ]
        });

        let report = process_document(doc, &no_filter(), ParsePolicy::Skip).unwrap();
        assert_eq!(report.score_failures.len(), 1);
        assert_eq!(report.score_failures[0].id, "bad");

        let group = &report.groups[0];
        assert_eq!(group.alerts.len(), 1);
        assert_eq!(group.alerts[0].id, "good");
        // The unscoreable alert still counts toward the group size.
        assert_eq!(group.alerts[0].priority, 12.38); // 10 * 1.125 * 1.1
    }

    #[test]
    fn missing_envelope_is_fatal() {
        let err =
            process_document(json!({ "items": [] }), &no_filter(), ParsePolicy::Skip).unwrap_err();
        assert!(matches!(err, PipelineError::Format));
    }

    #[test]
    fn render_text_lists_groups_and_alerts() {
        let doc = json!({
            "alerts": [{
                "id": "a1",
                "timestamp": "2025-06-06T00:00:00Z",
                "service": "s1",
                "component": "c1",
                "severity": "critical",
                "metric": "cpu",
                "value": 90,
                "threshold": 80,
                "description": "high cpu"
            }]
        });
        let report = process_document(doc, &no_filter(), ParsePolicy::Skip).unwrap();
        let text = report.render_text();
        assert!(text.contains("Component: c1"));
        assert!(text.contains("- a1 | critical | 2025-06-06T00:00:00Z | high cpu | priority: 11.25"));
    }

    #[test]
    fn render_text_keeps_a_decimal_on_whole_number_priorities() {
        let doc = json!({
            "alerts": [{
                "id": "a1",
                "timestamp": "2025-06-06T00:00:00Z",
                "service": "s1",
                "component": "c1",
                "severity": "critical",
                "metric": "cpu",
                "value": 80,
                "threshold": 80,
                "description": "at threshold"
            }]
        });
        let report = process_document(doc, &no_filter(), ParsePolicy::Skip).unwrap();
        let text = report.render_text();
        assert!(text.contains("priority: 10.0"));
        assert!(!text.contains("priority: 10\n"));
    }

    #[test]
    fn priority_formatting() {
        assert_eq!(format_priority(11.0), "11.0");
        assert_eq!(format_priority(11.25), "11.25");
        assert_eq!(format_priority(12.38), "12.38");
        assert_eq!(format_priority(0.0), "0.0");
    }
}
