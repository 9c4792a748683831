//! Triage: Alert Ingestion and Prioritization Pipeline
//!
//! Loads a batch of monitoring alerts, validates their shape, filters by
//! attribute and time window, deduplicates by identity keeping the most
//! recent observation, groups by originating component, and computes a
//! numeric priority score per alert.
//!
//! # Features
//!
//! - **Structural Validation**: records missing required fields are skipped
//!   with a diagnostic, never aborting the batch
//! - **Stable Filtering**: case-insensitive severity, case-sensitive
//!   service, inclusive `[start, end]` time window
//! - **Recency Dedup**: latest timestamp wins per id, first-encounter order
//!   preserved
//! - **Component Grouping**: ordered, exhaustive, disjoint partition
//! - **Priority Scoring**: severity weight × threshold overage × component
//!   cluster factor, rounded to two decimals
//!
//! # Example
//!
//! ```no_run
//! use serde_json::json;
//! use triage::{process_document, AlertFilter, ParsePolicy};
//!
//! let doc = json!({
//!     "alerts": [{
//!         "id": "a1",
//!         "timestamp": "2025-06-06T00:00:00Z",
//!         "service": "s1",
//!         "component": "c1",
//!         "severity": "critical",
//!         "metric": "cpu",
//!         "value": 90,
//!         "threshold": 80,
//!         "description": "high cpu"
//!     }]
//! });
//!
//! let filter = AlertFilter::from_args(Some("critical"), None, None, None).unwrap();
//! let report = process_document(doc, &filter, ParsePolicy::default()).unwrap();
//! println!("{}", report.render_text());
//! ```

pub mod alert;
pub mod api;
pub mod pipeline;
pub mod report;

// Re-export commonly used types
pub use alert::{Alert, Severity, TimestampError, REQUIRED_KEYS};
pub use pipeline::{AlertFilter, ParsePolicy, PipelineError, ScoreError};
pub use report::{process_document, Report};
