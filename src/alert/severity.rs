//! Alert severity levels

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of scoreable severities.
///
/// The raw `severity` string on a record is only promoted to this enum at
/// scoring time; filtering compares the raw string directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    /// Numeric weight used as the base of the priority score.
    pub fn weight(&self) -> f64 {
        match self {
            Severity::Critical => 10.0,
            Severity::Warning => 5.0,
            Severity::Info => 1.0,
        }
    }

    /// Exact lowercase match. `"Critical"` is not scoreable; the
    /// case-insensitive comparison in the filter stage happens on the raw
    /// string before this parse.
    pub fn parse(s: &str) -> Option<Severity> {
        match s {
            "critical" => Some(Severity::Critical),
            "warning" => Some(Severity::Warning),
            "info" => Some(Severity::Info),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}
