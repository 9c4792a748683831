//! The alert processing pipeline
//!
//! Stages run strictly forward over in-memory collections:
//! load → filter (validates inline) → dedupe → group → score.
//! Each stage produces a new collection and never mutates its input records.

pub mod dedup;
pub mod filter;
pub mod group;
pub mod loader;
pub mod score;

pub use dedup::dedupe_alerts;
pub use filter::{filter_alerts, AlertFilter};
pub use group::{group_by_component, ComponentGroup};
pub use loader::load_alerts;
pub use score::{priority_score, ScoreError};

use crate::alert::TimestampError;

/// What to do when a record's timestamp cannot be parsed during filtering
/// or deduplication.
///
/// The default skips the record with a diagnostic, so one bad timestamp
/// cannot void an entire batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParsePolicy {
    /// Skip the offending record and log a warning.
    #[default]
    Skip,
    /// Abort the batch, surfacing the record's [`TimestampError`].
    Abort,
}

/// Batch-level pipeline failures.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The input envelope is malformed. Fatal: nothing is processed.
    #[error("invalid document: missing top-level 'alerts' list")]
    Format,

    /// A record timestamp failed to parse under [`ParsePolicy::Abort`].
    #[error(transparent)]
    Timestamp(#[from] TimestampError),

    /// A filter window bound could not be parsed. Bounds are operator
    /// input, so this is always an error regardless of policy.
    #[error("invalid {which} bound {input:?}: {source}")]
    Bound {
        which: &'static str,
        input: String,
        #[source]
        source: chrono::ParseError,
    },
}
