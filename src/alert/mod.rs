//! Alert record and severity types

pub mod record;
pub mod severity;

pub use record::{Alert, TimestampError, MISSING_ID, REQUIRED_KEYS};
pub use severity::Severity;
