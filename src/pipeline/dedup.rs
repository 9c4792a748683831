//! Identity deduplication
//!
//! Collapses records sharing an `id` down to the most recent observation.
//! Output order is first-encounter order per id: a later arrival that wins
//! on recency replaces the stored record in place, it does not move to the
//! back.

use std::collections::hash_map::Entry;

use chrono::{DateTime, Utc};
use fxhash::FxHashMap;

use super::{ParsePolicy, PipelineError};
use crate::alert::Alert;

/// Keep the latest observation per `id`.
///
/// Identity is the raw JSON value of the `id` field, so non-string ids
/// deduplicate against themselves only. Replacement requires a strictly
/// greater timestamp; on a tie the existing entry wins. Unparseable
/// timestamps are handled per `policy`.
pub fn dedupe_alerts(
    alerts: Vec<Alert>,
    policy: ParsePolicy,
) -> Result<Vec<Alert>, PipelineError> {
    let mut by_id: FxHashMap<String, usize> = FxHashMap::default();
    let mut kept: Vec<(Alert, DateTime<Utc>)> = Vec::new();

    for alert in alerts {
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

        match by_id.entry(alert.id_key()) {
            Entry::Occupied(slot) => {
                let idx = *slot.get();
                if ts > kept[idx].1 {
                    kept[idx] = (alert, ts);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(kept.len());
                kept.push((alert, ts));
            }
        }
    }

    Ok(kept.into_iter().map(|(alert, _)| alert).collect())
}
