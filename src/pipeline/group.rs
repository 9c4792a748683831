//! Grouping by originating component
//!
//! A pure partition: every input alert lands in exactly one group. Groups
//! appear in first-encounter order and keep their alerts in insertion order.

use fxhash::FxHashMap;
use serde::Serialize;
use serde_json::Value;

use crate::alert::Alert;

/// Alerts sharing one `component` value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentGroup {
    pub component: String,
    pub alerts: Vec<Alert>,
}

/// Partition `alerts` by component.
///
/// Grouping keys on the raw JSON value of the `component` field, so
/// distinct non-string components form distinct groups (and the string
/// `"7"` does not share a group with the number `7`). The group's
/// `component` name is the string content for string components and the
/// JSON serialization otherwise.
pub fn group_by_component(alerts: Vec<Alert>) -> Vec<ComponentGroup> {
    let mut index: FxHashMap<String, usize> = FxHashMap::default();
    let mut groups: Vec<ComponentGroup> = Vec::new();

    for alert in alerts {
        let raw = alert.fields().get("component");
        let key = raw.map_or_else(|| Value::Null.to_string(), |v| v.to_string());
        match index.get(&key) {
            Some(&idx) => groups[idx].alerts.push(alert),
            None => {
                let component = match raw {
                    Some(Value::String(s)) => s.clone(),
                    _ => key.clone(),
                };
                index.insert(key, groups.len());
                groups.push(ComponentGroup {
                    component,
                    alerts: vec![alert],
                });
            }
        }
    }

    groups
}
