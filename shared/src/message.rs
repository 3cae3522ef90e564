//! Resource-sync message payloads
//!
//! Every successful mutation publishes one of these on the in-process sync
//! bus so listeners (currently a logging worker, later terminals) can react
//! to data changes without polling.

use serde::{Deserialize, Serialize};

/// Kind of change a sync message describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncAction {
    Created,
    Updated,
    Deleted,
    /// Domain-level action that is not a plain CRUD write
    /// (e.g. "order settled", "stock transferred")
    Event,
}

/// Sync payload broadcast on resource changes
///
/// `version` increases monotonically per resource so consumers can detect
/// stale or out-of-order deliveries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncPayload {
    /// Resource type, e.g. "department", "order", "stock_level"
    pub resource: String,
    /// Monotonic per-resource version
    pub version: u64,
    /// What happened
    pub action: SyncAction,
    /// Record id ("table:id") the change applies to
    pub id: String,
    /// Snapshot of the changed record (absent for deletions)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_serialization() {
        let payload = SyncPayload {
            resource: "order".into(),
            version: 7,
            action: SyncAction::Event,
            id: "order:abc".into(),
            data: None,
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains(r#""action":"event""#));
        assert!(json.contains(r#""version":7"#));
        assert!(!json.contains("data"));
    }
}
