//! Cleaning Task Model
//!
//! Housekeeping 工单：绑定到某个区域，可指派员工，状态沿固定链流转。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Cleaning task status
///
/// Legal transitions: PENDING → IN_PROGRESS → DONE → VERIFIED,
/// plus DONE → IN_PROGRESS for rework.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Done,
    Verified,
}

impl TaskStatus {
    /// Whether moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: TaskStatus) -> bool {
        use TaskStatus::*;
        matches!(
            (self, next),
            (Pending, InProgress) | (InProgress, Done) | (Done, Verified) | (Done, InProgress)
        )
    }
}

/// Cleaning task entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningTask {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub title: String,
    #[serde(with = "serde_helpers::record_id")]
    pub section: RecordId,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub assignee: Option<RecordId>,
    pub status: TaskStatus,
    pub due_at: Option<i64>,
    pub note: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create cleaning task payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningTaskCreate {
    pub title: String,
    /// Section id ("section:xxx")
    pub section: String,
    /// Employee id ("employee:xxx")
    pub assignee: Option<String>,
    pub due_at: Option<i64>,
    pub note: Option<String>,
}

/// Update cleaning task payload (status changes go through the status route)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningTaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Status change payload for `POST /api/cleaning-tasks/{id}/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatusRequest {
    pub status: TaskStatus,
}
