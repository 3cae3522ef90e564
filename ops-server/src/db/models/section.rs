//! Department Section Model
//!
//! 部门下的子区域 (如 "Terrace", "Floor 2 West")。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Department section model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentSection {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(with = "serde_helpers::record_id")]
    pub department: RecordId,
    pub floor: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Create section payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionCreate {
    pub name: String,
    /// Department id ("department:xxx") or code
    pub department: String,
    pub floor: Option<String>,
    pub sort_order: Option<i32>,
}

/// Update section payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
