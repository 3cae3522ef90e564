//! Department Model
//!
//! 酒店的组织单元 (如 Bar, Restaurant, Housekeeping)，通过 code 寻址。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Department ID type
pub type DepartmentId = RecordId;

/// Department model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<DepartmentId>,
    /// Uppercase short code, unique (e.g. "BAR", "RESTAURANT")
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Create department payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentCreate {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
}

/// Update department payload
///
/// The code is the address of a department and cannot be changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
