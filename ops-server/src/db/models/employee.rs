//! Employee Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Employment details embedded in the employee record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmploymentData {
    pub position: String,
    /// Home department ("department:xxx"), optional for floating staff
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub department: Option<RecordId>,
    /// Hire date (milliseconds since epoch)
    pub hired_at: i64,
    #[serde(default)]
    pub weekly_hours: f64,
    #[serde(default)]
    pub hourly_rate: f64,
}

/// Employee model
///
/// Soft delete uses `blocked` rather than `is_active`: a blocked employee
/// stays referenced from past orders and tasks but cannot receive new work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Unique staff number (badge)
    pub staff_number: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub employment: EmploymentData,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub blocked: bool,
    #[serde(default)]
    pub created_at: i64,
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub staff_number: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub employment: EmploymentData,
}

/// Update employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment: Option<EmploymentData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
}
