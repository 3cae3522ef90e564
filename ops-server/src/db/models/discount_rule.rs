//! Discount Rule Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Rule scope enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleScope {
    /// Applies to every order
    Global,
    /// Applies only to orders of one department
    Department,
}

/// Adjustment type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdjustmentType {
    Percentage,
    FixedAmount,
}

/// Discount rule entity (折扣规则)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountRule {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub description: Option<String>,
    pub rule_scope: RuleScope,
    /// Target department when scope is DEPARTMENT
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub department: Option<RecordId>,
    pub adjustment_type: AdjustmentType,
    /// Percentage: 10 = 10% off; fixed: amount per line unit
    pub adjustment_value: f64,
    /// Valid from timestamp (milliseconds since epoch)
    pub valid_from: Option<i64>,
    /// Valid until timestamp (milliseconds since epoch)
    pub valid_until: Option<i64>,
    #[serde(default)]
    pub priority: i32,
    /// Stackable rules combine with the winning non-stackable rule
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_stackable: bool,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

/// Create discount rule payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountRuleCreate {
    pub name: String,
    pub description: Option<String>,
    pub rule_scope: RuleScope,
    /// Department code when scope is DEPARTMENT
    pub department: Option<String>,
    pub adjustment_type: AdjustmentType,
    pub adjustment_value: f64,
    pub valid_from: Option<i64>,
    pub valid_until: Option<i64>,
    pub priority: Option<i32>,
    pub is_stackable: Option<bool>,
}

/// Update discount rule payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountRuleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustment_type: Option<AdjustmentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustment_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_stackable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
