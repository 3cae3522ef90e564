//! Inventory Item Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Inventory item (stockable good tracked per department)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Unique stock keeping unit
    pub sku: String,
    pub name: String,
    /// Counting unit, e.g. "bottle", "kg", "piece"
    pub unit: String,
    #[serde(default)]
    pub unit_cost: f64,
    /// Restock alert threshold
    #[serde(default)]
    pub reorder_level: i64,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Create inventory item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemCreate {
    pub sku: String,
    pub name: String,
    pub unit: String,
    pub unit_cost: Option<f64>,
    pub reorder_level: Option<i64>,
}

/// Update inventory item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reorder_level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
