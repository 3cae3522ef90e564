//! Stock Level Model
//!
//! 部门持有的某个物品的库存数量。每个 (department, item) 组合一条记录，
//! 记录 ID 由两者的 key 拼接而成，调拨事务可以直接寻址。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Per-department stock quantity for one item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockLevel {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub department: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub item: RecordId,
    /// Quantity on hand, never negative
    pub on_hand: i64,
    pub updated_at: i64,
}

impl StockLevel {
    /// Deterministic record id for a (department, item) pair
    ///
    /// Addressing stock rows by a composite key keeps transfer transactions
    /// free of lookup queries.
    pub fn record_id(department: &RecordId, item: &RecordId) -> RecordId {
        RecordId::from_table_key(
            "stock_level",
            format!("{}_{}", department.key(), item.key()),
        )
    }
}

/// Upsert payload for `PUT /api/departments/{code}/inventory`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockLevelUpsert {
    /// Inventory item id ("inventory_item:xxx")
    pub item: String,
    /// Absolute quantity to set (>= 0)
    pub on_hand: i64,
}

/// Stock level with item fields flattened in (list projection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockLevelDetail {
    pub id: String,
    pub item: String,
    pub item_name: String,
    pub item_sku: String,
    pub item_unit: String,
    pub on_hand: i64,
    pub reorder_level: i64,
    pub updated_at: i64,
}
