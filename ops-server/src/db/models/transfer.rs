//! Stock Transfer Model
//!
//! 部门间库存调拨的审计记录。只有成功执行的调拨会落库。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Transfer status
///
/// Only executed movements are persisted, so today every stored row is
/// COMPLETED; REJECTED exists for imports from systems that log refusals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferStatus {
    Completed,
    Rejected,
}

/// Stock transfer audit record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockTransfer {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Generated unique reference (e.g. "TRF-5f2a1c...")
    pub reference: String,
    #[serde(with = "serde_helpers::record_id")]
    pub item: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub from_department: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub to_department: RecordId,
    pub quantity: i64,
    pub note: Option<String>,
    pub requested_by: Option<String>,
    pub status: TransferStatus,
    pub created_at: i64,
}

/// Transfer request payload for `POST /api/departments/{code}/transfer`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Inventory item id ("inventory_item:xxx")
    pub item: String,
    /// Destination department code
    pub to_department: String,
    pub quantity: i64,
    pub note: Option<String>,
    pub requested_by: Option<String>,
}

/// Transfer with department codes and item name flattened in (list projection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferDetail {
    pub id: String,
    pub reference: String,
    pub item: String,
    pub item_name: String,
    pub from_code: String,
    pub to_code: String,
    pub quantity: i64,
    pub note: Option<String>,
    pub requested_by: Option<String>,
    pub status: TransferStatus,
    pub created_at: i64,
}
