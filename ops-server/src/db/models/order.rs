//! Order Model
//!
//! 订单行和付款记录内嵌在订单文档里：结算是对单条记录的读-改-写，
//! 付款、合计和状态永远一起变化。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

// =============================================================================
// Enums
// =============================================================================

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Open at the terminal, may still receive payments
    Open,
    /// Deferred for later settlement (bill-to-room / pay-later)
    Deferred,
    /// Fully paid
    Settled,
    /// Cancelled before settlement
    Void,
}

/// Payment accounting status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Unpaid,
    Partial,
    Paid,
}

/// Accepted payment methods
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    RoomCharge,
    Voucher,
}

// =============================================================================
// Embedded records
// =============================================================================

/// One line of an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    /// Stable id within the order (uuid)
    pub line_id: String,
    pub description: String,
    /// Optional link to the inventory catalog
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub item: Option<RecordId>,
    pub unit_price: f64,
    pub quantity: i64,
    /// Discount applied to this line by the pricing pass
    #[serde(default)]
    pub discount_amount: f64,
    pub line_total: f64,
}

/// One payment recorded against an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub method: PaymentMethod,
    pub amount: f64,
    pub reference: Option<String>,
    pub time: i64,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub cancelled: bool,
    pub cancel_reason: Option<String>,
}

// =============================================================================
// Order
// =============================================================================

/// Order entity (header + embedded lines and payments)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub receipt_number: String,
    #[serde(with = "serde_helpers::record_id")]
    pub department: RecordId,
    /// Denormalized for listings and receipts
    pub department_code: String,
    pub section_name: Option<String>,
    pub guest_name: Option<String>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub lines: Vec<OrderLine>,
    #[serde(default)]
    pub payments: Vec<PaymentRecord>,
    pub subtotal: f64,
    pub discount_total: f64,
    #[serde(default)]
    pub service_charge: f64,
    pub tax_total: f64,
    pub total: f64,
    #[serde(default)]
    pub paid_amount: f64,
    pub opened_at: i64,
    pub settled_at: Option<i64>,
    pub voided_at: Option<i64>,
    pub void_reason: Option<String>,
}

// =============================================================================
// API Request Types
// =============================================================================

/// One line of a create-order request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineCreate {
    pub description: String,
    /// Optional inventory item id ("inventory_item:xxx")
    pub item: Option<String>,
    pub unit_price: f64,
    pub quantity: i64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    /// Department code (e.g. "BAR")
    pub department: String,
    pub section_name: Option<String>,
    pub guest_name: Option<String>,
    /// Open as a deferred (pay-later) order
    #[serde(default)]
    pub deferred: bool,
    pub lines: Vec<OrderLineCreate>,
}

/// Settle payload for `POST /api/orders/{id}/settle`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettleRequest {
    pub method: PaymentMethod,
    pub amount: f64,
    pub reference: Option<String>,
}

/// Cancel-payment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelPaymentRequest {
    pub reason: String,
}

/// Void payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoidRequest {
    pub reason: String,
}
