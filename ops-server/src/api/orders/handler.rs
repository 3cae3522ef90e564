//! Order API Handlers
//!
//! 创建时服务端定价 (折扣规则 + 税)；结算/撤销付款/作废先在内存中流转
//! 状态，再把整个订单一次写回。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::{ApiResponse, AppError, AppResult, ErrorCode, PaginatedResponse, SyncAction};
use surrealdb::RecordId;
use uuid::Uuid;

use crate::core::ServerState;
use crate::db::models::{
    CancelPaymentRequest, Order, OrderCreate, OrderLine, OrderStatus, PaymentStatus,
    SettleRequest, VoidRequest,
};
use crate::db::repository::{
    DepartmentRepository, DiscountRuleRepository, InventoryItemRepository, OrderRepository,
    TaxSettingsRepository,
};
use crate::orders::{money, new_receipt_number, pricing, settlement};
use crate::utils::ok;
use crate::utils::time::now_millis;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, normalize_department_code, validate_amount,
    validate_optional_text, validate_positive_amount, validate_quantity, validate_required_text,
};

const RESOURCE: &str = "order";

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
    /// Department code filter
    pub department: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

/// GET /api/orders - 订单列表 (分页, 最新在前)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<PaginatedResponse<Order>>>> {
    let per_page = query.per_page.clamp(1, 200);
    let page = query.page.max(1);
    let department_code = match query.department {
        Some(code) => Some(normalize_department_code(&code)?),
        None => None,
    };

    let repo = OrderRepository::new(state.db.clone());
    let (orders, total) = repo
        .find_page(query.status, department_code, page, per_page)
        .await?;

    Ok(ok(PaginatedResponse::new(orders, page, per_page, total)))
}

/// GET /api/orders/:id - 获取单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).with_detail("id", id))?;
    Ok(ok(order))
}

/// GET /api/orders/receipt/:receipt - 按小票号查询
pub async fn get_by_receipt(
    State(state): State<ServerState>,
    Path(receipt): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_receipt(&receipt)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).with_detail("receipt", receipt))?;
    Ok(ok(order))
}

/// POST /api/orders - 创建订单 (服务端定价)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<ApiResponse<Order>>> {
    if payload.lines.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    validate_optional_text(&payload.section_name, "section_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.guest_name, "guest_name", MAX_NAME_LEN)?;

    let code = normalize_department_code(&payload.department)?;
    let department = DepartmentRepository::new(state.db.clone())
        .find_by_code(&code)
        .await?
        .filter(|d| d.is_active)
        .ok_or_else(|| AppError::new(ErrorCode::DepartmentNotFound).with_detail("code", code.clone()))?;
    let department_id = department
        .id
        .ok_or_else(|| AppError::internal("department record without id"))?;

    // Validate lines and resolve optional catalog links
    let items = InventoryItemRepository::new(state.db.clone());
    let mut lines: Vec<OrderLine> = Vec::with_capacity(payload.lines.len());
    for line in &payload.lines {
        validate_required_text(&line.description, "description", MAX_NAME_LEN)?;
        validate_amount(line.unit_price, "unit_price")?;
        validate_quantity(line.quantity, "quantity")?;

        let item: Option<RecordId> = match &line.item {
            Some(reference) => {
                let item = items
                    .find_by_id(reference)
                    .await?
                    .filter(|i| i.is_active)
                    .ok_or_else(|| {
                        AppError::new(ErrorCode::ItemNotFound).with_detail("item", reference.clone())
                    })?;
                Some(
                    item.id
                        .ok_or_else(|| AppError::internal("item record without id"))?,
                )
            }
            None => None,
        };

        lines.push(OrderLine {
            line_id: Uuid::new_v4().to_string(),
            description: line.description.clone(),
            item,
            unit_price: line.unit_price,
            quantity: line.quantity,
            discount_amount: 0.0,
            line_total: 0.0,
        });
    }

    // Server-side pricing: matching discount rules + tax settings
    let now = now_millis();
    let rules = DiscountRuleRepository::new(state.db.clone()).find_all().await?;
    let selected = pricing::select_rules(&rules, &department_id, now);
    let tax = TaxSettingsRepository::new(state.db.clone()).get().await?;
    let totals = pricing::price_order(&mut lines, &selected, &tax);

    let order = Order {
        id: None,
        receipt_number: new_receipt_number(),
        department: department_id,
        department_code: code,
        section_name: payload.section_name,
        guest_name: payload.guest_name,
        status: if payload.deferred {
            OrderStatus::Deferred
        } else {
            OrderStatus::Open
        },
        payment_status: PaymentStatus::Unpaid,
        lines,
        payments: Vec::new(),
        subtotal: totals.subtotal,
        discount_total: totals.discount_total,
        service_charge: totals.service_charge,
        tax_total: totals.tax_total,
        total: totals.total,
        paid_amount: 0.0,
        opened_at: now,
        settled_at: None,
        voided_at: None,
        void_reason: None,
    };

    let order = OrderRepository::new(state.db.clone()).create(order).await?;

    let id = order.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE, SyncAction::Created, &id, Some(&order));

    Ok(ok(order))
}

/// POST /api/orders/:id/settle - 记录付款 (挂账结算)
pub async fn settle(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SettleRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    validate_positive_amount(payload.amount, "amount")?;
    validate_optional_text(&payload.reference, "reference", MAX_SHORT_TEXT_LEN)?;

    let repo = OrderRepository::new(state.db.clone());
    let mut order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).with_detail("id", id))?;

    settlement::apply_payment(
        &mut order,
        payload.method,
        payload.amount,
        payload.reference,
        now_millis(),
    )?;

    let order = repo.save(order).await?;

    let id = order.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE, SyncAction::Event, &id, Some(&order));
    tracing::info!(
        receipt = %order.receipt_number,
        paid = order.paid_amount,
        total = order.total,
        remaining = money::to_f64(
            money::to_decimal(order.total) - money::to_decimal(order.paid_amount)
        ),
        "payment recorded"
    );

    Ok(ok(order))
}

/// POST /api/orders/:id/payments/:index/cancel - 撤销一笔付款
pub async fn cancel_payment(
    State(state): State<ServerState>,
    Path((id, index)): Path<(String, usize)>,
    Json(payload): Json<CancelPaymentRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    validate_required_text(&payload.reason, "reason", MAX_NOTE_LEN)?;

    let repo = OrderRepository::new(state.db.clone());
    let mut order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).with_detail("id", id))?;

    settlement::cancel_payment(&mut order, index, payload.reason, now_millis())?;

    let order = repo.save(order).await?;

    let id = order.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE, SyncAction::Event, &id, Some(&order));

    Ok(ok(order))
}

/// POST /api/orders/:id/void - 作废订单
pub async fn void(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<VoidRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    validate_required_text(&payload.reason, "reason", MAX_NOTE_LEN)?;

    let repo = OrderRepository::new(state.db.clone());
    let mut order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).with_detail("id", id))?;

    settlement::void_order(&mut order, payload.reason, now_millis())?;

    let order = repo.save(order).await?;

    let id = order.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE, SyncAction::Event, &id, Some(&order));

    Ok(ok(order))
}
