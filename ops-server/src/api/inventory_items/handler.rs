//! Inventory Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::{ApiResponse, AppError, AppResult, ErrorCode, SyncAction};

use crate::core::ServerState;
use crate::db::models::{InventoryItem, InventoryItemCreate, InventoryItemUpdate};
use crate::db::repository::{InventoryItemRepository, RepoError};
use crate::utils::ok;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_amount, validate_required_text,
};

const RESOURCE: &str = "inventory_item";

/// GET /api/inventory-items - 获取所有物品
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<InventoryItem>>>> {
    let repo = InventoryItemRepository::new(state.db.clone());
    let items = repo.find_all().await?;
    Ok(ok(items))
}

/// GET /api/inventory-items/:id - 获取单个物品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<InventoryItem>>> {
    let repo = InventoryItemRepository::new(state.db.clone());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ItemNotFound).with_detail("id", id))?;
    Ok(ok(item))
}

/// POST /api/inventory-items - 创建物品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<InventoryItemCreate>,
) -> AppResult<Json<ApiResponse<InventoryItem>>> {
    validate_required_text(&payload.sku, "sku", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.unit, "unit", MAX_SHORT_TEXT_LEN)?;
    if let Some(cost) = payload.unit_cost {
        validate_amount(cost, "unit_cost")?;
    }
    if payload.reorder_level.is_some_and(|r| r < 0) {
        return Err(AppError::validation("reorder_level must not be negative"));
    }

    let repo = InventoryItemRepository::new(state.db.clone());
    let item = repo
        .create(InventoryItem {
            id: None,
            sku: payload.sku.trim().to_string(),
            name: payload.name,
            unit: payload.unit,
            unit_cost: payload.unit_cost.unwrap_or(0.0),
            reorder_level: payload.reorder_level.unwrap_or(0),
            is_active: true,
        })
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::SkuExists, msg),
            other => other.into(),
        })?;

    let id = item.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE, SyncAction::Created, &id, Some(&item));

    Ok(ok(item))
}

/// PUT /api/inventory-items/:id - 更新物品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<InventoryItemUpdate>,
) -> AppResult<Json<ApiResponse<InventoryItem>>> {
    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(ref unit) = payload.unit {
        validate_required_text(unit, "unit", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(cost) = payload.unit_cost {
        validate_amount(cost, "unit_cost")?;
    }
    if payload.reorder_level.is_some_and(|r| r < 0) {
        return Err(AppError::validation("reorder_level must not be negative"));
    }

    let repo = InventoryItemRepository::new(state.db.clone());
    let item = repo.update(&id, payload).await?;

    let id = item.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE, SyncAction::Updated, &id, Some(&item));

    Ok(ok(item))
}

/// DELETE /api/inventory-items/:id - 删除物品 (软删除)
///
/// 任何部门仍有库存时拒绝删除。
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let repo = InventoryItemRepository::new(state.db.clone());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ItemNotFound).with_detail("id", id.clone()))?;
    let item_id = item
        .id
        .ok_or_else(|| AppError::internal("item record without id"))?;

    if repo.has_stock(&item_id).await? {
        return Err(AppError::new(ErrorCode::ItemHasStock));
    }

    let result = repo.soft_delete(&id).await?;

    if result {
        state.broadcast_sync::<()>(RESOURCE, SyncAction::Deleted, &item_id.to_string(), None);
    }

    Ok(ok(result))
}
