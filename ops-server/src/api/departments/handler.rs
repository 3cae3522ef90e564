//! Department API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::{ApiResponse, AppError, AppResult, ErrorCode, SyncAction};

use crate::core::ServerState;
use crate::db::models::{
    Department, DepartmentCreate, DepartmentSection, DepartmentUpdate, StockLevelDetail,
    StockLevelUpsert, StockTransfer, TransferRequest,
};
use crate::db::repository::{
    DepartmentRepository, InventoryItemRepository, RepoError, SectionRepository, StockRepository,
};
use crate::inventory::TransferService;
use crate::utils::ok;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, normalize_department_code, validate_optional_text,
    validate_required_text,
};

const RESOURCE: &str = "department";

/// GET /api/departments - 获取所有部门
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Department>>>> {
    let repo = DepartmentRepository::new(state.db.clone());
    let departments = repo.find_all().await?;
    Ok(ok(departments))
}

/// GET /api/departments/:code - 获取单个部门
pub async fn get_by_code(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<ApiResponse<Department>>> {
    let code = normalize_department_code(&code)?;
    let repo = DepartmentRepository::new(state.db.clone());
    let department = repo
        .find_by_code(&code)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::DepartmentNotFound).with_detail("code", code))?;
    Ok(ok(department))
}

/// POST /api/departments - 创建部门
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DepartmentCreate>,
) -> AppResult<Json<ApiResponse<Department>>> {
    let code = normalize_department_code(&payload.code)?;
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let repo = DepartmentRepository::new(state.db.clone());
    let department = repo
        .create(Department {
            id: None,
            code,
            name: payload.name,
            description: payload.description,
            sort_order: payload.sort_order.unwrap_or(0),
            is_active: true,
        })
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(msg) => {
                AppError::with_message(ErrorCode::DepartmentCodeExists, msg)
            }
            other => other.into(),
        })?;

    // 广播同步通知
    let id = department.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE, SyncAction::Created, &id, Some(&department));

    Ok(ok(department))
}

/// PUT /api/departments/:code - 更新部门
pub async fn update(
    State(state): State<ServerState>,
    Path(code): Path<String>,
    Json(payload): Json<DepartmentUpdate>,
) -> AppResult<Json<ApiResponse<Department>>> {
    let code = normalize_department_code(&code)?;
    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let repo = DepartmentRepository::new(state.db.clone());
    let department = repo.update_by_code(&code, payload).await?;

    let id = department.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE, SyncAction::Updated, &id, Some(&department));

    Ok(ok(department))
}

/// DELETE /api/departments/:code - 删除部门 (软删除)
///
/// 仍持有库存的部门拒绝删除。
pub async fn delete(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let code = normalize_department_code(&code)?;
    let repo = DepartmentRepository::new(state.db.clone());
    let department = repo
        .find_by_code(&code)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::DepartmentNotFound).with_detail("code", code.clone())
        })?;

    let dept_id = department
        .id
        .ok_or_else(|| AppError::internal("department record without id"))?;
    let stock = StockRepository::new(state.db.clone());
    let held = stock.department_stock_count(&dept_id).await?;
    if held > 0 {
        return Err(AppError::new(ErrorCode::DepartmentHasStock).with_detail("items_with_stock", held));
    }

    let result = repo.soft_delete(&code).await?;

    if result {
        state.broadcast_sync::<()>(RESOURCE, SyncAction::Deleted, &dept_id.to_string(), None);
    }

    Ok(ok(result))
}

/// GET /api/departments/:code/sections - 部门下的区域
pub async fn list_sections(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<DepartmentSection>>>> {
    let code = normalize_department_code(&code)?;
    let departments = DepartmentRepository::new(state.db.clone());
    let department = departments
        .find_by_code(&code)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::DepartmentNotFound).with_detail("code", code))?;
    let dept_id = department
        .id
        .ok_or_else(|| AppError::internal("department record without id"))?;

    let sections = SectionRepository::new(state.db.clone())
        .find_by_department(&dept_id)
        .await?;
    Ok(ok(sections))
}

/// GET /api/departments/:code/inventory - 部门库存
pub async fn get_inventory(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<StockLevelDetail>>>> {
    let code = normalize_department_code(&code)?;
    let departments = DepartmentRepository::new(state.db.clone());
    let department = departments
        .find_by_code(&code)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::DepartmentNotFound).with_detail("code", code))?;
    let dept_id = department
        .id
        .ok_or_else(|| AppError::internal("department record without id"))?;

    let levels = StockRepository::new(state.db.clone())
        .levels_for_department(&dept_id)
        .await?;
    Ok(ok(levels))
}

/// PUT /api/departments/:code/inventory - 设置部门库存数量
pub async fn upsert_inventory(
    State(state): State<ServerState>,
    Path(code): Path<String>,
    Json(payload): Json<StockLevelUpsert>,
) -> AppResult<Json<ApiResponse<crate::db::models::StockLevel>>> {
    if payload.on_hand < 0 {
        return Err(AppError::validation(format!(
            "on_hand must not be negative, got {}",
            payload.on_hand
        )));
    }

    let code = normalize_department_code(&code)?;
    let departments = DepartmentRepository::new(state.db.clone());
    let department = departments
        .find_by_code(&code)
        .await?
        .filter(|d| d.is_active)
        .ok_or_else(|| AppError::new(ErrorCode::DepartmentNotFound).with_detail("code", code))?;
    let dept_id = department
        .id
        .ok_or_else(|| AppError::internal("department record without id"))?;

    let items = InventoryItemRepository::new(state.db.clone());
    let item = items
        .find_by_id(&payload.item)
        .await?
        .filter(|i| i.is_active)
        .ok_or_else(|| {
            AppError::new(ErrorCode::ItemNotFound).with_detail("item", payload.item.clone())
        })?;
    let item_id = item
        .id
        .ok_or_else(|| AppError::internal("item record without id"))?;

    let level = StockRepository::new(state.db.clone())
        .upsert_level(&dept_id, &item_id, payload.on_hand)
        .await?;

    let id = level.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state.broadcast_sync("stock_level", SyncAction::Updated, &id, Some(&level));

    Ok(ok(level))
}

/// POST /api/departments/:code/transfer - 部门间库存调拨
pub async fn transfer(
    State(state): State<ServerState>,
    Path(code): Path<String>,
    Json(payload): Json<TransferRequest>,
) -> AppResult<Json<ApiResponse<StockTransfer>>> {
    validate_optional_text(&payload.requested_by, "requested_by", MAX_NAME_LEN)?;

    let service = TransferService::new(state.db.clone());
    let executed = service.transfer(&code, payload).await?;

    let id = executed.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state.broadcast_sync("transfer", SyncAction::Event, &id, Some(&executed));

    Ok(ok(executed))
}
