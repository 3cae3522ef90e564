//! Section API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::{ApiResponse, AppError, AppResult, ErrorCode, SyncAction};
use surrealdb::RecordId;

use crate::core::ServerState;
use crate::db::models::{Department, DepartmentSection, SectionCreate, SectionUpdate};
use crate::db::repository::{DepartmentRepository, SectionRepository, parse_record_id};
use crate::utils::ok;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, normalize_department_code, validate_optional_text,
    validate_required_text,
};

const RESOURCE: &str = "section";

/// Resolve a department reference that may be a record id or a code
async fn resolve_department(state: &ServerState, reference: &str) -> AppResult<RecordId> {
    let department: Option<Department> = if reference.contains(':') {
        let record_id = parse_record_id("department", reference)?;
        state
            .db
            .select(record_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
    } else {
        let code = normalize_department_code(reference)?;
        DepartmentRepository::new(state.db.clone())
            .find_by_code(&code)
            .await?
    };

    let department = department.filter(|d| d.is_active).ok_or_else(|| {
        AppError::new(ErrorCode::DepartmentNotFound).with_detail("department", reference)
    })?;
    department
        .id
        .ok_or_else(|| AppError::internal("department record without id"))
}

/// GET /api/sections - 获取所有区域
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<DepartmentSection>>>> {
    let repo = SectionRepository::new(state.db.clone());
    let sections = repo.find_all().await?;
    Ok(ok(sections))
}

/// GET /api/sections/:id - 获取单个区域
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<DepartmentSection>>> {
    let repo = SectionRepository::new(state.db.clone());
    let section = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::SectionNotFound).with_detail("id", id))?;
    Ok(ok(section))
}

/// POST /api/sections - 创建区域
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SectionCreate>,
) -> AppResult<Json<ApiResponse<DepartmentSection>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.floor, "floor", MAX_SHORT_TEXT_LEN)?;

    let department = resolve_department(&state, &payload.department).await?;

    let repo = SectionRepository::new(state.db.clone());
    let section = repo
        .create(DepartmentSection {
            id: None,
            name: payload.name,
            department,
            floor: payload.floor,
            sort_order: payload.sort_order.unwrap_or(0),
            is_active: true,
        })
        .await?;

    let id = section.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE, SyncAction::Created, &id, Some(&section));

    Ok(ok(section))
}

/// PUT /api/sections/:id - 更新区域
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SectionUpdate>,
) -> AppResult<Json<ApiResponse<DepartmentSection>>> {
    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.floor, "floor", MAX_SHORT_TEXT_LEN)?;

    let repo = SectionRepository::new(state.db.clone());
    let section = repo.update(&id, payload).await?;

    let id = section.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE, SyncAction::Updated, &id, Some(&section));

    Ok(ok(section))
}

/// DELETE /api/sections/:id - 删除区域 (软删除)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let repo = SectionRepository::new(state.db.clone());
    let result = repo.soft_delete(&id).await?;

    if result {
        state.broadcast_sync::<()>(RESOURCE, SyncAction::Deleted, &id, None);
    }

    Ok(ok(result))
}
