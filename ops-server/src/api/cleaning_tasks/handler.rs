//! Cleaning Task API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::{ApiResponse, AppError, AppResult, ErrorCode, SyncAction};
use surrealdb::RecordId;

use crate::core::ServerState;
use crate::db::models::{
    CleaningTask, CleaningTaskCreate, CleaningTaskUpdate, DepartmentSection, Employee, TaskStatus,
    TaskStatusRequest,
};
use crate::db::repository::cleaning_task::CleaningTaskPatch;
use crate::db::repository::{CleaningTaskRepository, parse_record_id};
use crate::utils::ok;
use crate::utils::time::now_millis;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};

const RESOURCE: &str = "cleaning_task";

/// Section must exist and be active
async fn resolve_section(state: &ServerState, reference: &str) -> AppResult<RecordId> {
    let record_id = parse_record_id("section", reference)?;
    let section: Option<DepartmentSection> = state
        .db
        .select(record_id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    let section = section
        .filter(|s| s.is_active)
        .ok_or_else(|| AppError::new(ErrorCode::SectionNotFound).with_detail("section", reference))?;
    section
        .id
        .ok_or_else(|| AppError::internal("section record without id"))
}

/// Assignee must exist and not be blocked
async fn resolve_assignee(state: &ServerState, reference: &str) -> AppResult<RecordId> {
    let record_id = parse_record_id("employee", reference)?;
    let employee: Option<Employee> = state
        .db
        .select(record_id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    let employee = employee.ok_or_else(|| {
        AppError::new(ErrorCode::EmployeeNotFound).with_detail("assignee", reference)
    })?;
    if employee.blocked {
        return Err(AppError::new(ErrorCode::EmployeeBlocked).with_detail("assignee", reference));
    }
    employee
        .id
        .ok_or_else(|| AppError::internal("employee record without id"))
}

/// Query params for listing tasks
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<TaskStatus>,
    /// Section id filter ("section:xxx")
    pub section: Option<String>,
}

/// GET /api/cleaning-tasks - 任务列表 (可按状态/区域过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<CleaningTask>>>> {
    let section = match query.section {
        Some(reference) => Some(parse_record_id("section", &reference)?),
        None => None,
    };

    let repo = CleaningTaskRepository::new(state.db.clone());
    let tasks = repo.find_all(query.status, section).await?;
    Ok(ok(tasks))
}

/// GET /api/cleaning-tasks/:id - 获取单个任务
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CleaningTask>>> {
    let repo = CleaningTaskRepository::new(state.db.clone());
    let task = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CleaningTaskNotFound).with_detail("id", id))?;
    Ok(ok(task))
}

/// POST /api/cleaning-tasks - 创建任务
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CleaningTaskCreate>,
) -> AppResult<Json<ApiResponse<CleaningTask>>> {
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;

    let section = resolve_section(&state, &payload.section).await?;
    let assignee = match payload.assignee {
        Some(ref reference) => Some(resolve_assignee(&state, reference).await?),
        None => None,
    };

    let now = now_millis();
    let repo = CleaningTaskRepository::new(state.db.clone());
    let task = repo
        .create(CleaningTask {
            id: None,
            title: payload.title,
            section,
            assignee,
            status: TaskStatus::Pending,
            due_at: payload.due_at,
            note: payload.note,
            created_at: now,
            updated_at: now,
        })
        .await?;

    let id = task.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE, SyncAction::Created, &id, Some(&task));

    Ok(ok(task))
}

/// PUT /api/cleaning-tasks/:id - 更新任务 (不含状态)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CleaningTaskUpdate>,
) -> AppResult<Json<ApiResponse<CleaningTask>>> {
    if let Some(ref title) = payload.title {
        validate_required_text(title, "title", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;

    let assignee = match payload.assignee {
        Some(ref reference) => Some(resolve_assignee(&state, reference).await?),
        None => None,
    };

    let repo = CleaningTaskRepository::new(state.db.clone());
    let task = repo
        .update(
            &id,
            CleaningTaskPatch {
                title: payload.title,
                assignee,
                due_at: payload.due_at,
                note: payload.note,
                updated_at: now_millis(),
            },
        )
        .await?;

    let id = task.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE, SyncAction::Updated, &id, Some(&task));

    Ok(ok(task))
}

/// POST /api/cleaning-tasks/:id/status - 状态流转
pub async fn set_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TaskStatusRequest>,
) -> AppResult<Json<ApiResponse<CleaningTask>>> {
    let repo = CleaningTaskRepository::new(state.db.clone());
    let task = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CleaningTaskNotFound).with_detail("id", id.clone()))?;

    if !task.status.can_transition_to(payload.status) {
        return Err(AppError::new(ErrorCode::InvalidTaskTransition)
            .with_detail("from", format!("{:?}", task.status))
            .with_detail("to", format!("{:?}", payload.status)));
    }

    let task = repo.set_status(&id, payload.status).await?;

    let id = task.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE, SyncAction::Updated, &id, Some(&task));

    Ok(ok(task))
}

/// DELETE /api/cleaning-tasks/:id - 删除任务
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let repo = CleaningTaskRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;
    if !result {
        return Err(AppError::new(ErrorCode::CleaningTaskNotFound).with_detail("id", id));
    }

    state.broadcast_sync::<()>(RESOURCE, SyncAction::Deleted, &id, None);

    Ok(ok(result))
}
