//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::{ApiResponse, AppError, AppResult, ErrorCode, SyncAction};

use crate::core::ServerState;
use crate::db::models::{Department, Employee, EmployeeCreate, EmployeeUpdate, EmploymentData};
use crate::db::repository::{EmployeeRepository, RepoError};
use crate::utils::ok;
use crate::utils::time::now_millis;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_amount, validate_optional_text,
    validate_required_text,
};

const RESOURCE: &str = "employee";

async fn validate_employment(state: &ServerState, employment: &EmploymentData) -> AppResult<()> {
    validate_required_text(&employment.position, "position", MAX_NAME_LEN)?;
    validate_amount(employment.weekly_hours, "weekly_hours")?;
    validate_amount(employment.hourly_rate, "hourly_rate")?;

    // The home department must exist when given
    if let Some(ref department) = employment.department {
        let found: Option<Department> = state
            .db
            .select(department.clone())
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
        if found.is_none() {
            return Err(AppError::new(ErrorCode::DepartmentNotFound)
                .with_detail("department", department.to_string()));
        }
    }
    Ok(())
}

/// GET /api/employees - 获取所有在职员工
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Employee>>>> {
    let repo = EmployeeRepository::new(state.db.clone());
    let employees = repo.find_all().await?;
    Ok(ok(employees))
}

/// GET /api/employees/:id - 获取单个员工
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound).with_detail("id", id))?;
    Ok(ok(employee))
}

/// POST /api/employees - 创建员工
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    validate_required_text(&payload.staff_number, "staff_number", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.full_name, "full_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_employment(&state, &payload.employment).await?;

    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo
        .create(Employee {
            id: None,
            staff_number: payload.staff_number.trim().to_string(),
            full_name: payload.full_name,
            email: payload.email,
            phone: payload.phone,
            employment: payload.employment,
            blocked: false,
            created_at: now_millis(),
        })
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::StaffNumberExists, msg),
            other => other.into(),
        })?;

    let id = employee.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE, SyncAction::Created, &id, Some(&employee));

    Ok(ok(employee))
}

/// PUT /api/employees/:id - 更新员工
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    if let Some(ref full_name) = payload.full_name {
        validate_required_text(full_name, "full_name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.email, "email", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    if let Some(ref employment) = payload.employment {
        validate_employment(&state, employment).await?;
    }

    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo.update(&id, payload).await?;

    let id = employee.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE, SyncAction::Updated, &id, Some(&employee));

    Ok(ok(employee))
}

/// DELETE /api/employees/:id - 拉黑员工 (软删除)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let repo = EmployeeRepository::new(state.db.clone());
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound).with_detail("id", id.clone()))?;

    let result = repo.block(&id).await?;

    if result {
        state.broadcast_sync::<()>(RESOURCE, SyncAction::Deleted, &id, None);
    }

    Ok(ok(result))
}
