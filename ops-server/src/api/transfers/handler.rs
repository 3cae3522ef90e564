//! Transfer API Handlers
//!
//! 调拨由 `POST /api/departments/{code}/transfer` 发起；这里只读审计行。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::{ApiResponse, AppError, AppResult, ErrorCode, PaginatedResponse};

use crate::core::ServerState;
use crate::db::models::TransferDetail;
use crate::db::repository::{DepartmentRepository, TransferRepository};
use crate::utils::ok;
use crate::utils::validation::normalize_department_code;

/// Query params for listing transfers
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Filter to transfers touching this department (code)
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

/// GET /api/transfers - 调拨记录 (分页, 最新在前)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<PaginatedResponse<TransferDetail>>>> {
    let per_page = query.per_page.clamp(1, 200);
    let page = query.page.max(1);

    let department = match query.department {
        Some(code) => {
            let code = normalize_department_code(&code)?;
            let department = DepartmentRepository::new(state.db.clone())
                .find_by_code(&code)
                .await?
                .ok_or_else(|| {
                    AppError::new(ErrorCode::DepartmentNotFound).with_detail("code", code)
                })?;
            Some(
                department
                    .id
                    .ok_or_else(|| AppError::internal("department record without id"))?,
            )
        }
        None => None,
    };

    let repo = TransferRepository::new(state.db.clone());
    let (transfers, total) = repo.find_page(department, page, per_page).await?;

    Ok(ok(PaginatedResponse::new(transfers, page, per_page, total)))
}

/// GET /api/transfers/:id - 单条调拨记录
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<TransferDetail>>> {
    let repo = TransferRepository::new(state.db.clone());
    let transfer = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TransferNotFound).with_detail("id", id))?;
    Ok(ok(transfer))
}
