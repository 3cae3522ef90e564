//! Discount Rule API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::{ApiResponse, AppError, AppResult, ErrorCode, SyncAction};
use surrealdb::RecordId;

use crate::core::ServerState;
use crate::db::models::{
    AdjustmentType, DiscountRule, DiscountRuleCreate, DiscountRuleUpdate, RuleScope,
};
use crate::db::repository::{DepartmentRepository, DiscountRuleRepository};
use crate::utils::ok;
use crate::utils::time::now_millis;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, normalize_department_code, validate_optional_text,
    validate_percentage, validate_positive_amount, validate_required_text,
};

const RESOURCE: &str = "discount_rule";

/// Percentage rules stay in (0, 100]; fixed rules just need a positive amount
fn validate_adjustment(adjustment_type: AdjustmentType, value: f64) -> AppResult<()> {
    match adjustment_type {
        AdjustmentType::Percentage => validate_percentage(value, "adjustment_value"),
        AdjustmentType::FixedAmount => validate_positive_amount(value, "adjustment_value"),
    }
}

fn validate_window(valid_from: Option<i64>, valid_until: Option<i64>) -> AppResult<()> {
    if let (Some(from), Some(until)) = (valid_from, valid_until)
        && from >= until
    {
        return Err(AppError::validation(
            "valid_from must be earlier than valid_until",
        ));
    }
    Ok(())
}

/// GET /api/discount-rules - 获取所有规则
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<DiscountRule>>>> {
    let repo = DiscountRuleRepository::new(state.db.clone());
    let rules = repo.find_all().await?;
    Ok(ok(rules))
}

/// GET /api/discount-rules/:id - 获取单个规则
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<DiscountRule>>> {
    let repo = DiscountRuleRepository::new(state.db.clone());
    let rule = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::DiscountRuleNotFound).with_detail("id", id))?;
    Ok(ok(rule))
}

/// POST /api/discount-rules - 创建规则
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiscountRuleCreate>,
) -> AppResult<Json<ApiResponse<DiscountRule>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_adjustment(payload.adjustment_type, payload.adjustment_value)?;
    validate_window(payload.valid_from, payload.valid_until)?;

    // DEPARTMENT-scoped rules must name an existing department
    let department: Option<RecordId> = match payload.rule_scope {
        RuleScope::Department => {
            let code = payload.department.as_deref().ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::RequiredField,
                    "department is required for DEPARTMENT-scoped rules",
                )
            })?;
            let code = normalize_department_code(code)?;
            let department = DepartmentRepository::new(state.db.clone())
                .find_by_code(&code)
                .await?
                .filter(|d| d.is_active)
                .ok_or_else(|| {
                    AppError::new(ErrorCode::DepartmentNotFound).with_detail("code", code)
                })?;
            Some(
                department
                    .id
                    .ok_or_else(|| AppError::internal("department record without id"))?,
            )
        }
        RuleScope::Global => None,
    };

    let repo = DiscountRuleRepository::new(state.db.clone());
    let rule = repo
        .create(DiscountRule {
            id: None,
            name: payload.name,
            description: payload.description,
            rule_scope: payload.rule_scope,
            department,
            adjustment_type: payload.adjustment_type,
            adjustment_value: payload.adjustment_value,
            valid_from: payload.valid_from,
            valid_until: payload.valid_until,
            priority: payload.priority.unwrap_or(0),
            is_stackable: payload.is_stackable.unwrap_or(false),
            is_active: true,
            created_at: now_millis(),
        })
        .await?;

    let id = rule.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE, SyncAction::Created, &id, Some(&rule));

    Ok(ok(rule))
}

/// PUT /api/discount-rules/:id - 更新规则
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<DiscountRuleUpdate>,
) -> AppResult<Json<ApiResponse<DiscountRule>>> {
    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let repo = DiscountRuleRepository::new(state.db.clone());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::DiscountRuleNotFound).with_detail("id", id.clone()))?;

    // Validate against the effective (merged) values
    let effective_type = payload.adjustment_type.unwrap_or(existing.adjustment_type);
    let effective_value = payload.adjustment_value.unwrap_or(existing.adjustment_value);
    validate_adjustment(effective_type, effective_value)?;
    validate_window(
        payload.valid_from.or(existing.valid_from),
        payload.valid_until.or(existing.valid_until),
    )?;

    let rule = repo.update(&id, payload).await?;

    let id = rule.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE, SyncAction::Updated, &id, Some(&rule));

    Ok(ok(rule))
}

/// DELETE /api/discount-rules/:id - 删除规则 (软删除)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let repo = DiscountRuleRepository::new(state.db.clone());
    // 404 before soft-deleting an unknown id
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::DiscountRuleNotFound).with_detail("id", id.clone()))?;

    let result = repo.soft_delete(&id).await?;

    if result {
        state.broadcast_sync::<()>(RESOURCE, SyncAction::Deleted, &id, None);
    }

    Ok(ok(result))
}
