//! Exchange Rate API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::{ApiResponse, AppError, AppResult, ErrorCode, SyncAction};

use crate::core::ServerState;
use crate::db::models::{ExchangeRate, ExchangeRateUpsert};
use crate::db::repository::ExchangeRateRepository;
use crate::utils::ok;
use crate::utils::validation::normalize_currency_code;

const RESOURCE: &str = "exchange_rate";

/// GET /api/exchange-rates - 获取所有汇率
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<ExchangeRate>>>> {
    let repo = ExchangeRateRepository::new(state.db.clone());
    let rates = repo.find_all().await?;
    Ok(ok(rates))
}

/// PUT /api/exchange-rates/:currency - 创建或更新汇率
pub async fn upsert(
    State(state): State<ServerState>,
    Path(currency): Path<String>,
    Json(payload): Json<ExchangeRateUpsert>,
) -> AppResult<Json<ApiResponse<ExchangeRate>>> {
    let currency = normalize_currency_code(&currency)?;
    if !payload.rate.is_finite() || payload.rate <= 0.0 {
        return Err(AppError::validation(format!(
            "rate must be a positive number, got {}",
            payload.rate
        )));
    }

    let repo = ExchangeRateRepository::new(state.db.clone());
    let rate = repo.upsert(&currency, payload.rate).await?;

    let id = rate.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE, SyncAction::Updated, &id, Some(&rate));

    Ok(ok(rate))
}

/// DELETE /api/exchange-rates/:currency - 删除汇率
pub async fn delete(
    State(state): State<ServerState>,
    Path(currency): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let currency = normalize_currency_code(&currency)?;
    let repo = ExchangeRateRepository::new(state.db.clone());
    let result = repo.delete(&currency).await?;
    if !result {
        return Err(
            AppError::new(ErrorCode::ExchangeRateNotFound).with_detail("currency", currency)
        );
    }

    state.broadcast_sync::<()>(RESOURCE, SyncAction::Deleted, &currency, None);

    Ok(ok(result))
}
