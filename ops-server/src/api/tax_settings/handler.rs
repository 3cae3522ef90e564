//! Tax Settings API Handlers

use axum::{Json, extract::State};
use shared::{ApiResponse, AppError, AppResult, SyncAction};

use crate::core::ServerState;
use crate::db::models::{TaxSettings, TaxSettingsUpdate};
use crate::db::repository::TaxSettingsRepository;
use crate::utils::ok;
use crate::utils::validation::normalize_currency_code;

const RESOURCE: &str = "tax_settings";

fn validate_rate(value: f64, field: &str) -> AppResult<()> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(AppError::validation(format!(
            "{field} must be between 0 and 100, got {value}"
        )));
    }
    Ok(())
}

/// GET /api/settings/tax - 当前税务设置
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<TaxSettings>>> {
    let repo = TaxSettingsRepository::new(state.db.clone());
    let settings = repo.get().await?;
    Ok(ok(settings))
}

/// PUT /api/settings/tax - 更新税务设置
pub async fn update(
    State(state): State<ServerState>,
    Json(mut payload): Json<TaxSettingsUpdate>,
) -> AppResult<Json<ApiResponse<TaxSettings>>> {
    if let Some(rate) = payload.tax_rate {
        validate_rate(rate, "tax_rate")?;
    }
    if let Some(rate) = payload.service_charge_rate {
        validate_rate(rate, "service_charge_rate")?;
    }
    if let Some(ref currency) = payload.base_currency {
        payload.base_currency = Some(normalize_currency_code(currency)?);
    }

    let repo = TaxSettingsRepository::new(state.db.clone());
    let settings = repo.update(payload).await?;

    state.broadcast_sync(RESOURCE, SyncAction::Updated, "tax_settings:current", Some(&settings));

    Ok(ok(settings))
}
