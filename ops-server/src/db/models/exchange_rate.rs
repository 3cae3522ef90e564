//! Exchange Rate Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Exchange rate, quoted against the base currency in tax settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRate {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// ISO-4217 code, unique (e.g. "USD")
    pub currency: String,
    /// Units of this currency per one base unit, > 0
    pub rate: f64,
    pub updated_at: i64,
}

/// Upsert payload for `PUT /api/exchange-rates/{currency}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRateUpsert {
    pub rate: f64,
}
