//! Tax Settings Model
//!
//! 单例配置记录，固定 ID 寻址 (tax_settings:current)。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Fixed key of the singleton record
pub const TAX_SETTINGS_KEY: &str = "current";

/// Tax and currency settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxSettings {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Tax rate percent, 0-100
    pub tax_rate: f64,
    /// Whether listed prices already include tax
    pub prices_include_tax: bool,
    /// ISO-4217 code all amounts are quoted in
    pub base_currency: String,
    /// Service charge percent, 0-100 (0 disables)
    #[serde(default)]
    pub service_charge_rate: f64,
}

impl Default for TaxSettings {
    fn default() -> Self {
        Self {
            id: None,
            tax_rate: 10.0,
            prices_include_tax: true,
            base_currency: "EUR".to_string(),
            service_charge_rate: 0.0,
        }
    }
}

/// Update payload for `PUT /api/settings/tax`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prices_include_tax: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_charge_rate: Option<f64>,
}
