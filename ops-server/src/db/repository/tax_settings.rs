//! Tax Settings Repository
//!
//! 单例记录：不存在时 GET 返回默认值，PUT 先物化默认值再合并更新。

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::tax_settings::TAX_SETTINGS_KEY;
use crate::db::models::{TaxSettings, TaxSettingsUpdate};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "tax_settings";

#[derive(Clone)]
pub struct TaxSettingsRepository {
    base: BaseRepository,
}

impl TaxSettingsRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn record_id() -> RecordId {
        RecordId::from_table_key(TABLE, TAX_SETTINGS_KEY)
    }

    /// Current settings, falling back to defaults when none are stored yet
    pub async fn get(&self) -> RepoResult<TaxSettings> {
        let settings: Option<TaxSettings> = self.base.db().select(Self::record_id()).await?;
        Ok(settings.unwrap_or_default())
    }

    /// Merge an update into the singleton record, creating it if missing
    pub async fn update(&self, data: TaxSettingsUpdate) -> RepoResult<TaxSettings> {
        // Materialize defaults first so a partial first update is complete
        let current = self.get().await?;
        let mut result = self
            .base
            .db()
            .query(
                r#"
                UPSERT $record CONTENT {
                    tax_rate: $tax_rate,
                    prices_include_tax: $prices_include_tax,
                    base_currency: $base_currency,
                    service_charge_rate: $service_charge_rate
                }
                "#,
            )
            .bind(("record", Self::record_id()))
            .bind(("tax_rate", data.tax_rate.unwrap_or(current.tax_rate)))
            .bind((
                "prices_include_tax",
                data.prices_include_tax
                    .unwrap_or(current.prices_include_tax),
            ))
            .bind((
                "base_currency",
                data.base_currency.unwrap_or(current.base_currency),
            ))
            .bind((
                "service_charge_rate",
                data.service_charge_rate
                    .unwrap_or(current.service_charge_rate),
            ))
            .await?;
        let updated: Vec<TaxSettings> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to update tax settings".to_string()))
    }
}
