//! Exchange Rate Repository
//!
//! Rates are addressed by currency code; the record key is the code itself.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::ExchangeRate;
use crate::utils::time::now_millis;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "exchange_rate";

#[derive(Clone)]
pub struct ExchangeRateRepository {
    base: BaseRepository,
}

impl ExchangeRateRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn record_id(currency: &str) -> RecordId {
        RecordId::from_table_key(TABLE, currency)
    }

    /// Find all rates ordered by currency code
    pub async fn find_all(&self) -> RepoResult<Vec<ExchangeRate>> {
        let rates: Vec<ExchangeRate> = self
            .base
            .db()
            .query("SELECT * FROM exchange_rate ORDER BY currency")
            .await?
            .take(0)?;
        Ok(rates)
    }

    /// Find rate for one currency
    pub async fn find_by_currency(&self, currency: &str) -> RepoResult<Option<ExchangeRate>> {
        let rate: Option<ExchangeRate> = self.base.db().select(Self::record_id(currency)).await?;
        Ok(rate)
    }

    /// Create or replace the rate for one currency
    pub async fn upsert(&self, currency: &str, rate: f64) -> RepoResult<ExchangeRate> {
        let mut result = self
            .base
            .db()
            .query(
                r#"
                UPSERT $record CONTENT {
                    currency: $currency,
                    rate: $rate,
                    updated_at: $now
                }
                "#,
            )
            .bind(("record", Self::record_id(currency)))
            .bind(("currency", currency.to_string()))
            .bind(("rate", rate))
            .bind(("now", now_millis()))
            .await?;
        let upserted: Vec<ExchangeRate> = result.take(0)?;
        upserted
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to upsert exchange rate".to_string()))
    }

    /// Delete the rate for one currency
    pub async fn delete(&self, currency: &str) -> RepoResult<bool> {
        let deleted: Option<ExchangeRate> =
            self.base.db().delete(Self::record_id(currency)).await?;
        Ok(deleted.is_some())
    }
}
