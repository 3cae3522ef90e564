//! Stock Level Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{StockLevel, StockLevelDetail};
use crate::utils::time::now_millis;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct StockRepository {
    base: BaseRepository,
}

impl StockRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Stock levels of one department with item fields flattened in
    pub async fn levels_for_department(
        &self,
        department: &RecordId,
    ) -> RepoResult<Vec<StockLevelDetail>> {
        let levels: Vec<StockLevelDetail> = self
            .base
            .db()
            .query(
                r#"
                SELECT
                    <string>id AS id,
                    <string>item AS item,
                    item.name AS item_name,
                    item.sku AS item_sku,
                    item.unit AS item_unit,
                    item.reorder_level AS reorder_level,
                    on_hand,
                    updated_at
                FROM stock_level
                WHERE department = $department
                ORDER BY item_name
                "#,
            )
            .bind(("department", department.clone()))
            .await?
            .take(0)?;
        Ok(levels)
    }

    /// Find the stock row of one (department, item) pair
    pub async fn find_level(
        &self,
        department: &RecordId,
        item: &RecordId,
    ) -> RepoResult<Option<StockLevel>> {
        let record_id = StockLevel::record_id(department, item);
        let level: Option<StockLevel> = self.base.db().select(record_id).await?;
        Ok(level)
    }

    /// Set the absolute quantity of a (department, item) pair
    ///
    /// Creates the row when it does not exist yet. `on_hand` must already be
    /// validated as non-negative by the caller.
    pub async fn upsert_level(
        &self,
        department: &RecordId,
        item: &RecordId,
        on_hand: i64,
    ) -> RepoResult<StockLevel> {
        let record_id = StockLevel::record_id(department, item);
        let mut result = self
            .base
            .db()
            .query(
                r#"
                UPSERT $record CONTENT {
                    department: $department,
                    item: $item,
                    on_hand: $on_hand,
                    updated_at: $now
                }
                "#,
            )
            .bind(("record", record_id))
            .bind(("department", department.clone()))
            .bind(("item", item.clone()))
            .bind(("on_hand", on_hand))
            .bind(("now", now_millis()))
            .await?;
        let upserted: Vec<StockLevel> = result.take(0)?;
        upserted
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to upsert stock level".to_string()))
    }

    /// Number of items a department still holds stock of
    pub async fn department_stock_count(&self, department: &RecordId) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT count() FROM stock_level WHERE department = $department AND on_hand > 0 GROUP ALL",
            )
            .bind(("department", department.clone()))
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;
        Ok(count.unwrap_or(0))
    }
}
