//! Inventory Item Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{InventoryItem, InventoryItemUpdate};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "inventory_item";

#[derive(Clone)]
pub struct InventoryItemRepository {
    base: BaseRepository,
}

impl InventoryItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active items ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<InventoryItem>> {
        let items: Vec<InventoryItem> = self
            .base
            .db()
            .query("SELECT * FROM inventory_item WHERE is_active = true ORDER BY name")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<InventoryItem>> {
        let record_id = parse_record_id(TABLE, id)?;
        let item: Option<InventoryItem> = self.base.db().select(record_id).await?;
        Ok(item)
    }

    /// Find item by SKU
    pub async fn find_by_sku(&self, sku: &str) -> RepoResult<Option<InventoryItem>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM inventory_item WHERE sku = $sku LIMIT 1")
            .bind(("sku", sku.to_string()))
            .await?;
        let items: Vec<InventoryItem> = result.take(0)?;
        Ok(items.into_iter().next())
    }

    /// Create a new item
    pub async fn create(&self, item: InventoryItem) -> RepoResult<InventoryItem> {
        if self.find_by_sku(&item.sku).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "SKU '{}' already exists",
                item.sku
            )));
        }

        let created: Option<InventoryItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create inventory item".to_string()))
    }

    /// Update an item
    pub async fn update(&self, id: &str, data: InventoryItemUpdate) -> RepoResult<InventoryItem> {
        let record_id = parse_record_id(TABLE, id)?;
        let updated: Option<InventoryItem> = self.base.db().update(record_id).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Inventory item {} not found", id)))
    }

    /// Soft delete an item (is_active = false)
    pub async fn soft_delete(&self, id: &str) -> RepoResult<bool> {
        self.update(
            id,
            InventoryItemUpdate {
                name: None,
                unit: None,
                unit_cost: None,
                reorder_level: None,
                is_active: Some(false),
            },
        )
        .await?;
        Ok(true)
    }

    /// Whether any department still holds stock of this item
    pub async fn has_stock(&self, item: &RecordId) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM stock_level WHERE item = $item AND on_hand > 0 GROUP ALL")
            .bind(("item", item.clone()))
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;
        Ok(count.unwrap_or(0) > 0)
    }
}
