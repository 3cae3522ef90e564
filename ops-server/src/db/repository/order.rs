//! Order Repository
//!
//! Orders are stored as one document each (lines + payments embedded), so
//! settlement writes are single-record and need no cross-table transaction.

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Order, OrderStatus};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a new order
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let record_id = parse_record_id(TABLE, id)?;
        let order: Option<Order> = self.base.db().select(record_id).await?;
        Ok(order)
    }

    /// Find order by receipt number
    pub async fn find_by_receipt(&self, receipt_number: &str) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM order WHERE receipt_number = $receipt LIMIT 1")
            .bind(("receipt", receipt_number.to_string()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Persist the full state of an order
    ///
    /// Settlement and void mutate the in-memory order first, then write it
    /// back in one go.
    pub async fn save(&self, order: Order) -> RepoResult<Order> {
        let id = order
            .id
            .clone()
            .ok_or_else(|| RepoError::Database("order record without id".to_string()))?;

        // The record id addresses the write; the copy in the body is cleared
        let mut data = order;
        data.id = None;

        let updated: Option<Order> = self.base.db().update(id).content(data).await?;
        updated.ok_or_else(|| RepoError::NotFound("Order not found".to_string()))
    }

    /// Page through orders, newest first, optionally filtered by status
    /// and/or department code.
    pub async fn find_page(
        &self,
        status: Option<OrderStatus>,
        department_code: Option<String>,
        page: u32,
        per_page: u32,
    ) -> RepoResult<(Vec<Order>, u64)> {
        let mut conditions: Vec<&str> = Vec::new();
        if status.is_some() {
            conditions.push("status = $status");
        }
        if department_code.is_some() {
            conditions.push("department_code = $code");
        }
        let filter = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let start = (page.saturating_sub(1) as u64) * per_page as u64;

        let count_query = format!("SELECT count() FROM order{filter} GROUP ALL");
        let page_query = format!(
            "SELECT * FROM order{filter} ORDER BY opened_at DESC LIMIT {per_page} START {start}"
        );

        let mut q = self.base.db().query(count_query).query(page_query);
        if let Some(status) = status {
            q = q.bind(("status", status));
        }
        if let Some(code) = department_code {
            q = q.bind(("code", code));
        }
        let mut result = q.await?;

        let total: Option<i64> = result.take((0, "count"))?;
        let orders: Vec<Order> = result.take(1)?;
        Ok((orders, total.unwrap_or(0) as u64))
    }
}
