//! Discount Rule Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{DiscountRule, DiscountRuleUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "discount_rule";

#[derive(Clone)]
pub struct DiscountRuleRepository {
    base: BaseRepository,
}

impl DiscountRuleRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active rules ordered by priority (highest first)
    pub async fn find_all(&self) -> RepoResult<Vec<DiscountRule>> {
        let rules: Vec<DiscountRule> = self
            .base
            .db()
            .query("SELECT * FROM discount_rule WHERE is_active = true ORDER BY priority DESC")
            .await?
            .take(0)?;
        Ok(rules)
    }

    /// Find rule by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DiscountRule>> {
        let record_id = parse_record_id(TABLE, id)?;
        let rule: Option<DiscountRule> = self.base.db().select(record_id).await?;
        Ok(rule)
    }

    /// Create a new rule
    pub async fn create(&self, rule: DiscountRule) -> RepoResult<DiscountRule> {
        let created: Option<DiscountRule> = self.base.db().create(TABLE).content(rule).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create discount rule".to_string()))
    }

    /// Update a rule
    pub async fn update(&self, id: &str, data: DiscountRuleUpdate) -> RepoResult<DiscountRule> {
        let record_id = parse_record_id(TABLE, id)?;
        let updated: Option<DiscountRule> = self.base.db().update(record_id).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Discount rule {} not found", id)))
    }

    /// Soft delete a rule (is_active = false)
    pub async fn soft_delete(&self, id: &str) -> RepoResult<bool> {
        self.update(
            id,
            DiscountRuleUpdate {
                name: None,
                description: None,
                adjustment_type: None,
                adjustment_value: None,
                valid_from: None,
                valid_until: None,
                priority: None,
                is_stackable: None,
                is_active: Some(false),
            },
        )
        .await?;
        Ok(true)
    }
}
