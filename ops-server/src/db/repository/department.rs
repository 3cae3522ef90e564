//! Department Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Department, DepartmentUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "department";

#[derive(Clone)]
pub struct DepartmentRepository {
    base: BaseRepository,
}

impl DepartmentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active departments ordered by sort_order
    pub async fn find_all(&self) -> RepoResult<Vec<Department>> {
        let departments: Vec<Department> = self
            .base
            .db()
            .query("SELECT * FROM department WHERE is_active = true ORDER BY sort_order")
            .await?
            .take(0)?;
        Ok(departments)
    }

    /// Find a department by its code (active or not)
    pub async fn find_by_code(&self, code: &str) -> RepoResult<Option<Department>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM department WHERE code = $code LIMIT 1")
            .bind(("code", code.to_string()))
            .await?;
        let departments: Vec<Department> = result.take(0)?;
        Ok(departments.into_iter().next())
    }

    /// Create a new department
    ///
    /// The code must already be normalized (uppercase) by the caller.
    pub async fn create(&self, department: Department) -> RepoResult<Department> {
        // Check duplicate code; the unique index closes the race
        if self.find_by_code(&department.code).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Department '{}' already exists",
                department.code
            )));
        }

        let created: Option<Department> =
            self.base.db().create(TABLE).content(department).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create department".to_string()))
    }

    /// Update a department addressed by code
    pub async fn update_by_code(
        &self,
        code: &str,
        data: DepartmentUpdate,
    ) -> RepoResult<Department> {
        let existing = self
            .find_by_code(code)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Department {} not found", code)))?;

        let id = existing
            .id
            .ok_or_else(|| RepoError::Database("department record without id".to_string()))?;

        let updated: Option<Department> = self.base.db().update(id).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Department {} not found", code)))
    }

    /// Soft delete a department (is_active = false)
    ///
    /// Stock checks are done by the caller before getting here.
    pub async fn soft_delete(&self, code: &str) -> RepoResult<bool> {
        let existing = self
            .find_by_code(code)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Department {} not found", code)))?;

        let id = existing
            .id
            .ok_or_else(|| RepoError::Database("department record without id".to_string()))?;

        let _: Option<Department> = self
            .base
            .db()
            .update(id)
            .merge(DepartmentUpdate {
                name: None,
                description: None,
                sort_order: None,
                is_active: Some(false),
            })
            .await?;

        Ok(true)
    }
}
