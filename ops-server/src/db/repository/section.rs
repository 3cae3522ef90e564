//! Section Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{DepartmentSection, SectionUpdate};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "section";

#[derive(Clone)]
pub struct SectionRepository {
    base: BaseRepository,
}

impl SectionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active sections ordered by sort_order
    pub async fn find_all(&self) -> RepoResult<Vec<DepartmentSection>> {
        let sections: Vec<DepartmentSection> = self
            .base
            .db()
            .query("SELECT * FROM section WHERE is_active = true ORDER BY sort_order")
            .await?
            .take(0)?;
        Ok(sections)
    }

    /// Find active sections of one department
    pub async fn find_by_department(
        &self,
        department: &RecordId,
    ) -> RepoResult<Vec<DepartmentSection>> {
        let sections: Vec<DepartmentSection> = self
            .base
            .db()
            .query("SELECT * FROM section WHERE department = $department AND is_active = true ORDER BY sort_order")
            .bind(("department", department.clone()))
            .await?
            .take(0)?;
        Ok(sections)
    }

    /// Find section by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DepartmentSection>> {
        let record_id = parse_record_id(TABLE, id)?;
        let section: Option<DepartmentSection> = self.base.db().select(record_id).await?;
        Ok(section)
    }

    /// Create a new section
    pub async fn create(&self, section: DepartmentSection) -> RepoResult<DepartmentSection> {
        // A department must not have two active sections with the same name
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM section WHERE department = $department AND name = $name AND is_active = true LIMIT 1")
            .bind(("department", section.department.clone()))
            .bind(("name", section.name.clone()))
            .await?;
        let duplicates: Vec<DepartmentSection> = result.take(0)?;
        if !duplicates.is_empty() {
            return Err(RepoError::Duplicate(format!(
                "Section '{}' already exists in this department",
                section.name
            )));
        }

        let created: Option<DepartmentSection> =
            self.base.db().create(TABLE).content(section).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create section".to_string()))
    }

    /// Update a section
    pub async fn update(&self, id: &str, data: SectionUpdate) -> RepoResult<DepartmentSection> {
        let record_id = parse_record_id(TABLE, id)?;
        let updated: Option<DepartmentSection> =
            self.base.db().update(record_id).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Section {} not found", id)))
    }

    /// Soft delete a section (is_active = false)
    pub async fn soft_delete(&self, id: &str) -> RepoResult<bool> {
        self.update(
            id,
            SectionUpdate {
                name: None,
                floor: None,
                sort_order: None,
                is_active: Some(false),
            },
        )
        .await?;
        Ok(true)
    }
}
