//! Cleaning Task Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{CleaningTask, TaskStatus, serde_helpers};
use crate::utils::time::now_millis;
use serde::Serialize;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "cleaning_task";

/// Field patch applied by update; updated_at always rides along
#[derive(Debug, Serialize)]
pub struct CleaningTaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub assignee: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub updated_at: i64,
}

#[derive(Clone)]
pub struct CleaningTaskRepository {
    base: BaseRepository,
}

impl CleaningTaskRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find tasks, optionally filtered by status and/or section,
    /// oldest due date first
    pub async fn find_all(
        &self,
        status: Option<TaskStatus>,
        section: Option<RecordId>,
    ) -> RepoResult<Vec<CleaningTask>> {
        let mut conditions: Vec<&str> = Vec::new();
        if status.is_some() {
            conditions.push("status = $status");
        }
        if section.is_some() {
            conditions.push("section = $section");
        }
        let filter = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let mut q = self
            .base
            .db()
            .query(format!("SELECT * FROM cleaning_task{filter} ORDER BY due_at"));
        if let Some(status) = status {
            q = q.bind(("status", status));
        }
        if let Some(section) = section {
            q = q.bind(("section", section));
        }
        let tasks: Vec<CleaningTask> = q.await?.take(0)?;
        Ok(tasks)
    }

    /// Find task by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<CleaningTask>> {
        let record_id = parse_record_id(TABLE, id)?;
        let task: Option<CleaningTask> = self.base.db().select(record_id).await?;
        Ok(task)
    }

    /// Create a new task
    pub async fn create(&self, task: CleaningTask) -> RepoResult<CleaningTask> {
        let created: Option<CleaningTask> = self.base.db().create(TABLE).content(task).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create cleaning task".to_string()))
    }

    /// Merge field updates into a task
    ///
    /// Status changes use [`set_status`](Self::set_status) so the transition
    /// check cannot be bypassed.
    pub async fn update(&self, id: &str, patch: CleaningTaskPatch) -> RepoResult<CleaningTask> {
        let record_id = parse_record_id(TABLE, id)?;
        let updated: Option<CleaningTask> = self.base.db().update(record_id).merge(patch).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Cleaning task {} not found", id)))
    }

    /// Persist a status change
    pub async fn set_status(&self, id: &str, status: TaskStatus) -> RepoResult<CleaningTask> {
        #[derive(Serialize)]
        struct StatusPatch {
            status: TaskStatus,
            updated_at: i64,
        }
        let record_id = parse_record_id(TABLE, id)?;
        let updated: Option<CleaningTask> = self
            .base
            .db()
            .update(record_id)
            .merge(StatusPatch {
                status,
                updated_at: now_millis(),
            })
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Cleaning task {} not found", id)))
    }

    /// Hard delete a task
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let record_id = parse_record_id(TABLE, id)?;
        let deleted: Option<CleaningTask> = self.base.db().delete(record_id).await?;
        Ok(deleted.is_some())
    }
}
