//! Employee Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Employee, EmployeeUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "employee";

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all non-blocked employees ordered by staff number
    pub async fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let employees: Vec<Employee> = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE blocked = false ORDER BY staff_number")
            .await?
            .take(0)?;
        Ok(employees)
    }

    /// Find employee by id (blocked or not)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        let record_id = parse_record_id(TABLE, id)?;
        let employee: Option<Employee> = self.base.db().select(record_id).await?;
        Ok(employee)
    }

    /// Find employee by staff number
    pub async fn find_by_staff_number(&self, staff_number: &str) -> RepoResult<Option<Employee>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE staff_number = $staff_number LIMIT 1")
            .bind(("staff_number", staff_number.to_string()))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    /// Create a new employee
    pub async fn create(&self, employee: Employee) -> RepoResult<Employee> {
        if self
            .find_by_staff_number(&employee.staff_number)
            .await?
            .is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Staff number '{}' already exists",
                employee.staff_number
            )));
        }

        let created: Option<Employee> = self.base.db().create(TABLE).content(employee).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create employee".to_string()))
    }

    /// Update an employee
    pub async fn update(&self, id: &str, data: EmployeeUpdate) -> RepoResult<Employee> {
        let record_id = parse_record_id(TABLE, id)?;
        let updated: Option<Employee> = self.base.db().update(record_id).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))
    }

    /// Block an employee (soft delete)
    pub async fn block(&self, id: &str) -> RepoResult<bool> {
        self.update(
            id,
            EmployeeUpdate {
                full_name: None,
                email: None,
                phone: None,
                employment: None,
                blocked: Some(true),
            },
        )
        .await?;
        Ok(true)
    }
}
