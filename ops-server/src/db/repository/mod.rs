//! Repository Module
//!
//! Per-table CRUD operations on the embedded SurrealDB store.

// Organization
pub mod department;
pub mod section;

// Inventory
pub mod inventory_item;
pub mod stock;
pub mod transfer;

// Orders
pub mod order;

// Pricing
pub mod discount_rule;

// Staff
pub mod employee;

// Housekeeping
pub mod cleaning_task;

// Settings
pub mod exchange_rate;
pub mod tax_settings;

// Re-exports
pub use cleaning_task::CleaningTaskRepository;
pub use department::DepartmentRepository;
pub use discount_rule::DiscountRuleRepository;
pub use employee::EmployeeRepository;
pub use exchange_rate::ExchangeRateRepository;
pub use inventory_item::InventoryItemRepository;
pub use order::OrderRepository;
pub use section::SectionRepository;
pub use stock::StockRepository;
pub use tax_settings::TaxSettingsRepository;
pub use transfer::TransferRepository;

use shared::{AppError, ErrorCode};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::InsufficientStock(msg) => {
                AppError::with_message(ErrorCode::InsufficientStock, msg)
            }
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 使用 surrealdb::RecordId 处理所有 ID：
//   - 解析: parse_record_id("order", "order:abc")
//   - 创建: RecordId::from_table_key("order", "abc")
//   - CRUD: db.select(id) / db.delete(id) 直接使用 RecordId

/// Parse an id that may or may not carry its table prefix.
///
/// Rejects ids prefixed with a different table.
pub fn parse_record_id(table: &str, id: &str) -> RepoResult<RecordId> {
    match id.split_once(':') {
        Some((prefix, key)) if prefix == table => Ok(RecordId::from_table_key(table, key)),
        Some((prefix, _)) => Err(RepoError::Validation(format!(
            "expected a {table} id, got '{prefix}:...'"
        ))),
        None => Ok(RecordId::from_table_key(table, id)),
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
