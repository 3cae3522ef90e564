//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine) initialization and access.

pub mod models;
pub mod repository;

use shared::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

/// Namespace / database names for the embedded store
const NAMESPACE: &str = "harbor";
const DATABASE: &str = "ops";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database at `db_path` and define the
    /// uniqueness indexes the repositories rely on.
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        Self::define_indexes(&db).await?;

        tracing::info!("Database ready at {db_path} (SurrealDB embedded, RocksDB)");
        Ok(Self { db })
    }

    /// Uniqueness constraints enforced by the store itself.
    ///
    /// Repositories also pre-check duplicates to return friendly errors;
    /// the indexes close the race between check and write.
    async fn define_indexes(db: &Surreal<Db>) -> Result<(), AppError> {
        let statements = [
            "DEFINE INDEX IF NOT EXISTS department_code ON department FIELDS code UNIQUE",
            "DEFINE INDEX IF NOT EXISTS item_sku ON inventory_item FIELDS sku UNIQUE",
            "DEFINE INDEX IF NOT EXISTS stock_department_item ON stock_level FIELDS department, item UNIQUE",
            "DEFINE INDEX IF NOT EXISTS transfer_reference ON transfer FIELDS reference UNIQUE",
            "DEFINE INDEX IF NOT EXISTS order_receipt ON order FIELDS receipt_number UNIQUE",
            "DEFINE INDEX IF NOT EXISTS employee_staff_number ON employee FIELDS staff_number UNIQUE",
            "DEFINE INDEX IF NOT EXISTS exchange_rate_currency ON exchange_rate FIELDS currency UNIQUE",
        ];
        for stmt in statements {
            db.query(stmt)
                .await
                .map_err(|e| AppError::database(format!("Failed to define index: {e}")))?;
        }
        Ok(())
    }
}
