//! Transfer Repository
//!
//! 调拨的三步写 (扣减源库存 / 增加目标库存 / 写审计行) 在一个数据库
//! 事务里执行，扣减带 on_hand 守卫；守卫失败 THROW 回滚整个事务。

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{StockLevel, StockTransfer, TransferDetail};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "transfer";

/// THROW markers used inside the transfer transaction
const THROW_INSUFFICIENT: &str = "INSUFFICIENT_STOCK";
const THROW_SOURCE_MISSING: &str = "SOURCE_STOCK_MISSING";

#[derive(Clone)]
pub struct TransferRepository {
    base: BaseRepository,
}

impl TransferRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Execute a stock movement atomically and persist its audit row.
    ///
    /// The caller has already validated quantity, departments and item; the
    /// transaction re-checks the source quantity so a concurrent transfer
    /// can never drive `on_hand` negative.
    pub async fn execute(&self, transfer: StockTransfer) -> RepoResult<StockTransfer> {
        let src_level = StockLevel::record_id(&transfer.from_department, &transfer.item);
        let dst_level = StockLevel::record_id(&transfer.to_department, &transfer.item);

        let result = self
            .base
            .db()
            .query(
                r#"
                BEGIN TRANSACTION;

                LET $src = (SELECT * FROM ONLY $src_level);
                IF $src == NONE { THROW "SOURCE_STOCK_MISSING" };
                IF $src.on_hand < $quantity { THROW "INSUFFICIENT_STOCK" };

                UPDATE $src_level SET on_hand -= $quantity, updated_at = $now;

                LET $dst = (SELECT * FROM ONLY $dst_level);
                IF $dst == NONE {
                    CREATE $dst_level CONTENT {
                        department: $to_department,
                        item: $item,
                        on_hand: $quantity,
                        updated_at: $now
                    };
                } ELSE {
                    UPDATE $dst_level SET on_hand += $quantity, updated_at = $now;
                };

                CREATE transfer CONTENT {
                    reference: $reference,
                    item: $item,
                    from_department: $from_department,
                    to_department: $to_department,
                    quantity: $quantity,
                    note: $note,
                    requested_by: $requested_by,
                    status: 'COMPLETED',
                    created_at: $now
                };

                COMMIT TRANSACTION;
                "#,
            )
            .bind(("src_level", src_level))
            .bind(("dst_level", dst_level))
            .bind(("item", transfer.item.clone()))
            .bind(("from_department", transfer.from_department.clone()))
            .bind(("to_department", transfer.to_department.clone()))
            .bind(("quantity", transfer.quantity))
            .bind(("reference", transfer.reference.clone()))
            .bind(("note", transfer.note.clone()))
            .bind(("requested_by", transfer.requested_by.clone()))
            .bind(("now", transfer.created_at))
            .await?;

        if let Err(e) = result.check() {
            return Err(Self::map_transfer_error(e, &transfer));
        }

        self.find_by_reference(&transfer.reference)
            .await?
            .ok_or_else(|| RepoError::Database("Transfer row missing after commit".to_string()))
    }

    /// Map THROW markers back to typed repository errors
    fn map_transfer_error(err: surrealdb::Error, transfer: &StockTransfer) -> RepoError {
        let msg = err.to_string();
        if msg.contains(THROW_INSUFFICIENT) {
            RepoError::InsufficientStock(format!(
                "department {} holds less than {} of {}",
                transfer.from_department, transfer.quantity, transfer.item
            ))
        } else if msg.contains(THROW_SOURCE_MISSING) {
            RepoError::NotFound(format!(
                "department {} has no stock record for {}",
                transfer.from_department, transfer.item
            ))
        } else {
            RepoError::Database(msg)
        }
    }

    /// Find a transfer audit row by its reference
    pub async fn find_by_reference(&self, reference: &str) -> RepoResult<Option<StockTransfer>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM transfer WHERE reference = $reference LIMIT 1")
            .bind(("reference", reference.to_string()))
            .await?;
        let transfers: Vec<StockTransfer> = result.take(0)?;
        Ok(transfers.into_iter().next())
    }

    /// Find a transfer by id with codes and item name flattened in
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<TransferDetail>> {
        let record_id = parse_record_id(TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query(format!("{} WHERE id = $id", Self::DETAIL_SELECT))
            .bind(("id", record_id))
            .await?;
        let transfers: Vec<TransferDetail> = result.take(0)?;
        Ok(transfers.into_iter().next())
    }

    /// Page through transfers, optionally filtered to one department
    /// (as source or destination), newest first.
    pub async fn find_page(
        &self,
        department: Option<RecordId>,
        page: u32,
        per_page: u32,
    ) -> RepoResult<(Vec<TransferDetail>, u64)> {
        let filter = if department.is_some() {
            " WHERE from_department = $department OR to_department = $department"
        } else {
            ""
        };
        let start = (page.saturating_sub(1) as u64) * per_page as u64;

        let count_query = format!("SELECT count() FROM transfer{filter} GROUP ALL");
        let page_query = format!(
            "{}{} ORDER BY created_at DESC LIMIT {} START {}",
            Self::DETAIL_SELECT,
            filter,
            per_page,
            start
        );

        let mut q = self.base.db().query(count_query).query(page_query);
        if let Some(department) = department {
            q = q.bind(("department", department));
        }
        let mut result = q.await?;

        let total: Option<i64> = result.take((0, "count"))?;
        let transfers: Vec<TransferDetail> = result.take(1)?;
        Ok((transfers, total.unwrap_or(0) as u64))
    }

    const DETAIL_SELECT: &'static str = r#"
        SELECT
            <string>id AS id,
            reference,
            <string>item AS item,
            item.name AS item_name,
            from_department.code AS from_code,
            to_department.code AS to_code,
            quantity,
            note,
            requested_by,
            status,
            created_at
        FROM transfer"#;
}
