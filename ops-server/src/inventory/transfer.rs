//! Inter-department stock transfer
//!
//! 校验在这里完成 (目标部门存在且启用、数量为正、不能自转、源库存行
//! 存在且足够)；实际的库存移动由 [`TransferRepository::execute`] 在一个
//! 数据库事务里执行，事务内的守卫保证并发调拨不会把源库存打成负数。

use shared::{AppError, ErrorCode};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{StockTransfer, TransferRequest, TransferStatus};
use crate::db::repository::{
    DepartmentRepository, InventoryItemRepository, StockRepository, TransferRepository,
};
use crate::utils::time::now_millis;
use crate::utils::validation::{
    MAX_NOTE_LEN, normalize_department_code, validate_optional_text, validate_quantity,
};

/// Generate a transfer reference: `TRF-xxxxxxxxxxxx`
pub fn new_transfer_reference() -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("TRF-{}", &suffix[..12])
}

/// Stock movement orchestration
#[derive(Clone)]
pub struct TransferService {
    departments: DepartmentRepository,
    items: InventoryItemRepository,
    stock: StockRepository,
    transfers: TransferRepository,
}

impl TransferService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            departments: DepartmentRepository::new(db.clone()),
            items: InventoryItemRepository::new(db.clone()),
            stock: StockRepository::new(db.clone()),
            transfers: TransferRepository::new(db),
        }
    }

    /// Move stock from the department addressed by `from_code` to the
    /// requested destination, returning the persisted audit row.
    pub async fn transfer(
        &self,
        from_code: &str,
        request: TransferRequest,
    ) -> Result<StockTransfer, AppError> {
        validate_quantity(request.quantity, "quantity")?;
        validate_optional_text(&request.note, "note", MAX_NOTE_LEN)?;

        let from_code = normalize_department_code(from_code)?;
        let to_code = normalize_department_code(&request.to_department)?;
        if from_code == to_code {
            return Err(AppError::with_message(
                ErrorCode::BusinessRuleViolation,
                "Source and destination departments must differ",
            ));
        }

        let source = self
            .departments
            .find_by_code(&from_code)
            .await?
            .filter(|d| d.is_active)
            .ok_or_else(|| {
                AppError::new(ErrorCode::DepartmentNotFound).with_detail("code", from_code.clone())
            })?;
        let destination = self
            .departments
            .find_by_code(&to_code)
            .await?
            .filter(|d| d.is_active)
            .ok_or_else(|| {
                AppError::new(ErrorCode::DepartmentNotFound).with_detail("code", to_code.clone())
            })?;

        let item = self
            .items
            .find_by_id(&request.item)
            .await?
            .filter(|i| i.is_active)
            .ok_or_else(|| {
                AppError::new(ErrorCode::ItemNotFound).with_detail("item", request.item.clone())
            })?;

        let source_id = source
            .id
            .ok_or_else(|| AppError::internal("department record without id"))?;
        let destination_id = destination
            .id
            .ok_or_else(|| AppError::internal("department record without id"))?;
        let item_id = item
            .id
            .ok_or_else(|| AppError::internal("item record without id"))?;

        // Friendly pre-check; the transaction guard re-checks under isolation
        let level = self
            .stock
            .find_level(&source_id, &item_id)
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::StockLevelNotFound)
                    .with_detail("department", from_code.clone())
                    .with_detail("item", item_id.to_string())
            })?;
        if level.on_hand < request.quantity {
            return Err(AppError::new(ErrorCode::InsufficientStock)
                .with_detail("on_hand", level.on_hand)
                .with_detail("requested", request.quantity));
        }

        let transfer = StockTransfer {
            id: None,
            reference: new_transfer_reference(),
            item: item_id,
            from_department: source_id,
            to_department: destination_id,
            quantity: request.quantity,
            note: request.note,
            requested_by: request.requested_by,
            status: TransferStatus::Completed,
            created_at: now_millis(),
        };

        let executed = self.transfers.execute(transfer).await?;

        tracing::info!(
            reference = %executed.reference,
            from = %from_code,
            to = %to_code,
            quantity = executed.quantity,
            "stock transferred"
        );

        Ok(executed)
    }
}
