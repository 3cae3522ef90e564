//! Inventory domain - 部门间库存调拨

pub mod transfer;

pub use transfer::TransferService;
