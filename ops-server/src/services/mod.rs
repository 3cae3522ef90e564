//! Service layer - 长生命周期服务

pub mod sync;

pub use sync::SyncService;
