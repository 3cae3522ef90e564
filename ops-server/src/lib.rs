//! Harbor Ops Server - 酒店运营管理后端
//!
//! # 架构概述
//!
//! 本模块是 Ops Server 的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **HTTP API** (`api`): RESTful API 接口 (部门/库存/订单/员工/清洁任务)
//! - **订单结算** (`orders`): 挂账订单的结算与付款核算
//! - **库存调拨** (`inventory`): 部门间库存转移 (事务化)
//! - **同步总线** (`services/sync`): 资源变更广播
//!
//! # 模块结构
//!
//! ```text
//! ops-server/src/
//! ├── core/          # 配置、状态、服务器、后台任务
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (模型 + 仓储)
//! ├── orders/        # 金额计算、折扣定价、结算
//! ├── inventory/     # 库存调拨
//! ├── services/      # 同步总线
//! └── utils/         # 日志、校验等工具
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod inventory;
pub mod orders;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use services::SyncService;

// Re-export unified error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    __  __           __
   / / / /___ ______/ /_  ____  _____
  / /_/ / __ `/ ___/ __ \/ __ \/ ___/
 / __  / /_/ / /  / /_/ / /_/ / /
/_/ /_/\__,_/_/  /_.___/\____/_/
    ____
   / __ \____  _____
  / / / / __ \/ ___/
 / /_/ / /_/ (__  )
 \____/ .___/____/
     /_/
    "#
    );
}

/// 设置运行环境 (dotenv + 日志)
///
/// 必须在 `Config::from_env()` 之前调用，否则 .env 中的配置不会生效。
pub fn setup_environment() -> anyhow::Result<()> {
    // Load .env if present; a missing file is not an error
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}
