//! Server-level errors
//!
//! 区别于 `shared::AppError` (面向 API 响应)，`ServerError` 只用于
//! 启动/关闭路径：工作目录创建、数据库打开、端口绑定等。

use thiserror::Error;

/// Errors raised during server startup and shutdown
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type for server lifecycle operations
pub type Result<T> = std::result::Result<T, ServerError>;
