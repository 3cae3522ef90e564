//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] / [`AppResult`] - 应用错误类型 (from shared)
//! - [`ok`] - 成功响应辅助函数
//! - 日志、校验、时间工具

pub mod logger;
pub mod time;
pub mod validation;

use axum::Json;
use serde::Serialize;

// Re-export error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCode};

/// Create a successful response envelope
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}
