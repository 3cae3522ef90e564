//! Shared types for the Harbor operations backend
//!
//! Cross-cutting pieces used by the server (and any future in-process
//! consumers): error codes, the unified response envelope, pagination
//! helpers and the resource-sync message payloads.

pub mod error;
pub mod message;
pub mod response;

pub use error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};
pub use message::{SyncAction, SyncPayload};
pub use response::{ApiResponse, PaginatedResponse, Pagination};
