//! Error categories
//!
//! Coarse grouping of [`super::ErrorCode`] values. Categories decide the
//! HTTP status of a response and whether the error is logged as a system
//! failure.

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Error category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    /// Malformed or invalid request payloads (400)
    Validation,
    /// Authentication / permission failures (401/403)
    Access,
    /// Missing resources (404)
    NotFound,
    /// Uniqueness conflicts (409)
    Conflict,
    /// Domain rule violations (422)
    Business,
    /// Server-side failures (500)
    System,
}

impl ErrorCategory {
    /// HTTP status code for this category
    pub fn http_status(&self) -> StatusCode {
        match self {
            ErrorCategory::Validation => StatusCode::BAD_REQUEST,
            // Access covers both 401 and 403; ErrorCode::http_status picks
            // the precise one, 403 is the category default.
            ErrorCategory::Access => StatusCode::FORBIDDEN,
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::Conflict => StatusCode::CONFLICT,
            ErrorCategory::Business => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCategory::System => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether errors in this category should be logged as server failures
    pub const fn is_system(&self) -> bool {
        matches!(self, ErrorCategory::System)
    }
}
