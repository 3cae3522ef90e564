//! API response types
//!
//! Every endpoint answers with the same envelope:
//!
//! ```json
//! { "success": true,  "data": { ... } }
//! { "success": false, "error": { "code": "NOT_FOUND", "message": "..." } }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorBody};

/// Unified API response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response payload (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error body (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response from an [`AppError`]
    pub fn failure(err: &AppError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody::from(err)),
        }
    }
}

impl ApiResponse<()> {
    /// Create a successful response without a payload
    pub fn ok() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = match &self.error {
            Some(body) => body.code.http_status(),
            None => http::StatusCode::OK,
        };
        (status, Json(self)).into_response()
    }
}

/// Pagination metadata
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Pagination {
    /// Current page number (1-based)
    pub page: u32,
    /// Items per page
    pub per_page: u32,
    /// Total number of items
    pub total: u64,
    /// Total number of pages
    pub total_pages: u32,
}

impl Pagination {
    /// Create a new pagination
    pub fn new(page: u32, per_page: u32, total: u64) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(per_page as u64) as u32
        };
        Self {
            page,
            per_page,
            total,
            total_pages,
        }
    }
}

/// Paginated response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// List of items
    pub items: Vec<T>,
    /// Pagination metadata
    pub pagination: Pagination,
}

impl<T> PaginatedResponse<T> {
    /// Create a new paginated response
    pub fn new(items: Vec<T>, page: u32, per_page: u32, total: u64) -> Self {
        Self {
            items,
            pagination: Pagination::new(page, per_page, total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_success_envelope() {
        let response = ApiResponse::success(42);
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"success":true,"data":42}"#);
    }

    #[test]
    fn test_failure_envelope() {
        let err = AppError::new(ErrorCode::OrderNotFound);
        let response = ApiResponse::<()>::failure(&err);
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""success":false"#));
        assert!(json.contains(r#""code":"ORDER_NOT_FOUND""#));
        assert!(!json.contains("data"));
    }

    #[test]
    fn test_pagination_rounding() {
        let p = Pagination::new(1, 20, 45);
        assert_eq!(p.total_pages, 3);

        let p = Pagination::new(1, 20, 40);
        assert_eq!(p.total_pages, 2);

        let p = Pagination::new(1, 0, 40);
        assert_eq!(p.total_pages, 0);
    }

    #[test]
    fn test_envelope_roundtrip() {
        let response = ApiResponse::success(vec!["a".to_string(), "b".to_string()]);
        let json = serde_json::to_string(&response).unwrap();
        let parsed: ApiResponse<Vec<String>> = serde_json::from_str(&json).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.data.unwrap().len(), 2);
    }
}
