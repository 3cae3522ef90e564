//! Error codes for the Harbor operations backend
//!
//! Codes are stable SCREAMING_SNAKE_CASE strings carried in the response
//! envelope so that terminals and the admin dashboard can branch on them
//! without parsing messages. They are organized by domain:
//! - general request/validation errors
//! - access errors
//! - department / inventory / transfer errors
//! - order / settlement errors
//! - staff, housekeeping and settings errors
//! - system errors

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::ErrorCategory;

/// Unified error code enum
///
/// Serialized as its SCREAMING_SNAKE_CASE name (e.g. `"VALIDATION_ERROR"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ==================== General ====================
    /// Request payload failed validation
    ValidationError,
    /// Resource not found
    NotFound,
    /// Resource already exists
    AlreadyExists,
    /// Request is malformed or inconsistent
    InvalidRequest,
    /// Required field is missing
    RequiredField,
    /// Value out of the accepted range
    ValueOutOfRange,
    /// Generic business rule violation
    BusinessRuleViolation,

    // ==================== Access ====================
    /// Caller is not authenticated
    Unauthorized,
    /// Caller lacks permission for this operation
    Forbidden,

    // ==================== Departments ====================
    /// Department not found
    DepartmentNotFound,
    /// Department code already exists
    DepartmentCodeExists,
    /// Department still holds stock
    DepartmentHasStock,
    /// Section not found
    SectionNotFound,

    // ==================== Inventory ====================
    /// Inventory item not found
    ItemNotFound,
    /// SKU already exists
    SkuExists,
    /// Item still has stock in some department
    ItemHasStock,
    /// No stock record for this department/item pair
    StockLevelNotFound,
    /// Requested quantity exceeds the source department's stock
    InsufficientStock,
    /// Transfer not found
    TransferNotFound,

    // ==================== Orders & settlement ====================
    /// Order not found
    OrderNotFound,
    /// Order has no lines
    OrderEmpty,
    /// Order is already fully settled
    OrderAlreadySettled,
    /// Order has been voided
    OrderAlreadyVoided,
    /// Order still has non-cancelled payments
    OrderHasPayments,
    /// Payment record not found on this order
    PaymentNotFound,
    /// Payment has already been cancelled
    PaymentAlreadyCancelled,
    /// Payment would push the paid amount past the order total
    PaymentExceedsBalance,

    // ==================== Discounts ====================
    /// Discount rule not found
    DiscountRuleNotFound,

    // ==================== Staff ====================
    /// Employee not found
    EmployeeNotFound,
    /// Staff number already exists
    StaffNumberExists,
    /// Employee is blocked
    EmployeeBlocked,

    // ==================== Housekeeping ====================
    /// Cleaning task not found
    CleaningTaskNotFound,
    /// Requested status change is not a legal transition
    InvalidTaskTransition,

    // ==================== Settings ====================
    /// Exchange rate not found
    ExchangeRateNotFound,

    // ==================== System ====================
    /// Internal server error
    InternalError,
    /// Database error
    DatabaseError,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Stable wire name of this code
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::AlreadyExists => "ALREADY_EXISTS",
            ErrorCode::InvalidRequest => "INVALID_REQUEST",
            ErrorCode::RequiredField => "REQUIRED_FIELD",
            ErrorCode::ValueOutOfRange => "VALUE_OUT_OF_RANGE",
            ErrorCode::BusinessRuleViolation => "BUSINESS_RULE_VIOLATION",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::DepartmentNotFound => "DEPARTMENT_NOT_FOUND",
            ErrorCode::DepartmentCodeExists => "DEPARTMENT_CODE_EXISTS",
            ErrorCode::DepartmentHasStock => "DEPARTMENT_HAS_STOCK",
            ErrorCode::SectionNotFound => "SECTION_NOT_FOUND",
            ErrorCode::ItemNotFound => "ITEM_NOT_FOUND",
            ErrorCode::SkuExists => "SKU_EXISTS",
            ErrorCode::ItemHasStock => "ITEM_HAS_STOCK",
            ErrorCode::StockLevelNotFound => "STOCK_LEVEL_NOT_FOUND",
            ErrorCode::InsufficientStock => "INSUFFICIENT_STOCK",
            ErrorCode::TransferNotFound => "TRANSFER_NOT_FOUND",
            ErrorCode::OrderNotFound => "ORDER_NOT_FOUND",
            ErrorCode::OrderEmpty => "ORDER_EMPTY",
            ErrorCode::OrderAlreadySettled => "ORDER_ALREADY_SETTLED",
            ErrorCode::OrderAlreadyVoided => "ORDER_ALREADY_VOIDED",
            ErrorCode::OrderHasPayments => "ORDER_HAS_PAYMENTS",
            ErrorCode::PaymentNotFound => "PAYMENT_NOT_FOUND",
            ErrorCode::PaymentAlreadyCancelled => "PAYMENT_ALREADY_CANCELLED",
            ErrorCode::PaymentExceedsBalance => "PAYMENT_EXCEEDS_BALANCE",
            ErrorCode::DiscountRuleNotFound => "DISCOUNT_RULE_NOT_FOUND",
            ErrorCode::EmployeeNotFound => "EMPLOYEE_NOT_FOUND",
            ErrorCode::StaffNumberExists => "STAFF_NUMBER_EXISTS",
            ErrorCode::EmployeeBlocked => "EMPLOYEE_BLOCKED",
            ErrorCode::CleaningTaskNotFound => "CLEANING_TASK_NOT_FOUND",
            ErrorCode::InvalidTaskTransition => "INVALID_TASK_TRANSITION",
            ErrorCode::ExchangeRateNotFound => "EXCHANGE_RATE_NOT_FOUND",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
        }
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",
            ErrorCode::BusinessRuleViolation => "Business rule violation",
            ErrorCode::Unauthorized => "Caller is not authenticated",
            ErrorCode::Forbidden => "Permission denied",
            ErrorCode::DepartmentNotFound => "Department not found",
            ErrorCode::DepartmentCodeExists => "Department code already exists",
            ErrorCode::DepartmentHasStock => "Department still holds stock",
            ErrorCode::SectionNotFound => "Section not found",
            ErrorCode::ItemNotFound => "Inventory item not found",
            ErrorCode::SkuExists => "SKU already exists",
            ErrorCode::ItemHasStock => "Item still has stock on hand",
            ErrorCode::StockLevelNotFound => "No stock record for this department",
            ErrorCode::InsufficientStock => "Insufficient stock in source department",
            ErrorCode::TransferNotFound => "Transfer not found",
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Order has no lines",
            ErrorCode::OrderAlreadySettled => "Order has already been settled",
            ErrorCode::OrderAlreadyVoided => "Order has been voided",
            ErrorCode::OrderHasPayments => "Order has existing payments",
            ErrorCode::PaymentNotFound => "Payment record not found",
            ErrorCode::PaymentAlreadyCancelled => "Payment has already been cancelled",
            ErrorCode::PaymentExceedsBalance => "Payment exceeds the remaining balance",
            ErrorCode::DiscountRuleNotFound => "Discount rule not found",
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::StaffNumberExists => "Staff number already exists",
            ErrorCode::EmployeeBlocked => "Employee is blocked",
            ErrorCode::CleaningTaskNotFound => "Cleaning task not found",
            ErrorCode::InvalidTaskTransition => "Illegal cleaning task status transition",
            ErrorCode::ExchangeRateNotFound => "Exchange rate not found",
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }

    /// Coarse category, used for HTTP status mapping and log routing
    pub const fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::ValidationError
            | ErrorCode::InvalidRequest
            | ErrorCode::RequiredField
            | ErrorCode::ValueOutOfRange => ErrorCategory::Validation,

            ErrorCode::Unauthorized | ErrorCode::Forbidden => ErrorCategory::Access,

            ErrorCode::NotFound
            | ErrorCode::DepartmentNotFound
            | ErrorCode::SectionNotFound
            | ErrorCode::ItemNotFound
            | ErrorCode::StockLevelNotFound
            | ErrorCode::TransferNotFound
            | ErrorCode::OrderNotFound
            | ErrorCode::PaymentNotFound
            | ErrorCode::DiscountRuleNotFound
            | ErrorCode::EmployeeNotFound
            | ErrorCode::CleaningTaskNotFound
            | ErrorCode::ExchangeRateNotFound => ErrorCategory::NotFound,

            ErrorCode::AlreadyExists
            | ErrorCode::DepartmentCodeExists
            | ErrorCode::SkuExists
            | ErrorCode::StaffNumberExists => ErrorCategory::Conflict,

            ErrorCode::BusinessRuleViolation
            | ErrorCode::DepartmentHasStock
            | ErrorCode::ItemHasStock
            | ErrorCode::InsufficientStock
            | ErrorCode::OrderEmpty
            | ErrorCode::OrderAlreadySettled
            | ErrorCode::OrderAlreadyVoided
            | ErrorCode::OrderHasPayments
            | ErrorCode::PaymentAlreadyCancelled
            | ErrorCode::PaymentExceedsBalance
            | ErrorCode::EmployeeBlocked
            | ErrorCode::InvalidTaskTransition => ErrorCategory::Business,

            ErrorCode::InternalError | ErrorCode::DatabaseError | ErrorCode::ConfigError => {
                ErrorCategory::System
            }
        }
    }

    /// HTTP status for this code
    ///
    /// Delegates to the category, except Unauthorized which is 401 rather
    /// than the Access category default of 403.
    pub fn http_status(&self) -> http::StatusCode {
        match self {
            ErrorCode::Unauthorized => http::StatusCode::UNAUTHORIZED,
            _ => self.category().http_status(),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
        assert_eq!(ErrorCode::InsufficientStock.as_str(), "INSUFFICIENT_STOCK");
        assert_eq!(
            ErrorCode::PaymentExceedsBalance.as_str(),
            "PAYMENT_EXCEEDS_BALANCE"
        );
    }

    #[test]
    fn test_serialize_matches_as_str() {
        let codes = [
            ErrorCode::ValidationError,
            ErrorCode::DepartmentCodeExists,
            ErrorCode::OrderAlreadySettled,
            ErrorCode::InternalError,
        ];
        for code in codes {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("\"INSUFFICIENT_STOCK\"").unwrap();
        assert_eq!(code, ErrorCode::InsufficientStock);

        let result: Result<ErrorCode, _> = serde_json::from_str("\"NO_SUCH_CODE\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::OrderNotFound), "ORDER_NOT_FOUND");
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            ErrorCode::ValidationError.category(),
            ErrorCategory::Validation
        );
        assert_eq!(ErrorCode::OrderNotFound.category(), ErrorCategory::NotFound);
        assert_eq!(ErrorCode::SkuExists.category(), ErrorCategory::Conflict);
        assert_eq!(
            ErrorCode::InsufficientStock.category(),
            ErrorCategory::Business
        );
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }
}
