//! Error codes for the cafe POS backend
//!
//! Codes are grouped by numeric range:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 6xxx: Product errors
//! - 70xx-71xx: Table errors
//! - 72xx-79xx: Cash shift errors
//! - 8xxx: User errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code carried in every error response body
///
/// Serialized as a bare `u16` so clients can switch on it without
/// parsing the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    Success = 0,
    Unknown = 1,
    ValidationFailed = 2,
    NotFound = 3,
    AlreadyExists = 4,
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    NotAuthenticated = 1001,
    /// Unknown email or wrong password
    InvalidCredentials = 1002,
    TokenExpired = 1003,
    TokenInvalid = 1004,
    /// User exists but is deactivated
    AccountDisabled = 1007,

    // ==================== 2xxx: Permission ====================
    PermissionDenied = 2001,

    // ==================== 4xxx: Order ====================
    OrderNotFound = 4001,
    /// State value is not one of the known order states
    OrderInvalidState = 4002,
    /// Line quantity is not a positive integer
    OrderLineInvalid = 4003,

    // ==================== 6xxx: Product ====================
    ProductNotFound = 6001,
    ProductInvalidPrice = 6002,
    /// Product is referenced by at least one order line
    ProductInUse = 6003,

    // ==================== 7xxx: Table ====================
    TableNotFound = 7001,
    TableNumberExists = 7002,
    /// Table still has orders that are not completed
    TableHasActiveOrders = 7003,

    // ==================== 72xx: Cash shift ====================
    ShiftNotFound = 7201,
    /// Cashier already owns an open shift
    ShiftAlreadyOpen = 7202,
    ShiftAlreadyClosed = 7203,
    ShiftInvalidAmount = 7204,

    // ==================== 8xxx: User ====================
    UserNotFound = 8001,
    UserEmailExists = 8002,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
    DatabaseError = 9002,
    ConfigError = 9005,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Default human-readable message
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountDisabled => "Account is disabled",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderInvalidState => "Invalid order state",
            ErrorCode::OrderLineInvalid => "Invalid order line",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Product has invalid price",
            ErrorCode::ProductInUse => "Product is referenced by existing orders",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableNumberExists => "Table number already exists",
            ErrorCode::TableHasActiveOrders => "Table has orders that are not completed",

            // Shift
            ErrorCode::ShiftNotFound => "Shift not found",
            ErrorCode::ShiftAlreadyOpen => "Cashier already has an open shift",
            ErrorCode::ShiftAlreadyClosed => "Shift is already closed",
            ErrorCode::ShiftInvalidAmount => "Invalid cash amount",

            // User
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::UserEmailExists => "A user with this email already exists",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => ErrorCode::Success,
            1 => ErrorCode::Unknown,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            4 => ErrorCode::AlreadyExists,
            5 => ErrorCode::InvalidRequest,

            1001 => ErrorCode::NotAuthenticated,
            1002 => ErrorCode::InvalidCredentials,
            1003 => ErrorCode::TokenExpired,
            1004 => ErrorCode::TokenInvalid,
            1007 => ErrorCode::AccountDisabled,

            2001 => ErrorCode::PermissionDenied,

            4001 => ErrorCode::OrderNotFound,
            4002 => ErrorCode::OrderInvalidState,
            4003 => ErrorCode::OrderLineInvalid,

            6001 => ErrorCode::ProductNotFound,
            6002 => ErrorCode::ProductInvalidPrice,
            6003 => ErrorCode::ProductInUse,

            7001 => ErrorCode::TableNotFound,
            7002 => ErrorCode::TableNumberExists,
            7003 => ErrorCode::TableHasActiveOrders,

            7201 => ErrorCode::ShiftNotFound,
            7202 => ErrorCode::ShiftAlreadyOpen,
            7203 => ErrorCode::ShiftAlreadyClosed,
            7204 => ErrorCode::ShiftInvalidAmount,

            8001 => ErrorCode::UserNotFound,
            8002 => ErrorCode::UserEmailExists,

            9001 => ErrorCode::InternalError,
            9002 => ErrorCode::DatabaseError,
            9005 => ErrorCode::ConfigError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::ShiftAlreadyOpen.code(), 7202);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::ShiftAlreadyClosed).unwrap();
        assert_eq!(json, "7203");
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("7003").unwrap();
        assert_eq!(code, ErrorCode::TableHasActiveOrders);

        let code: ErrorCode = serde_json::from_str("1002").unwrap();
        assert_eq!(code, ErrorCode::InvalidCredentials);
    }

    #[test]
    fn test_deserialize_unknown_code_fails() {
        let result: Result<ErrorCode, _> = serde_json::from_str("3001");
        assert!(result.is_err());

        let err = ErrorCode::try_from(5001).unwrap_err();
        assert_eq!(err.to_string(), "invalid error code: 5001");
    }

    #[test]
    fn test_display_is_numeric() {
        assert_eq!(ErrorCode::ProductInUse.to_string(), "6003");
    }

    #[test]
    fn test_messages() {
        assert_eq!(ErrorCode::OrderNotFound.message(), "Order not found");
        assert_eq!(
            ErrorCode::ShiftAlreadyOpen.message(),
            "Cashier already has an open shift"
        );
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
    }
}
