//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::OrderNotFound
            | Self::ProductNotFound
            | Self::TableNotFound
            | Self::ShiftNotFound
            | Self::UserNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::ProductInUse
            | Self::TableNumberExists
            | Self::TableHasActiveOrders
            | Self::ShiftAlreadyOpen
            | Self::ShiftAlreadyClosed
            | Self::UserEmailExists => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied | Self::AccountDisabled => StatusCode::FORBIDDEN,

            // 500 Internal Server Error
            Self::Unknown | Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::OrderInvalidState
            | Self::OrderLineInvalid
            | Self::ProductInvalidPrice
            | Self::ShiftInvalidAmount => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        for code in [
            ErrorCode::NotFound,
            ErrorCode::OrderNotFound,
            ErrorCode::ProductNotFound,
            ErrorCode::TableNotFound,
            ErrorCode::ShiftNotFound,
            ErrorCode::UserNotFound,
        ] {
            assert_eq!(code.http_status(), StatusCode::NOT_FOUND, "{code:?}");
        }
    }

    #[test]
    fn test_conflict_status() {
        assert_eq!(
            ErrorCode::ShiftAlreadyOpen.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::ShiftAlreadyClosed.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::TableNumberExists.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(ErrorCode::ProductInUse.http_status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_auth_statuses() {
        assert_eq!(
            ErrorCode::TokenExpired.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::InvalidCredentials.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::PermissionDenied.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorCode::AccountDisabled.http_status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_bad_request_status() {
        assert_eq!(
            ErrorCode::OrderInvalidState.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_internal_status() {
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
