//! Unified error system
//!
//! - [`ErrorCode`]: numeric codes grouped by domain range
//! - [`ErrorCategory`]: domain classification of a code
//! - [`AppError`]: code + message + optional details
//! - [`ApiResponse`]: JSON envelope for error bodies
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::ShiftAlreadyOpen);
//! let err = AppError::validation("quantity must be positive")
//!     .with_detail("field", "quantity");
//! let body = ApiResponse::<()>::error(&err);
//! assert_eq!(body.code, Some(2));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
