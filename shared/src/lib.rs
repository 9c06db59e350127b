//! Shared types for the cafe POS backend
//!
//! Error codes, the unified API response envelope, and the domain
//! models exchanged between the server and its HTTP clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
