//! 工具模块 - 通用工具函数和类型
//!
//! - [`AppError`] / [`ApiResponse`] - re-exported from `shared::error`
//! - [`logger`] - tracing setup
//! - [`time`] - business-timezone date windows
//! - [`money`] - decimal arithmetic for amounts
//! - [`validation`] - input limits

pub mod logger;
pub mod money;
pub mod time;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
