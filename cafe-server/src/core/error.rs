//! 启动错误 - 服务器初始化阶段的失败
//!
//! Request-level failures use [`AppError`](crate::utils::AppError); this type
//! only covers what can go wrong before the listener is up.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("数据库错误: {0}")]
    Database(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部服务器错误: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<crate::utils::AppError> for ServerError {
    fn from(err: crate::utils::AppError) -> Self {
        match err.code {
            crate::utils::ErrorCode::ConfigError => ServerError::Config(err.message),
            _ => ServerError::Database(err.message),
        }
    }
}

impl From<crate::db::repository::RepoError> for ServerError {
    fn from(err: crate::db::repository::RepoError) -> Self {
        ServerError::Database(err.to_string())
    }
}

impl From<crate::auth::JwtError> for ServerError {
    fn from(err: crate::auth::JwtError) -> Self {
        ServerError::Config(err.to_string())
    }
}

/// 启动流程的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
