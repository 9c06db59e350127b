//! Cafe Server - 食堂/咖啡厅收银后端
//!
//! # 模块结构
//!
//! ```text
//! cafe-server/src/
//! ├── core/          # 配置、状态、错误、HTTP 服务器
//! ├── auth/          # JWT 认证、Argon2 密码、权限
//! ├── db/            # SQLite 连接池与仓储
//! ├── orders/        # 订单创建与状态流转
//! ├── shifts/        # 收银班次开/关班
//! ├── reports/       # 销售报表
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志、时间、金额、校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod reports;
pub mod shifts;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// 按配置初始化日志 (控制台 + 可选文件)
pub fn setup_environment(config: &Config) -> anyhow::Result<()> {
    init_logger_with_file(
        &config.log_level,
        config.log_json,
        config.log_dir.as_deref(),
    )
}

pub fn print_banner() {
    println!(
        r#"
   ______       ____
  / ____/___ _ / __/__
 / /   / __ `// /_/ _ \
/ /___/ /_/ // __/  __/
\____/\__,_//_/  \___/   server v{}
    "#,
        env!("CARGO_PKG_VERSION")
    );
}
