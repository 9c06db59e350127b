use chrono_tz::Tz;

use crate::auth::JwtConfig;
use crate::core::{Result, ServerError};

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 8080 | HTTP 服务端口 |
/// | DATABASE_URL | sqlite://cafe.db | SQLite 数据库 |
/// | ENVIRONMENT | development | 运行环境 |
/// | TIMEZONE | UTC | 业务时区 (IANA 名称) |
/// | LOG_LEVEL | info | 日志级别 (RUST_LOG 优先) |
/// | LOG_JSON | false | JSON 格式日志 |
/// | LOG_DIR | - | 日志文件目录 (未设置则只输出到控制台) |
/// | BOOTSTRAP_ADMIN_EMAIL | - | 空库时创建的管理员邮箱 |
/// | BOOTSTRAP_ADMIN_PASSWORD | - | 空库时创建的管理员密码 |
///
/// JWT settings (`JWT_SECRET`, `JWT_EXPIRATION_MINUTES`, `JWT_ISSUER`,
/// `JWT_AUDIENCE`) are read by [`JwtConfig::from_env`].
///
/// ```ignore
/// HTTP_PORT=9000 TIMEZONE=America/Argentina/Buenos_Aires cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// sqlx 连接字符串或文件路径
    pub database_url: String,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 业务时区，决定报表和收班的日期边界
    pub timezone: Tz,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    pub bootstrap_admin_email: Option<String>,
    pub bootstrap_admin_password: Option<String>,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 未设置的项使用默认值；无效时区和 JWT 配置错误会返回 Err
    pub fn from_env() -> Result<Self> {
        let tz_name = env_or("TIMEZONE", "UTC");
        let timezone: Tz = tz_name
            .parse()
            .map_err(|_| ServerError::Config(format!("Unknown TIMEZONE: {tz_name}")))?;

        Ok(Self {
            http_port: env_parse("HTTP_PORT", 8080),
            database_url: env_or("DATABASE_URL", "sqlite://cafe.db"),
            environment: env_or("ENVIRONMENT", "development"),
            timezone,
            log_level: env_or("LOG_LEVEL", "info"),
            log_json: env_parse("LOG_JSON", false),
            log_dir: env_opt("LOG_DIR"),
            jwt: JwtConfig::from_env()?,
            bootstrap_admin_email: env_opt("BOOTSTRAP_ADMIN_EMAIL"),
            bootstrap_admin_password: env_opt("BOOTSTRAP_ADMIN_PASSWORD"),
        })
    }

    /// 使用自定义值覆盖部分配置，不读取环境变量
    ///
    /// 常用于测试场景
    pub fn with_overrides(database_url: impl Into<String>, http_port: u16) -> Self {
        Self {
            database_url: database_url.into(),
            http_port,
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 8080,
            database_url: "sqlite://cafe.db".into(),
            environment: "development".into(),
            timezone: Tz::UTC,
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            jwt: JwtConfig::ephemeral(),
            bootstrap_admin_email: None,
            bootstrap_admin_password: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_keep_defaults() {
        let config = Config::with_overrides("sqlite::memory:", 0);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.http_port, 0);
        assert_eq!(config.timezone, Tz::UTC);
        assert_eq!(config.environment, "development");
        assert!(config.jwt.secret.len() >= 32);
    }
}
