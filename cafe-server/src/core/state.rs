use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{JwtService, password};
use crate::core::{Config, Result};
use crate::db::{DbService, repository::user};
use shared::models::{UserCreate, UserRole};

/// 服务器状态 - 持有所有服务的共享引用
///
/// Clone 成本很低 (连接池和 JWT 服务都是共享引用)。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | SQLite 连接池 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// 使用已有连接池构造 (测试常用)
    pub fn with_pool(config: Config, pool: SqlitePool) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            pool,
            jwt_service,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 打开数据库并执行迁移
    /// 2. 空库时创建引导管理员
    /// 3. JWT 服务
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_url).await?;
        let state = Self::with_pool(config.clone(), db.pool);
        state.ensure_bootstrap_admin().await?;
        Ok(state)
    }

    /// 用户表为空且配置了 BOOTSTRAP_ADMIN_* 时创建管理员
    async fn ensure_bootstrap_admin(&self) -> Result<()> {
        let (Some(email), Some(pwd)) = (
            self.config.bootstrap_admin_email.as_deref(),
            self.config.bootstrap_admin_password.as_deref(),
        ) else {
            return Ok(());
        };

        if user::count(&self.pool).await? > 0 {
            return Ok(());
        }

        let password_hash = password::hash_password(pwd)
            .map_err(|e| crate::core::ServerError::Config(format!("Bootstrap password: {e}")))?;
        let data = UserCreate {
            email: email.to_string(),
            full_name: "Administrator".to_string(),
            password: pwd.to_string(),
            role: UserRole::Admin,
            phone: None,
        };
        let admin = user::create(&self.pool, &data, &password_hash).await?;

        tracing::info!(user_id = admin.id, email = %admin.email, "Bootstrap admin created");
        Ok(())
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    /// 获取数据库连接池
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn timezone(&self) -> chrono_tz::Tz {
        self.config.timezone
    }
}
