//! User Repository

use super::{RepoError, RepoResult};
use shared::models::{User, UserCreate};
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "id, email, full_name, password_hash, role, phone, is_active, created_at, updated_at, last_login_at";

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<User>>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(user)
}

/// Emails are stored lowercased
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(email.trim().to_lowercase())
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

/// Insert a user with an already-hashed password
///
/// `data.password` is ignored. Duplicate email → [`RepoError::Duplicate`].
pub async fn create(pool: &SqlitePool, data: &UserCreate, password_hash: &str) -> RepoResult<User> {
    let now = shared::util::now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (email, full_name, password_hash, role, phone, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?6) RETURNING id",
    )
    .bind(data.email.trim().to_lowercase())
    .bind(data.full_name.trim())
    .bind(password_hash)
    .bind(data.role)
    .bind(&data.phone)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => {
            RepoError::Duplicate(format!("Email {} is already registered", data.email))
        }
        other => other,
    })?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

pub async fn touch_last_login(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query("UPDATE users SET last_login_at = ?1, updated_at = ?1 WHERE id = ?2")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn set_active(pool: &SqlitePool, id: i64, active: bool) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE users SET is_active = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(active)
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    Ok(())
}
