//! Dining Table Repository

use super::{RepoError, RepoResult};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate, TableStatus};
use sqlx::SqlitePool;

const TABLE_SELECT: &str =
    "SELECT id, number, capacity, status, location, created_at, updated_at FROM dining_table";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<DiningTable>> {
    let sql = format!("{TABLE_SELECT} ORDER BY number");
    let tables = sqlx::query_as::<_, DiningTable>(&sql).fetch_all(pool).await?;
    Ok(tables)
}

pub async fn find_by_status(pool: &SqlitePool, status: TableStatus) -> RepoResult<Vec<DiningTable>> {
    let sql = format!("{TABLE_SELECT} WHERE status = ? ORDER BY number");
    let tables = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(status)
        .fetch_all(pool)
        .await?;
    Ok(tables)
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<DiningTable>>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let sql = format!("{TABLE_SELECT} WHERE id = ?");
    let table = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(table)
}

/// Duplicate number → [`RepoError::Duplicate`]
pub async fn create(pool: &SqlitePool, data: DiningTableCreate) -> RepoResult<DiningTable> {
    let now = shared::util::now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO dining_table (number, capacity, status, location, created_at, updated_at) VALUES (?1, ?2, 'AVAILABLE', ?3, ?4, ?4) RETURNING id",
    )
    .bind(data.number)
    .bind(data.capacity)
    .bind(&data.location)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => {
            RepoError::Duplicate(format!("Table number {} already exists", data.number))
        }
        other => other,
    })?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create table".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: DiningTableUpdate) -> RepoResult<DiningTable> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE dining_table SET number = COALESCE(?1, number), capacity = COALESCE(?2, capacity), status = COALESCE(?3, status), location = COALESCE(?4, location), updated_at = ?5 WHERE id = ?6",
    )
    .bind(data.number)
    .bind(data.capacity)
    .bind(data.status)
    .bind(&data.location)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Duplicate(format!(
            "Table number {} already exists",
            data.number.unwrap_or_default()
        )),
        other => other,
    })?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Table {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))
}

/// Set occupancy state, usually inside an order transaction
pub async fn set_status<'e, E>(executor: E, id: i64, status: TableStatus) -> RepoResult<()>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let rows = sqlx::query("UPDATE dining_table SET status = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(status)
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(executor)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Table {id} not found")));
    }
    Ok(())
}

/// Number of orders on the table that are not Completed
pub async fn count_unfinished_orders(pool: &SqlitePool, id: i64) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM orders WHERE table_id = ? AND status != 'COMPLETED'",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    Ok(n)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM dining_table WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
