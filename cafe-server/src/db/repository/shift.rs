//! Cash Shift Repository

use super::{RepoError, RepoResult};
use shared::models::CashShift;
use sqlx::SqlitePool;

const SHIFT_SELECT: &str = "SELECT s.id, s.cashier_id, u.full_name AS cashier_name, u.email AS cashier_email, s.status, s.opened_at, s.closed_at, s.initial_amount, s.expected_amount, (s.expected_amount - s.initial_amount) AS sales_amount, s.counted_amount, s.variance, s.notes FROM cash_shift s LEFT JOIN users u ON u.id = s.cashier_id";

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<CashShift>>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let sql = format!("{SHIFT_SELECT} WHERE s.id = ?");
    let shift = sqlx::query_as::<_, CashShift>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(shift)
}

pub async fn find_open_for_cashier(pool: &SqlitePool, cashier_id: i64) -> RepoResult<Option<CashShift>> {
    let sql = format!("{SHIFT_SELECT} WHERE s.cashier_id = ? AND s.status = 'OPEN' LIMIT 1");
    let shift = sqlx::query_as::<_, CashShift>(&sql)
        .bind(cashier_id)
        .fetch_optional(pool)
        .await?;
    Ok(shift)
}

/// Shifts opened in `[start_millis, end_millis)`, newest first
pub async fn find_by_date_range(
    pool: &SqlitePool,
    start_millis: i64,
    end_millis: i64,
) -> RepoResult<Vec<CashShift>> {
    let sql = format!(
        "{SHIFT_SELECT} WHERE s.opened_at >= ? AND s.opened_at < ? ORDER BY s.opened_at DESC, s.id DESC"
    );
    let shifts = sqlx::query_as::<_, CashShift>(&sql)
        .bind(start_millis)
        .bind(end_millis)
        .fetch_all(pool)
        .await?;
    Ok(shifts)
}

/// Open a shift with `expected = initial`
///
/// A second OPEN shift for the same cashier hits the partial unique index
/// and comes back as [`RepoError::Duplicate`].
pub async fn create(pool: &SqlitePool, cashier_id: i64, initial_amount: f64) -> RepoResult<CashShift> {
    let now = shared::util::now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO cash_shift (cashier_id, status, opened_at, initial_amount, expected_amount) VALUES (?1, 'OPEN', ?2, ?3, ?3) RETURNING id",
    )
    .bind(cashier_id)
    .bind(now)
    .bind(initial_amount)
    .fetch_one(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => {
            RepoError::Duplicate(format!("Cashier {cashier_id} already has an open shift"))
        }
        other => other,
    })?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create shift".into()))
}

/// Close values computed by the caller
pub struct ShiftClosing<'a> {
    pub closed_at: i64,
    pub expected_amount: f64,
    pub counted_amount: f64,
    pub variance: f64,
    pub notes: Option<&'a str>,
}

/// Close an OPEN shift. Returns `false` when no OPEN row matched.
pub async fn close<'e, E>(executor: E, id: i64, data: &ShiftClosing<'_>) -> RepoResult<bool>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let rows = sqlx::query(
        "UPDATE cash_shift SET status = 'CLOSED', closed_at = ?1, expected_amount = ?2, counted_amount = ?3, variance = ?4, notes = COALESCE(?5, notes) WHERE id = ?6 AND status = 'OPEN'",
    )
    .bind(data.closed_at)
    .bind(data.expected_amount)
    .bind(data.counted_amount)
    .bind(data.variance)
    .bind(data.notes)
    .bind(id)
    .execute(executor)
    .await?;
    Ok(rows.rows_affected() > 0)
}
