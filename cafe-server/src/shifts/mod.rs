//! Cash Shift Ledger
//!
//! A cashier opens a shift with an initial float. On close the expected
//! cash is recomputed from completed orders placed since the start of the
//! opening day (business timezone), and compared against the counted cash.

use chrono_tz::Tz;
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::db::repository::{self, RepoError, order, shift, user};
use crate::utils::validation::{MAX_NOTE_LEN, validate_amount, validate_optional_text};
use crate::utils::{AppError, AppResult, ErrorCode, money, time};
use shared::models::{CashShift, ShiftStatus};

fn shift_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::ShiftNotFound, format!("Shift {id} not found"))
        .with_detail("shift_id", id)
}

fn already_open(cashier_id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::ShiftAlreadyOpen,
        format!("Cashier {cashier_id} already has an open shift"),
    )
}

fn already_closed(id: i64) -> AppError {
    AppError::with_message(ErrorCode::ShiftAlreadyClosed, format!("Shift {id} is already closed"))
}

/// 金额校验，失败统一为 ShiftInvalidAmount
fn validate_cash(value: f64, field: &str) -> AppResult<()> {
    validate_amount(value, field)
        .map_err(|e| AppError::with_message(ErrorCode::ShiftInvalidAmount, e.message))
}

/// Open a shift for `cashier_id` with `expected = initial`
pub async fn open_shift(pool: &SqlitePool, cashier_id: i64, initial_amount: f64) -> AppResult<CashShift> {
    validate_cash(initial_amount, "initial_amount")?;

    if user::find_by_id(pool, cashier_id).await?.is_none() {
        return Err(AppError::with_message(
            ErrorCode::UserNotFound,
            format!("User {cashier_id} not found"),
        ));
    }

    if shift::find_open_for_cashier(pool, cashier_id).await?.is_some() {
        return Err(already_open(cashier_id));
    }

    // The partial unique index catches a concurrent open that slipped past the check
    let opened = shift::create(pool, cashier_id, money::to_f64(money::to_decimal(initial_amount)))
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => already_open(cashier_id),
            other => other.into(),
        })?;

    tracing::info!(
        shift_id = opened.id,
        cashier_id,
        initial_amount = opened.initial_amount,
        "Shift opened"
    );
    Ok(opened)
}

/// Close an open shift
///
/// expected = initial + Σ completed orders placed from 00:00 of the opening
/// day up to now; variance = counted − expected. A closed shift is left
/// untouched.
pub async fn close_shift(
    pool: &SqlitePool,
    tz: Tz,
    shift_id: i64,
    counted_amount: f64,
    notes: Option<String>,
) -> AppResult<CashShift> {
    validate_cash(counted_amount, "counted_amount")?;
    validate_optional_text(&notes, "notes", MAX_NOTE_LEN)?;

    let mut tx = repository::begin_write(pool).await?;

    let current = shift::find_by_id(&mut *tx, shift_id)
        .await?
        .ok_or_else(|| shift_not_found(shift_id))?;
    if current.status == ShiftStatus::Closed {
        return Err(already_closed(shift_id));
    }

    let now = shared::util::now_millis();
    let window_start = time::day_start_millis(time::local_date(current.opened_at, tz), tz);
    // inclusive of orders placed in the closing millisecond
    let sales = order::sum_completed_between(&mut *tx, window_start, now + 1).await?;

    let expected = money::to_decimal(current.initial_amount) + money::to_decimal(sales);
    let counted = money::to_decimal(counted_amount);
    let variance: Decimal = counted - expected;

    let closing = shift::ShiftClosing {
        closed_at: now,
        expected_amount: money::to_f64(expected),
        counted_amount: money::to_f64(counted),
        variance: money::to_f64(variance),
        notes: notes.as_deref(),
    };
    if !shift::close(&mut *tx, shift_id, &closing).await? {
        // Lost a race with another close
        return Err(already_closed(shift_id));
    }

    let closed = shift::find_by_id(&mut *tx, shift_id)
        .await?
        .ok_or_else(|| shift_not_found(shift_id))?;
    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(
        shift_id,
        cashier_id = closed.cashier_id,
        expected = closed.expected_amount,
        counted = closing.counted_amount,
        variance = closing.variance,
        "Shift closed"
    );
    Ok(closed)
}

pub async fn get_shift(pool: &SqlitePool, shift_id: i64) -> AppResult<CashShift> {
    shift::find_by_id(pool, shift_id)
        .await?
        .ok_or_else(|| shift_not_found(shift_id))
}

/// The cashier's open shift, ShiftNotFound when there is none
pub async fn get_open_shift(pool: &SqlitePool, cashier_id: i64) -> AppResult<CashShift> {
    shift::find_open_for_cashier(pool, cashier_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ShiftNotFound,
                format!("No open shift for cashier {cashier_id}"),
            )
        })
}

/// Shifts opened on `date` (YYYY-MM-DD, business timezone)
pub async fn list_shifts_by_date(pool: &SqlitePool, tz: Tz, date: &str) -> AppResult<Vec<CashShift>> {
    let day = time::parse_date(date)?;
    let shifts = shift::find_by_date_range(
        pool,
        time::day_start_millis(day, tz),
        time::day_end_millis(day, tz),
    )
    .await?;
    Ok(shifts)
}
