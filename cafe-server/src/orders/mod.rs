//! Order Lifecycle Engine
//!
//! Creation with price snapshots, state changes and the table occupancy
//! side effect. Every write that touches more than one row runs inside a
//! single sqlx transaction.
//!
//! | Transition | Table side effect |
//! |------------|-------------------|
//! | create (table-bound) | table → Occupied |
//! | any → Completed | `completed_at` = now, table → Available |
//! | any → other state | none |

use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::db::repository::{self, RepoError, dining_table, order, product, user};
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode, money};
use shared::models::{OrderCreate, OrderDetail, OrderStatus, TableStatus};

/// Payment method is free text
pub const MAX_PAYMENT_METHOD_LEN: usize = 50;

fn order_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
        .with_detail("order_id", id)
}

fn validate_create(data: &OrderCreate) -> AppResult<()> {
    validate_required_text(&data.payment_method, "payment_method", MAX_PAYMENT_METHOD_LEN)?;
    validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;
    for line in &data.lines {
        if line.quantity <= 0 {
            return Err(AppError::with_message(
                ErrorCode::OrderLineInvalid,
                format!("Quantity must be positive, got {}", line.quantity),
            )
            .with_detail("product_id", line.product_id)
            .with_detail("quantity", line.quantity));
        }
    }
    Ok(())
}

/// Create an order for `actor_id`
///
/// Prices are read from the catalog at call time and copied into the
/// lines. A table-bound order marks the table Occupied whatever its
/// previous state.
pub async fn create_order(pool: &SqlitePool, actor_id: i64, data: OrderCreate) -> AppResult<OrderDetail> {
    validate_create(&data)?;

    let mut tx = repository::begin_write(pool).await?;

    let actor = user::find_by_id(&mut *tx, actor_id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::UserNotFound, format!("User {actor_id} not found"))
    })?;
    if !actor.is_active {
        return Err(AppError::validation(format!(
            "User {actor_id} is inactive and cannot place orders"
        )));
    }

    if let Some(table_id) = data.table_id
        && dining_table::find_by_id(&mut *tx, table_id).await?.is_none()
    {
        return Err(AppError::with_message(
            ErrorCode::TableNotFound,
            format!("Table {table_id} not found"),
        ));
    }

    // Price snapshot
    let mut priced = Vec::with_capacity(data.lines.len());
    let mut total = Decimal::ZERO;
    for line in &data.lines {
        let product = product::find_by_id(&mut *tx, line.product_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::ProductNotFound,
                    format!("Product {} not found", line.product_id),
                )
            })?;
        let subtotal = money::line_subtotal(product.price, line.quantity);
        total += subtotal;
        priced.push((line, product.price, money::to_f64(subtotal)));
    }

    let placed_at = shared::util::now_millis();
    let order_id = order::insert(
        &mut tx,
        &order::NewOrder {
            user_id: actor_id,
            table_id: data.table_id,
            placed_at,
            total_amount: money::to_f64(total),
            payment_method: data.payment_method.trim(),
            is_takeaway: data.takeaway,
            notes: data.notes.as_deref(),
        },
    )
    .await?;

    for (line, unit_price, subtotal) in priced {
        order::insert_line(&mut tx, order_id, line.product_id, line.quantity, unit_price, subtotal)
            .await?;
    }

    if let Some(table_id) = data.table_id {
        dining_table::set_status(&mut *tx, table_id, TableStatus::Occupied).await?;
    }

    let detail = order::find_detail(&mut tx, order_id)
        .await?
        .ok_or_else(|| order_not_found(order_id))?;

    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(
        order_id,
        user_id = actor_id,
        table_id = ?data.table_id,
        total = detail.order.total_amount,
        lines = detail.lines.len(),
        "Order created"
    );
    Ok(detail)
}

/// Move an order to `new_state` (parsed from client text)
///
/// Any state may follow any other. Completing an order stamps
/// `completed_at` and frees its table.
pub async fn update_order_state(
    pool: &SqlitePool,
    order_id: i64,
    new_state: &str,
    actor_id: i64,
) -> AppResult<OrderDetail> {
    let status: OrderStatus = new_state.parse().map_err(|e: String| {
        AppError::with_message(ErrorCode::OrderInvalidState, e).with_detail("state", new_state)
    })?;

    let mut tx = repository::begin_write(pool).await?;

    let current = order::find_by_id(&mut *tx, order_id)
        .await?
        .ok_or_else(|| order_not_found(order_id))?;

    let completed_at = (status == OrderStatus::Completed).then(shared::util::now_millis);
    order::update_status(&mut tx, order_id, status, actor_id, completed_at).await?;

    if status == OrderStatus::Completed
        && let Some(table_id) = current.table_id
    {
        dining_table::set_status(&mut *tx, table_id, TableStatus::Available).await?;
    }

    let detail = order::find_detail(&mut tx, order_id)
        .await?
        .ok_or_else(|| order_not_found(order_id))?;

    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(
        order_id,
        from = %current.status,
        to = %status,
        modified_by = actor_id,
        "Order state changed"
    );
    Ok(detail)
}

/// Hard delete. The table keeps whatever state it had.
pub async fn delete_order(pool: &SqlitePool, order_id: i64) -> AppResult<()> {
    if !order::delete(pool, order_id).await? {
        return Err(order_not_found(order_id));
    }
    tracing::info!(order_id, "Order deleted");
    Ok(())
}

pub async fn get_order(pool: &SqlitePool, order_id: i64) -> AppResult<OrderDetail> {
    let mut conn = pool.acquire().await.map_err(RepoError::from)?;
    order::find_detail(&mut conn, order_id)
        .await?
        .ok_or_else(|| order_not_found(order_id))
}

pub async fn list_orders(pool: &SqlitePool) -> AppResult<Vec<OrderDetail>> {
    Ok(order::find_all(pool).await?)
}

pub async fn list_orders_by_table(pool: &SqlitePool, table_id: i64) -> AppResult<Vec<OrderDetail>> {
    Ok(order::find_by_table(pool, table_id).await?)
}

/// Kitchen queue: Pending orders, oldest first
pub async fn list_pending(pool: &SqlitePool) -> AppResult<Vec<OrderDetail>> {
    Ok(order::find_by_status(pool, OrderStatus::Pending).await?)
}
