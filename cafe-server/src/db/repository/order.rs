//! Order Repository
//!
//! Row-level access to `orders` and `order_line`. Business rules (pricing,
//! table side effects) live in [`crate::orders`].

use std::collections::HashMap;

use super::{RepoError, RepoResult};
use shared::models::{Order, OrderDetail, OrderLine, OrderStatus};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

const ORDER_SELECT: &str = "SELECT o.id, o.user_id, u.full_name AS user_name, o.last_modified_by, o.table_id, o.placed_at, o.total_amount, o.status, o.payment_method, o.is_takeaway, o.notes, o.completed_at FROM orders o LEFT JOIN users u ON u.id = o.user_id";

const LINE_SELECT: &str = "SELECT ol.id, ol.order_id, ol.product_id, p.name AS product_name, ol.quantity, ol.unit_price, ol.subtotal FROM order_line ol JOIN product p ON p.id = ol.product_id";

/// Header fields for a new order
pub struct NewOrder<'a> {
    pub user_id: i64,
    pub table_id: Option<i64>,
    pub placed_at: i64,
    pub total_amount: f64,
    pub payment_method: &'a str,
    pub is_takeaway: bool,
    pub notes: Option<&'a str>,
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<Order>>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let sql = format!("{ORDER_SELECT} WHERE o.id = ?");
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(order)
}

pub async fn find_lines<'e, E>(executor: E, order_id: i64) -> RepoResult<Vec<OrderLine>>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let sql = format!("{LINE_SELECT} WHERE ol.order_id = ? ORDER BY ol.id");
    let lines = sqlx::query_as::<_, OrderLine>(&sql)
        .bind(order_id)
        .fetch_all(executor)
        .await?;
    Ok(lines)
}

/// Order header plus its lines
pub async fn find_detail(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<OrderDetail>> {
    let Some(order) = find_by_id(&mut *conn, id).await? else {
        return Ok(None);
    };
    let lines = find_lines(&mut *conn, id).await?;
    Ok(Some(OrderDetail { order, lines }))
}

/// Attach lines to a batch of orders with a single query
async fn with_lines(pool: &SqlitePool, orders: Vec<Order>) -> RepoResult<Vec<OrderDetail>> {
    if orders.is_empty() {
        return Ok(vec![]);
    }

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(LINE_SELECT);
    qb.push(" WHERE ol.order_id IN (");
    let mut ids = qb.separated(", ");
    for order in &orders {
        ids.push_bind(order.id);
    }
    qb.push(") ORDER BY ol.id");

    let mut by_order: HashMap<i64, Vec<OrderLine>> = HashMap::new();
    for line in qb.build_query_as::<OrderLine>().fetch_all(pool).await? {
        by_order.entry(line.order_id).or_default().push(line);
    }

    Ok(orders
        .into_iter()
        .map(|order| {
            let lines = by_order.remove(&order.id).unwrap_or_default();
            OrderDetail { order, lines }
        })
        .collect())
}

/// All orders, newest first
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<OrderDetail>> {
    let sql = format!("{ORDER_SELECT} ORDER BY o.placed_at DESC, o.id DESC");
    let orders = sqlx::query_as::<_, Order>(&sql).fetch_all(pool).await?;
    with_lines(pool, orders).await
}

/// Orders bound to a table, newest first
pub async fn find_by_table(pool: &SqlitePool, table_id: i64) -> RepoResult<Vec<OrderDetail>> {
    let sql = format!("{ORDER_SELECT} WHERE o.table_id = ? ORDER BY o.placed_at DESC, o.id DESC");
    let orders = sqlx::query_as::<_, Order>(&sql)
        .bind(table_id)
        .fetch_all(pool)
        .await?;
    with_lines(pool, orders).await
}

/// Orders in one state, oldest first (FIFO queue)
pub async fn find_by_status(pool: &SqlitePool, status: OrderStatus) -> RepoResult<Vec<OrderDetail>> {
    let sql = format!("{ORDER_SELECT} WHERE o.status = ? ORDER BY o.placed_at ASC, o.id ASC");
    let orders = sqlx::query_as::<_, Order>(&sql)
        .bind(status)
        .fetch_all(pool)
        .await?;
    with_lines(pool, orders).await
}

/// Insert header in PENDING state, `last_modified_by` = creator
pub async fn insert(conn: &mut SqliteConnection, data: &NewOrder<'_>) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO orders (user_id, last_modified_by, table_id, placed_at, total_amount, status, payment_method, is_takeaway, notes) VALUES (?1, ?1, ?2, ?3, ?4, 'PENDING', ?5, ?6, ?7) RETURNING id",
    )
    .bind(data.user_id)
    .bind(data.table_id)
    .bind(data.placed_at)
    .bind(data.total_amount)
    .bind(data.payment_method)
    .bind(data.is_takeaway)
    .bind(data.notes)
    .fetch_one(&mut *conn)
    .await?;
    Ok(id)
}

pub async fn insert_line(
    conn: &mut SqliteConnection,
    order_id: i64,
    product_id: i64,
    quantity: i32,
    unit_price: f64,
    subtotal: f64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO order_line (order_id, product_id, quantity, unit_price, subtotal) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(order_id)
    .bind(product_id)
    .bind(quantity)
    .bind(unit_price)
    .bind(subtotal)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Set state and modifier; `completed_at` is written only when `Some`
pub async fn update_status(
    conn: &mut SqliteConnection,
    id: i64,
    status: OrderStatus,
    modified_by: i64,
    completed_at: Option<i64>,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE orders SET status = ?1, last_modified_by = ?2, completed_at = COALESCE(?3, completed_at) WHERE id = ?4",
    )
    .bind(status)
    .bind(modified_by)
    .bind(completed_at)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    Ok(())
}

/// Hard delete; lines go with it (ON DELETE CASCADE)
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM orders WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Σ total of COMPLETED orders placed in `[start, end)`
pub async fn sum_completed_between<'e, E>(executor: E, start: i64, end: i64) -> RepoResult<f64>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let total = sqlx::query_scalar::<_, f64>(
        "SELECT COALESCE(SUM(total_amount), 0.0) FROM orders WHERE status = 'COMPLETED' AND placed_at >= ? AND placed_at < ?",
    )
    .bind(start)
    .bind(end)
    .fetch_one(executor)
    .await?;
    Ok(total)
}
