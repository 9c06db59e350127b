//! Sales Report Queries
//!
//! Read-only aggregates over COMPLETED orders placed in `[start, end)`.

use super::RepoResult;
use shared::models::ProductSales;
use sqlx::SqlitePool;

/// (placed_at, total_amount) of every completed order in the window
pub async fn completed_orders(pool: &SqlitePool, start: i64, end: i64) -> RepoResult<Vec<(i64, f64)>> {
    let rows = sqlx::query_as::<_, (i64, f64)>(
        "SELECT placed_at, total_amount FROM orders WHERE status = 'COMPLETED' AND placed_at >= ? AND placed_at < ? ORDER BY placed_at",
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Best sellers by quantity, ties broken by product id
pub async fn top_products(
    pool: &SqlitePool,
    start: i64,
    end: i64,
    limit: i64,
) -> RepoResult<Vec<ProductSales>> {
    let rows = sqlx::query_as::<_, ProductSales>(
        "SELECT ol.product_id AS product_id, p.name AS product_name, SUM(ol.quantity) AS quantity_sold, SUM(ol.subtotal) AS total_amount \
         FROM order_line ol \
         JOIN orders o ON o.id = ol.order_id \
         JOIN product p ON p.id = ol.product_id \
         WHERE o.status = 'COMPLETED' AND o.placed_at >= ? AND o.placed_at < ? \
         GROUP BY ol.product_id, p.name \
         ORDER BY quantity_sold DESC, ol.product_id ASC \
         LIMIT ?",
    )
    .bind(start)
    .bind(end)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
