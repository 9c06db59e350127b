//! Product Repository

use super::{RepoError, RepoResult};
use shared::models::{Product, ProductCreate, ProductUpdate};
use sqlx::SqlitePool;

const PRODUCT_SELECT: &str = "SELECT id, name, description, price, stock, category, is_available, created_at, updated_at FROM product";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let sql = format!("{PRODUCT_SELECT} ORDER BY name COLLATE NOCASE, id");
    let products = sqlx::query_as::<_, Product>(&sql).fetch_all(pool).await?;
    Ok(products)
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<Product>>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let sql = format!("{PRODUCT_SELECT} WHERE id = ?");
    let product = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(product)
}

pub async fn find_by_category(pool: &SqlitePool, category: &str) -> RepoResult<Vec<Product>> {
    let sql = format!("{PRODUCT_SELECT} WHERE category = ? COLLATE NOCASE ORDER BY name COLLATE NOCASE, id");
    let products = sqlx::query_as::<_, Product>(&sql)
        .bind(category)
        .fetch_all(pool)
        .await?;
    Ok(products)
}

pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    let now = shared::util::now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO product (name, description, price, stock, category, is_available, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7) RETURNING id",
    )
    .bind(data.name.trim())
    .bind(&data.description)
    .bind(data.price)
    .bind(data.stock)
    .bind(data.category.trim())
    .bind(data.is_available.unwrap_or(true))
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ProductUpdate) -> RepoResult<Product> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE product SET name = COALESCE(?1, name), description = COALESCE(?2, description), price = COALESCE(?3, price), stock = COALESCE(?4, stock), category = COALESCE(?5, category), is_available = COALESCE(?6, is_available), updated_at = ?7 WHERE id = ?8",
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.description)
    .bind(data.price)
    .bind(data.stock)
    .bind(data.category.as_deref().map(str::trim))
    .bind(data.is_available)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

/// Whether any order line references the product
pub async fn is_referenced(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let referenced = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM order_line WHERE product_id = ?)",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    Ok(referenced)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM product WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
