//! Product API Handlers

use axum::{Json, extract::State, http::StatusCode};

use crate::api::extract::{AppJson, AppPath};
use crate::core::ServerState;
use crate::db::repository::{RepoError, product};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_amount, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Product, ProductCreate, ProductUpdate};

fn product_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::ProductNotFound, format!("Product {id} not found"))
}

fn validate_price(price: f64) -> AppResult<()> {
    validate_amount(price, "price")
        .map_err(|e| AppError::with_message(ErrorCode::ProductInvalidPrice, e.message))
}

fn validate_stock(stock: i32) -> AppResult<()> {
    if stock < 0 {
        return Err(AppError::validation(format!("Stock must be non-negative, got {stock}")));
    }
    Ok(())
}

fn validate_create(p: &ProductCreate) -> AppResult<()> {
    validate_required_text(&p.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&p.category, "category", MAX_SHORT_TEXT_LEN)?;
    if p.description.len() > MAX_NOTE_LEN {
        return Err(AppError::validation(format!(
            "description is too long ({} chars, max {MAX_NOTE_LEN})",
            p.description.len()
        )));
    }
    validate_price(p.price)?;
    validate_stock(p.stock)
}

fn validate_update(p: &ProductUpdate) -> AppResult<()> {
    if let Some(name) = &p.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(category) = &p.category {
        validate_required_text(category, "category", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(description) = &p.description
        && description.len() > MAX_NOTE_LEN
    {
        return Err(AppError::validation(format!(
            "description is too long ({} chars, max {MAX_NOTE_LEN})",
            description.len()
        )));
    }
    if let Some(price) = p.price {
        validate_price(price)?;
    }
    if let Some(stock) = p.stock {
        validate_stock(stock)?;
    }
    Ok(())
}

/// GET /api/products - 全部商品 (按名称)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    Ok(Json(product::find_all(state.pool()).await?))
}

/// GET /api/products/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<Product>> {
    let found = product::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| product_not_found(id))?;
    Ok(Json(found))
}

/// GET /api/products/category/{category}
pub async fn list_by_category(
    State(state): State<ServerState>,
    AppPath(category): AppPath<String>,
) -> AppResult<Json<Vec<Product>>> {
    Ok(Json(product::find_by_category(state.pool(), &category).await?))
}

/// POST /api/products
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<ProductCreate>,
) -> AppResult<(StatusCode, Json<Product>)> {
    validate_create(&payload)?;
    let created = product::create(state.pool(), payload).await?;
    tracing::info!(product_id = created.id, name = %created.name, "Product created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/products/{id} - 只更新提供的字段
pub async fn update(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<ProductUpdate>,
) -> AppResult<Json<Product>> {
    validate_update(&payload)?;
    let updated = product::update(state.pool(), id, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => product_not_found(id),
            other => other.into(),
        })?;
    Ok(Json(updated))
}

/// DELETE /api/products/{id} - 已被订单引用时拒绝
pub async fn delete(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<StatusCode> {
    if product::is_referenced(state.pool(), id).await? {
        return Err(AppError::with_message(
            ErrorCode::ProductInUse,
            format!("Product {id} is referenced by existing orders"),
        ));
    }
    if !product::delete(state.pool(), id).await? {
        return Err(product_not_found(id));
    }
    tracing::info!(product_id = id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
