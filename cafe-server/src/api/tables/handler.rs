//! Dining Table API Handlers

use axum::{Json, extract::State, http::StatusCode};

use crate::api::extract::{AppJson, AppPath};
use crate::core::ServerState;
use crate::db::repository::{RepoError, dining_table};
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate, TableStatus};

fn table_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::TableNotFound, format!("Table {id} not found"))
}

fn map_repo_error(e: RepoError, id: i64) -> AppError {
    match e {
        RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::TableNumberExists, msg),
        RepoError::NotFound(_) => table_not_found(id),
        other => other.into(),
    }
}

fn validate_shape(number: Option<i32>, capacity: Option<i32>, location: &Option<String>) -> AppResult<()> {
    if let Some(n) = number
        && n <= 0
    {
        return Err(AppError::validation(format!("Table number must be positive, got {n}")));
    }
    if let Some(c) = capacity
        && c <= 0
    {
        return Err(AppError::validation(format!("Capacity must be positive, got {c}")));
    }
    validate_optional_text(location, "location", MAX_SHORT_TEXT_LEN)
}

/// GET /api/tables - 获取所有桌台
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiningTable>>> {
    Ok(Json(dining_table::find_all(state.pool()).await?))
}

/// GET /api/tables/available - 空闲桌台
pub async fn list_available(State(state): State<ServerState>) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = dining_table::find_by_status(state.pool(), TableStatus::Available).await?;
    Ok(Json(tables))
}

/// GET /api/tables/{id} - 获取单个桌台
pub async fn get_by_id(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<DiningTable>> {
    let table = dining_table::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| table_not_found(id))?;
    Ok(Json(table))
}

/// POST /api/tables - 创建桌台 (初始为 Available)
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<DiningTableCreate>,
) -> AppResult<(StatusCode, Json<DiningTable>)> {
    validate_shape(Some(payload.number), Some(payload.capacity), &payload.location)?;
    let table = dining_table::create(state.pool(), payload)
        .await
        .map_err(|e| map_repo_error(e, 0))?;
    tracing::info!(table_id = table.id, number = table.number, "Table created");
    Ok((StatusCode::CREATED, Json(table)))
}

/// PUT /api/tables/{id} - 更新桌台 (含状态人工修正)
pub async fn update(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    validate_shape(payload.number, payload.capacity, &payload.location)?;
    let table = dining_table::update(state.pool(), id, payload)
        .await
        .map_err(|e| map_repo_error(e, id))?;
    Ok(Json(table))
}

/// DELETE /api/tables/{id} - 删除桌台
///
/// 有未完成订单时拒绝；已完成订单的 table_id 置空
pub async fn delete(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<StatusCode> {
    if dining_table::find_by_id(state.pool(), id).await?.is_none() {
        return Err(table_not_found(id));
    }

    let unfinished = dining_table::count_unfinished_orders(state.pool(), id).await?;
    if unfinished > 0 {
        return Err(AppError::with_message(
            ErrorCode::TableHasActiveOrders,
            format!("Table {id} has {unfinished} unfinished order(s)"),
        ));
    }

    if !dining_table::delete(state.pool(), id).await? {
        return Err(table_not_found(id));
    }
    tracing::info!(table_id = id, "Table deleted");
    Ok(StatusCode::NO_CONTENT)
}
