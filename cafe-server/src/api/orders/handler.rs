//! Order API Handlers

use axum::{Json, extract::State, http::StatusCode};

use crate::api::extract::{AppJson, AppPath};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::orders;
use crate::utils::AppResult;
use shared::models::{OrderCreate, OrderDetail, OrderStateUpdate};

/// GET /api/orders - 全部订单 (最新在前)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<OrderDetail>>> {
    Ok(Json(orders::list_orders(state.pool()).await?))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<OrderDetail>> {
    Ok(Json(orders::get_order(state.pool(), id).await?))
}

/// GET /api/orders/pending - 厨房队列 (先进先出)
pub async fn list_pending(State(state): State<ServerState>) -> AppResult<Json<Vec<OrderDetail>>> {
    Ok(Json(orders::list_pending(state.pool()).await?))
}

/// GET /api/orders/table/{table_id}
pub async fn list_by_table(
    State(state): State<ServerState>,
    AppPath(table_id): AppPath<i64>,
) -> AppResult<Json<Vec<OrderDetail>>> {
    Ok(Json(orders::list_orders_by_table(state.pool(), table_id).await?))
}

/// POST /api/orders - 下单 (创建者为当前用户)
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    AppJson(payload): AppJson<OrderCreate>,
) -> AppResult<(StatusCode, Json<OrderDetail>)> {
    let detail = orders::create_order(state.pool(), current_user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// PUT /api/orders/{id}/state - 修改订单状态
pub async fn update_state(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<OrderStateUpdate>,
) -> AppResult<Json<OrderDetail>> {
    let detail =
        orders::update_order_state(state.pool(), id, &payload.state, current_user.id).await?;
    Ok(Json(detail))
}

/// DELETE /api/orders/{id}
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    AppPath(id): AppPath<i64>,
) -> AppResult<StatusCode> {
    orders::delete_order(state.pool(), id).await?;
    tracing::info!(order_id = id, by = current_user.id, "Order deleted via API");
    Ok(StatusCode::NO_CONTENT)
}
