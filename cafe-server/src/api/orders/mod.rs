//! Order API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, put},
};

use crate::auth::permissions::{ORDERS_DELETE, ORDERS_QUEUE};
use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    // 登录即可
    let staff_routes = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/state", put(handler::update_state))
        .route("/table/{table_id}", get(handler::list_by_table));

    let queue_routes = Router::new()
        .route("/pending", get(handler::list_pending))
        .layer(middleware::from_fn(require_permission(ORDERS_QUEUE)));

    let delete_routes = Router::new()
        .route("/{id}", delete(handler::delete))
        .layer(middleware::from_fn(require_permission(ORDERS_DELETE)));

    staff_routes.merge(queue_routes).merge(delete_routes)
}
