//! Cash Shift API 模块
//!
//! All routes require `shifts:manage`.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::permissions::SHIFTS_MANAGE;
use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/shifts", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/open", post(handler::open))
        .route("/open-for-me", get(handler::open_for_me))
        .route("/by-date", get(handler::by_date))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/close", post(handler::close))
        .layer(middleware::from_fn(require_permission(SHIFTS_MANAGE)))
}
