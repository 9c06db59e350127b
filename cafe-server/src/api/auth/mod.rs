//! Authentication Routes
//!
//! - /api/auth/login: public
//! - /api/auth/me: any logged-in user
//! - /api/auth/register: `users:manage`

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::permissions::USERS_MANAGE;
use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let register = Router::new()
        .route("/api/auth/register", post(handler::register))
        .layer(middleware::from_fn(require_permission(USERS_MANAGE)));

    Router::new()
        .route("/api/auth/login", post(handler::login))
        .route("/api/auth/me", get(handler::me))
        .merge(register)
}
