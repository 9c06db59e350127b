//! Reports API 模块

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::permissions::REPORTS_VIEW;
use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/sales", get(handler::sales))
        .route("/top-products", get(handler::top_products))
        .route("/sales-by-day", get(handler::sales_by_day))
        .route("/total-income", get(handler::total_income))
        .route("/average-sale", get(handler::average_sale))
        .layer(middleware::from_fn(require_permission(REPORTS_VIEW)))
}
