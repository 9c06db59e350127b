//! API 路由模块
//!
//! - [`extract`] - JSON/Query/Path 提取器 (错误统一为 AppError)
//! - [`health`] - 健康检查 (公共)
//! - [`auth`] - 登录、注册、当前用户
//! - [`orders`] - 订单生命周期
//! - [`shifts`] - 收银班次
//! - [`tables`] - 餐桌管理
//! - [`products`] - 商品管理
//! - [`reports`] - 销售报表
//!
//! Successful responses are the bare JSON resource; failures are the
//! [`ApiResponse`](crate::utils::ApiResponse) envelope produced by `AppError`.

pub mod auth;
pub mod extract;
pub mod health;
pub mod orders;
pub mod products;
pub mod reports;
pub mod shifts;
pub mod tables;

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = std::time::Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        target: "http_access",
        "{} {} {} {}ms",
        method,
        uri,
        response.status(),
        started.elapsed().as_millis()
    );

    response
}

/// Build the Axum router (without state)
pub fn build_router() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(orders::router())
        .merge(shifts::router())
        .merge(tables::router())
        .merge(products::router())
        .merge(reports::router())
}

/// Full application: routes, JWT middleware, state and tower-http layers
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // require_auth 内部会跳过公共路由
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(log_request))
}
