//! Reports API Handlers
//!
//! Query: `?start=YYYY-MM-DD&end=YYYY-MM-DD[&limit=N]`, both dates inclusive.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::api::extract::AppQuery;
use crate::core::ServerState;
use crate::reports;
use crate::utils::AppResult;
use shared::models::{AmountSummary, DailySales, ProductSales, SalesReport};

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start: String,
    pub end: String,
    pub limit: Option<i64>,
}

/// GET /api/reports/sales
pub async fn sales(
    State(state): State<ServerState>,
    AppQuery(q): AppQuery<RangeQuery>,
) -> AppResult<Json<SalesReport>> {
    let report = reports::sales_report(state.pool(), state.timezone(), &q.start, &q.end).await?;
    Ok(Json(report))
}

/// GET /api/reports/top-products
pub async fn top_products(
    State(state): State<ServerState>,
    AppQuery(q): AppQuery<RangeQuery>,
) -> AppResult<Json<Vec<ProductSales>>> {
    let rows =
        reports::top_products(state.pool(), state.timezone(), &q.start, &q.end, q.limit).await?;
    Ok(Json(rows))
}

/// GET /api/reports/sales-by-day
pub async fn sales_by_day(
    State(state): State<ServerState>,
    AppQuery(q): AppQuery<RangeQuery>,
) -> AppResult<Json<Vec<DailySales>>> {
    let days = reports::sales_by_day(state.pool(), state.timezone(), &q.start, &q.end).await?;
    Ok(Json(days))
}

/// GET /api/reports/total-income
pub async fn total_income(
    State(state): State<ServerState>,
    AppQuery(q): AppQuery<RangeQuery>,
) -> AppResult<Json<AmountSummary>> {
    let summary = reports::total_income(state.pool(), state.timezone(), &q.start, &q.end).await?;
    Ok(Json(summary))
}

/// GET /api/reports/average-sale
pub async fn average_sale(
    State(state): State<ServerState>,
    AppQuery(q): AppQuery<RangeQuery>,
) -> AppResult<Json<AmountSummary>> {
    let summary = reports::average_sale(state.pool(), state.timezone(), &q.start, &q.end).await?;
    Ok(Json(summary))
}
