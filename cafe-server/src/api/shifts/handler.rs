//! Cash Shift API Handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::api::extract::{AppJson, AppPath, AppQuery};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::shifts;
use crate::utils::AppResult;
use shared::models::{CashShift, ShiftClose, ShiftOpen};

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: String,
}

/// POST /api/shifts/open - 开班 (当前用户为收银员)
pub async fn open(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    AppJson(payload): AppJson<ShiftOpen>,
) -> AppResult<(StatusCode, Json<CashShift>)> {
    let shift = shifts::open_shift(state.pool(), current_user.id, payload.initial_amount).await?;
    Ok((StatusCode::CREATED, Json(shift)))
}

/// POST /api/shifts/{id}/close - 收班
pub async fn close(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<ShiftClose>,
) -> AppResult<Json<CashShift>> {
    let shift = shifts::close_shift(
        state.pool(),
        state.timezone(),
        id,
        payload.counted_amount,
        payload.notes,
    )
    .await?;
    Ok(Json(shift))
}

/// GET /api/shifts/open-for-me - 当前用户的未关闭班次
pub async fn open_for_me(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<CashShift>> {
    Ok(Json(shifts::get_open_shift(state.pool(), current_user.id).await?))
}

/// GET /api/shifts/by-date?date=YYYY-MM-DD
pub async fn by_date(
    State(state): State<ServerState>,
    AppQuery(query): AppQuery<DateQuery>,
) -> AppResult<Json<Vec<CashShift>>> {
    let list = shifts::list_shifts_by_date(state.pool(), state.timezone(), &query.date).await?;
    Ok(Json(list))
}

/// GET /api/shifts/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<CashShift>> {
    Ok(Json(shifts::get_shift(state.pool(), id).await?))
}
