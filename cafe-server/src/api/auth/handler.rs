//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State, http::StatusCode};

use crate::api::extract::AppJson;
use crate::auth::permissions::get_default_permissions;
use crate::auth::{CurrentUser, password};
use crate::core::ServerState;
use crate::db::repository::{RepoError, user};
use crate::security_log;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, MIN_PASSWORD_LEN, validate_email,
    validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{LoginRequest, LoginResponse, User, UserCreate, UserInfo};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

fn issue_token(state: &ServerState, user: &User) -> AppResult<String> {
    let role = user.role.as_str();
    state
        .get_jwt_service()
        .generate_token(user.id, &user.email, role, &get_default_permissions(role))
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))
}

/// POST /api/auth/login - 登录
///
/// Unknown email and wrong password give the same error after the same delay.
pub async fn login(
    State(state): State<ServerState>,
    AppJson(req): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let found = user::find_by_email(state.pool(), &req.email).await?;

    // Fixed delay before inspecting the result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let Some(found) = found else {
        security_log!(WARN, "login_failed", email = %req.email, reason = "user_not_found");
        return Err(AppError::invalid_credentials());
    };

    if !password::verify_password(&req.password, &found.password_hash) {
        security_log!(WARN, "login_failed", email = %req.email, reason = "invalid_password");
        return Err(AppError::invalid_credentials());
    }

    if !found.is_active {
        security_log!(WARN, "login_disabled", user_id = found.id, email = %found.email);
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    let token = issue_token(&state, &found)?;
    user::touch_last_login(state.pool(), found.id).await?;
    security_log!(INFO, "login_success", user_id = found.id, role = %found.role);

    let refreshed = user::find_by_id(state.pool(), found.id).await?.unwrap_or(found);
    Ok(Json(LoginResponse {
        token,
        user: refreshed.into(),
    }))
}

/// POST /api/auth/register - 创建员工账号
pub async fn register(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    AppJson(req): AppJson<UserCreate>,
) -> AppResult<(StatusCode, Json<LoginResponse>)> {
    validate_email(&req.email)?;
    validate_required_text(&req.full_name, "full_name", MAX_NAME_LEN)?;
    validate_optional_text(&req.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    if req.password.len() < MIN_PASSWORD_LEN || req.password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password must be between {MIN_PASSWORD_LEN} and {MAX_PASSWORD_LEN} characters"
        )));
    }

    let hash = password::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    let created = user::create(state.pool(), &req, &hash)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::UserEmailExists, msg),
            other => other.into(),
        })?;

    security_log!(
        INFO,
        "user_registered",
        user_id = created.id,
        role = %created.role,
        by = current_user.id
    );

    let token = issue_token(&state, &created)?;
    Ok((
        StatusCode::CREATED,
        Json(LoginResponse {
            token,
            user: created.into(),
        }),
    ))
}

/// GET /api/auth/me - 当前用户
pub async fn me(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<UserInfo>> {
    let found = user::find_by_id(state.pool(), current_user.id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::UserNotFound,
                format!("User {} not found", current_user.id),
            )
        })?;
    Ok(Json(found.into()))
}
