//! Auth REST API handlers.
//!
//! Thin HTTP adapters over the auth gateway: deserialize, throttle, call the
//! service, shape the response. All policy (validation, generic outcomes,
//! rotation) lives in the gateway.

use crate::api::auth::auth_response::AuthResponse;
use crate::api::auth::login_request::LoginRequest;
use crate::api::auth::refresh_request::RefreshRequest;
use crate::api::auth::register_request::RegisterRequest;
use crate::api::auth::user_dto::UserDto;
use crate::api::error::Result as ApiResult;
use crate::api::extractors::auth_user::AuthUser;
use crate::api::message_response::MessageResponse;
use crate::state::AppState;

use axum::{Json, extract::State, http::StatusCode};

/// POST /api/v1/auth/register
///
/// Create a new account. Does not log the user in.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    state.login_limiter.check(&req.email)?;

    state
        .auth
        .register(&req.user_name, &req.email, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// POST /api/v1/auth/login
///
/// Verify credentials and return an access/refresh pair plus the public
/// user view. Attempts are throttled per submitted email.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    state.login_limiter.check(&req.email)?;

    let (pair, user) = state.auth.login(&req.email, &req.password).await?;

    Ok(Json(AuthResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        user: UserDto::from_user(&user),
    }))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token for a new pair. The presented token is rotated
/// away on success. Attempts are throttled per presented token.
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<AuthResponse>> {
    state.login_limiter.check(&req.refresh_token)?;

    let (pair, user) = state.auth.refresh(&req.refresh_token).await?;

    Ok(Json(AuthResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        user: UserDto::from_user(&user),
    }))
}

/// POST /api/v1/auth/logout
///
/// End the caller's session. Requires a valid access token; succeeds even
/// when no session was active.
pub async fn logout(
    State(state): State<AppState>,
    AuthUser { user_id, .. }: AuthUser,
) -> ApiResult<Json<MessageResponse>> {
    state.auth.logout(user_id).await?;

    Ok(Json(MessageResponse::new("Logged out successfully")))
}
