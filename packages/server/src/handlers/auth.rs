use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::auth::{RegisterRequest, TokenRequest, TokenResponse, validate_token_request};
use crate::models::user::UserResponse;
use crate::repository;
use crate::services::{auth::AuthService, registration};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    operation_id = "register",
    summary = "Register a new account",
    description = "Creates a user account. `password_confirm` must equal `password`. Username and email must be unique; conflicts are reported against the offending field. New accounts are always `MEMBER`; requesting another role is a `role` field error.",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = registration::register(&state.db, payload, false).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[utoipa::path(
    post,
    path = "/token",
    tag = "Auth",
    operation_id = "obtainToken",
    summary = "Exchange credentials for an API token",
    description = "Returns the caller's token, creating it on first login. Repeated logins return the same token.",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Missing fields (VALIDATION_ERROR) or bad credentials (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn obtain_token(
    State(state): State<AppState>,
    AppJson(payload): AppJson<TokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    validate_token_request(&payload)?;

    let service = AuthService::new(&state.db);
    let user = service
        .authenticate(&payload.username, &payload.password)
        .await?;
    let token = service.issue_token(user.id).await?;

    Ok(Json(TokenResponse { token }))
}

#[utoipa::path(
    get,
    path = "/me",
    tag = "Auth",
    operation_id = "getCurrentUser",
    summary = "Get the authenticated user's profile",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn me(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, AppError> {
    let user = repository::user::find(&state.db, auth_user.user_id).await?;
    Ok(Json(user.into()))
}
