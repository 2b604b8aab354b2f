use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::entity::workshop_registration::PaymentStatus;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::extractors::query::AppQuery;
use crate::models::workshop_registration::*;
use crate::repository;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Workshop Registrations",
    operation_id = "listWorkshopRegistrations",
    summary = "List workshop registrations",
    description = "Returns registrations ordered by ID. Filter by `workshop` ID and/or `payment_status`.",
    params(WorkshopRegistrationListQuery),
    responses(
        (status = 200, description = "List of registrations", body = Vec<WorkshopRegistrationResponse>),
        (status = 400, description = "Invalid filter (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, _auth_user, query))]
pub async fn list_workshop_registrations(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<WorkshopRegistrationListQuery>,
) -> Result<Json<Vec<WorkshopRegistrationResponse>>, AppError> {
    let models = repository::workshop_registration::list(&state.db, &query).await?;
    Ok(Json(models.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Workshop Registrations",
    operation_id = "createWorkshopRegistration",
    summary = "Register for a workshop",
    description = "Any authenticated user may book a seat while the workshop has capacity left. Only admins may set a `paymentStatus` other than PENDING.",
    request_body = CreateWorkshopRegistrationRequest,
    responses(
        (status = 201, description = "Registration created", body = WorkshopRegistrationResponse),
        (status = 400, description = "Validation error or unknown workshop (VALIDATION_ERROR), workshop full (CONSTRAINT_VIOLATION)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(workshop_id = payload.workshop))]
pub async fn create_workshop_registration(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateWorkshopRegistrationRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload
        .payment_status
        .is_some_and(|s| s != PaymentStatus::default())
    {
        auth_user.require_admin()?;
    }

    let model = repository::workshop_registration::create(&state.db, payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(WorkshopRegistrationResponse::from(model)),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Workshop Registrations",
    operation_id = "getWorkshopRegistration",
    summary = "Get a workshop registration by ID",
    params(("id" = i32, Path, description = "Registration ID")),
    responses(
        (status = 200, description = "Registration details", body = WorkshopRegistrationResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Registration not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, _auth_user), fields(id))]
pub async fn get_workshop_registration(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<WorkshopRegistrationResponse>, AppError> {
    let model = repository::workshop_registration::find(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Workshop Registrations",
    operation_id = "updateWorkshopRegistration",
    summary = "Update a workshop registration",
    description = "Admin only. PATCH semantics. Moving a registration to another workshop requires a free seat there.",
    params(("id" = i32, Path, description = "Registration ID")),
    request_body = UpdateWorkshopRegistrationRequest,
    responses(
        (status = 200, description = "Registration updated", body = WorkshopRegistrationResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Registration not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_workshop_registration(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateWorkshopRegistrationRequest>,
) -> Result<Json<WorkshopRegistrationResponse>, AppError> {
    auth_user.require_admin()?;

    let model = repository::workshop_registration::update(&state.db, id, payload).await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Workshop Registrations",
    operation_id = "deleteWorkshopRegistration",
    summary = "Delete a workshop registration",
    description = "Admin only.",
    params(("id" = i32, Path, description = "Registration ID")),
    responses(
        (status = 204, description = "Registration deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Registration not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_workshop_registration(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_admin()?;

    repository::workshop_registration::delete(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
