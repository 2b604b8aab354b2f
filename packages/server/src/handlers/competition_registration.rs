use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::entity::competition_registration::SubmissionStatus;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::extractors::query::AppQuery;
use crate::models::competition_registration::*;
use crate::repository;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Competition Registrations",
    operation_id = "listCompetitionRegistrations",
    summary = "List competition registrations",
    description = "Returns registrations ordered by ID. Filter by `competition` ID and/or `status`.",
    params(CompetitionRegistrationListQuery),
    responses(
        (status = 200, description = "List of registrations", body = Vec<CompetitionRegistrationResponse>),
        (status = 400, description = "Invalid filter (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, _auth_user, query))]
pub async fn list_competition_registrations(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<CompetitionRegistrationListQuery>,
) -> Result<Json<Vec<CompetitionRegistrationResponse>>, AppError> {
    let models = repository::competition_registration::list(&state.db, &query).await?;
    Ok(Json(models.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Competition Registrations",
    operation_id = "createCompetitionRegistration",
    summary = "Register for a competition",
    description = "Any authenticated user may submit an entry. Only admins may set a `status` other than SUBMITTED.",
    request_body = CreateCompetitionRegistrationRequest,
    responses(
        (status = 201, description = "Registration created", body = CompetitionRegistrationResponse),
        (status = 400, description = "Validation error or unknown competition (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(competition_id = payload.competition))]
pub async fn create_competition_registration(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateCompetitionRegistrationRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload
        .status
        .is_some_and(|s| s != SubmissionStatus::default())
    {
        auth_user.require_admin()?;
    }

    let model = repository::competition_registration::create(&state.db, payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(CompetitionRegistrationResponse::from(model)),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Competition Registrations",
    operation_id = "getCompetitionRegistration",
    summary = "Get a competition registration by ID",
    params(("id" = i32, Path, description = "Registration ID")),
    responses(
        (status = 200, description = "Registration details", body = CompetitionRegistrationResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Registration not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, _auth_user), fields(id))]
pub async fn get_competition_registration(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<CompetitionRegistrationResponse>, AppError> {
    let model = repository::competition_registration::find(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Competition Registrations",
    operation_id = "updateCompetitionRegistration",
    summary = "Update a competition registration",
    description = "Admin only. PATCH semantics. Used to shortlist entries and pick winners.",
    params(("id" = i32, Path, description = "Registration ID")),
    request_body = UpdateCompetitionRegistrationRequest,
    responses(
        (status = 200, description = "Registration updated", body = CompetitionRegistrationResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Registration not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_competition_registration(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateCompetitionRegistrationRequest>,
) -> Result<Json<CompetitionRegistrationResponse>, AppError> {
    auth_user.require_admin()?;

    let model = repository::competition_registration::update(&state.db, id, payload).await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Competition Registrations",
    operation_id = "deleteCompetitionRegistration",
    summary = "Delete a competition registration",
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
pub async fn delete_competition_registration(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_admin()?;

    repository::competition_registration::delete(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
