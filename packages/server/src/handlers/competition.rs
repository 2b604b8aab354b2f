use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::extractors::query::AppQuery;
use crate::models::competition::*;
use crate::repository;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Competitions",
    operation_id = "listCompetitions",
    summary = "List competitions",
    description = "Returns all competitions ordered by ID, optionally filtered by status.",
    params(CompetitionListQuery),
    responses(
        (status = 200, description = "List of competitions", body = Vec<CompetitionResponse>),
        (status = 400, description = "Invalid filter (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, _auth_user, query))]
pub async fn list_competitions(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<CompetitionListQuery>,
) -> Result<Json<Vec<CompetitionResponse>>, AppError> {
    let models = repository::competition::list(&state.db, &query).await?;
    Ok(Json(models.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Competitions",
    operation_id = "createCompetition",
    summary = "Create a competition",
    description = "Admin only. `status` defaults to UPCOMING; `price` must be 0 unless `isPaid` is set.",
    request_body = CreateCompetitionRequest,
    responses(
        (status = 201, description = "Competition created", body = CompetitionResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(title = %payload.title))]
pub async fn create_competition(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateCompetitionRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_admin()?;

    let model = repository::competition::create(&state.db, payload).await?;

    Ok((StatusCode::CREATED, Json(CompetitionResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Competitions",
    operation_id = "getCompetition",
    summary = "Get a competition by ID",
    params(("id" = i32, Path, description = "Competition ID")),
    responses(
        (status = 200, description = "Competition details", body = CompetitionResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Competition not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, _auth_user), fields(id))]
pub async fn get_competition(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<CompetitionResponse>, AppError> {
    let model = repository::competition::find(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Competitions",
    operation_id = "updateCompetition",
    summary = "Update a competition",
    description = "Admin only. PATCH semantics: omitted fields keep their stored values. Date order and the paid/price rule are checked against the merged record. An empty payload returns the current resource unchanged.",
    params(("id" = i32, Path, description = "Competition ID")),
    request_body = UpdateCompetitionRequest,
    responses(
        (status = 200, description = "Competition updated", body = CompetitionResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Competition not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_competition(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateCompetitionRequest>,
) -> Result<Json<CompetitionResponse>, AppError> {
    auth_user.require_admin()?;

    let model = repository::competition::update(&state.db, id, payload).await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Competitions",
    operation_id = "deleteCompetition",
    summary = "Delete a competition",
    description = "Admin only. Cascade-deletes every registration for the competition.",
    params(("id" = i32, Path, description = "Competition ID")),
    responses(
        (status = 204, description = "Competition deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Competition not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_competition(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_admin()?;

    repository::competition::delete(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
