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
use crate::models::workshop::*;
use crate::repository;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Workshops",
    operation_id = "listWorkshops",
    summary = "List workshops",
    description = "Returns all workshops ordered by ID, optionally filtered by mode.",
    params(WorkshopListQuery),
    responses(
        (status = 200, description = "List of workshops", body = Vec<WorkshopResponse>),
        (status = 400, description = "Invalid filter (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, _auth_user, query))]
pub async fn list_workshops(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<WorkshopListQuery>,
) -> Result<Json<Vec<WorkshopResponse>>, AppError> {
    let models = repository::workshop::list(&state.db, &query).await?;
    Ok(Json(models.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Workshops",
    operation_id = "createWorkshop",
    summary = "Create a workshop",
    description = "Admin only. OFFLINE workshops require a `venue`; `capacity` must be positive.",
    request_body = CreateWorkshopRequest,
    responses(
        (status = 201, description = "Workshop created", body = WorkshopResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(title = %payload.title))]
pub async fn create_workshop(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateWorkshopRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_admin()?;

    let model = repository::workshop::create(&state.db, payload).await?;

    Ok((StatusCode::CREATED, Json(WorkshopResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Workshops",
    operation_id = "getWorkshop",
    summary = "Get a workshop by ID",
    params(("id" = i32, Path, description = "Workshop ID")),
    responses(
        (status = 200, description = "Workshop details", body = WorkshopResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Workshop not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, _auth_user), fields(id))]
pub async fn get_workshop(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<WorkshopResponse>, AppError> {
    let model = repository::workshop::find(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Workshops",
    operation_id = "updateWorkshop",
    summary = "Update a workshop",
    description = "Admin only. PATCH semantics: omitted fields keep their stored values. Date order and the venue rule are checked against the merged record, and `capacity` cannot drop below the number of existing registrations.",
    params(("id" = i32, Path, description = "Workshop ID")),
    request_body = UpdateWorkshopRequest,
    responses(
        (status = 200, description = "Workshop updated", body = WorkshopResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Workshop not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_workshop(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateWorkshopRequest>,
) -> Result<Json<WorkshopResponse>, AppError> {
    auth_user.require_admin()?;

    let model = repository::workshop::update(&state.db, id, payload).await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Workshops",
    operation_id = "deleteWorkshop",
    summary = "Delete a workshop",
    description = "Admin only. Cascade-deletes every registration for the workshop.",
    params(("id" = i32, Path, description = "Workshop ID")),
    responses(
        (status = 204, description = "Workshop deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Workshop not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_workshop(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_admin()?;

    repository::workshop::delete(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
