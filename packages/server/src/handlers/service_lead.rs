use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::entity::service_lead::LeadStatus;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::extractors::query::AppQuery;
use crate::models::service_lead::*;
use crate::repository;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Service Leads",
    operation_id = "listServiceLeads",
    summary = "List service leads",
    description = "Admin only. Leads hold client contact details.",
    params(ServiceLeadListQuery),
    responses(
        (status = 200, description = "List of service leads", body = Vec<ServiceLeadResponse>),
        (status = 400, description = "Invalid filter (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, auth_user, query))]
pub async fn list_service_leads(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ServiceLeadListQuery>,
) -> Result<Json<Vec<ServiceLeadResponse>>, AppError> {
    auth_user.require_admin()?;

    let models = repository::service_lead::list(&state.db, &query).await?;
    Ok(Json(models.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Service Leads",
    operation_id = "createServiceLead",
    summary = "Submit a service enquiry",
    description = "Any authenticated user may submit a lead. Only admins may set a `status` other than NEW.",
    request_body = CreateServiceLeadRequest,
    responses(
        (status = 201, description = "Lead created", body = ServiceLeadResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(project_type = %payload.project_type))]
pub async fn create_service_lead(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateServiceLeadRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.status.is_some_and(|s| s != LeadStatus::default()) {
        auth_user.require_admin()?;
    }

    let model = repository::service_lead::create(&state.db, payload).await?;

    Ok((StatusCode::CREATED, Json(ServiceLeadResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Service Leads",
    operation_id = "getServiceLead",
    summary = "Get a service lead by ID",
    description = "Admin only.",
    params(("id" = i32, Path, description = "Service lead ID")),
    responses(
        (status = 200, description = "Service lead details", body = ServiceLeadResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Service lead not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn get_service_lead(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<ServiceLeadResponse>, AppError> {
    auth_user.require_admin()?;

    let model = repository::service_lead::find(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Service Leads",
    operation_id = "updateServiceLead",
    summary = "Update a service lead",
    description = "Admin only. PATCH semantics.",
    params(("id" = i32, Path, description = "Service lead ID")),
    request_body = UpdateServiceLeadRequest,
    responses(
        (status = 200, description = "Service lead updated", body = ServiceLeadResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Service lead not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_service_lead(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateServiceLeadRequest>,
) -> Result<Json<ServiceLeadResponse>, AppError> {
    auth_user.require_admin()?;

    let model = repository::service_lead::update(&state.db, id, payload).await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Service Leads",
    operation_id = "deleteServiceLead",
    summary = "Delete a service lead",
    description = "Admin only.",
    params(("id" = i32, Path, description = "Service lead ID")),
    responses(
        (status = 204, description = "Service lead deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Service lead not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_service_lead(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_admin()?;

    repository::service_lead::delete(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
