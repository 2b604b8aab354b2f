use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::entity::portfolio_item;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::extractors::query::AppQuery;
use crate::models::portfolio::*;
use crate::repository;
use crate::state::AppState;
use crate::video;

/// Admins may manage any item; members only the ones they created.
fn check_item_access(auth_user: &AuthUser, item: &portfolio_item::Model) -> Result<(), AppError> {
    if auth_user.is_admin() || item.created_by == Some(auth_user.user_id) {
        Ok(())
    } else {
        Err(AppError::PermissionDenied)
    }
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Portfolio",
    operation_id = "listPortfolioItems",
    summary = "List portfolio items",
    description = "Returns gallery items ordered by ID. Filter by `type`, `category` and/or `created_by`.",
    params(PortfolioListQuery),
    responses(
        (status = 200, description = "List of portfolio items", body = Vec<PortfolioItemResponse>),
        (status = 400, description = "Invalid filter (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, _auth_user, query))]
pub async fn list_portfolio_items(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PortfolioListQuery>,
) -> Result<Json<Vec<PortfolioItemResponse>>, AppError> {
    let models = repository::portfolio_item::list(&state.db, &query).await?;
    Ok(Json(models.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Portfolio",
    operation_id = "createPortfolioItem",
    summary = "Add a portfolio item",
    description = "`createdBy` defaults to the caller. Only admins may attribute an item to someone else.",
    request_body = CreatePortfolioItemRequest,
    responses(
        (status = 201, description = "Portfolio item created", body = PortfolioItemResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(title = %payload.title))]
pub async fn create_portfolio_item(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreatePortfolioItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut payload = payload;
    match payload.created_by {
        Some(creator) if creator != auth_user.user_id => auth_user.require_admin()?,
        Some(_) => {}
        None => payload.created_by = Some(auth_user.user_id),
    }

    let model = repository::portfolio_item::create(&state.db, payload).await?;

    Ok((StatusCode::CREATED, Json(PortfolioItemResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Portfolio",
    operation_id = "getPortfolioItem",
    summary = "Get a portfolio item by ID",
    params(("id" = i32, Path, description = "Portfolio item ID")),
    responses(
        (status = 200, description = "Portfolio item", body = PortfolioItemResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Portfolio item not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, _auth_user), fields(id))]
pub async fn get_portfolio_item(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<PortfolioItemResponse>, AppError> {
    let model = repository::portfolio_item::find(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Portfolio",
    operation_id = "updatePortfolioItem",
    summary = "Update a portfolio item",
    description = "Admins or the item's creator. PATCH semantics; `thumbnailUrl` may be set to null. Reassigning `createdBy` is admin only.",
    params(("id" = i32, Path, description = "Portfolio item ID")),
    request_body = UpdatePortfolioItemRequest,
    responses(
        (status = 200, description = "Portfolio item updated", body = PortfolioItemResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Portfolio item not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_portfolio_item(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdatePortfolioItemRequest>,
) -> Result<Json<PortfolioItemResponse>, AppError> {
    let new_creator = payload.created_by;
    let model = repository::portfolio_item::update(&state.db, id, payload, |existing| {
        check_item_access(&auth_user, existing)?;
        if new_creator.is_some_and(|creator| creator != existing.created_by) {
            auth_user.require_admin()?;
        }
        Ok(())
    })
    .await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Portfolio",
    operation_id = "deletePortfolioItem",
    summary = "Delete a portfolio item",
    description = "Admins or the item's creator.",
    params(("id" = i32, Path, description = "Portfolio item ID")),
    responses(
        (status = 204, description = "Portfolio item deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Portfolio item not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_portfolio_item(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    repository::portfolio_item::delete(&state.db, id, |existing| {
        check_item_access(&auth_user, existing)
    })
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/fetch-video-data",
    tag = "Portfolio",
    operation_id = "fetchVideoData",
    summary = "Look up embeddable metadata for a video link",
    description = "Extracts the video ID from a watch, short, embed, shorts or search-result link. When no API key is configured or the lookup fails, a payload built from the ID alone is returned with a `notice`.",
    request_body = FetchVideoDataRequest,
    responses(
        (status = 200, description = "Video metadata", body = VideoDataResponse),
        (status = 400, description = "Missing or unrecognized URL (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, _auth_user, payload))]
pub async fn fetch_video_data(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<FetchVideoDataRequest>,
) -> Result<Json<VideoDataResponse>, AppError> {
    let data = video::lookup(state.video.as_deref(), &payload.url).await?;
    Ok(Json(data))
}
