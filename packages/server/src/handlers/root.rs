use axum::Json;
use tracing::instrument;

use crate::error::ErrorBody;
use crate::extractors::auth::AuthUser;
use crate::resources::{self, ApiRoot};

#[utoipa::path(
    get,
    path = "/",
    tag = "Meta",
    operation_id = "apiRoot",
    summary = "List the available resource collections",
    responses(
        (status = 200, description = "Resource name to collection path", body = ApiRoot),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(_auth_user))]
pub async fn api_root(_auth_user: AuthUser) -> Json<ApiRoot> {
    Json(resources::api_root("/api/v1"))
}
