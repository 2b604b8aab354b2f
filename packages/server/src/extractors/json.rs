use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Request body extractor. Every rejection (wrong content type, bad syntax,
/// missing or mistyped fields) becomes a `VALIDATION_ERROR`.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => {
                tracing::debug!(status = %rejection.status(), "Rejected request body: {}", rejection.body_text());
                Err(match rejection {
                    JsonRejection::MissingJsonContentType(_) => AppError::validation(
                        "Expected a JSON body with `Content-Type: application/json`",
                    ),
                    other => AppError::validation(other.body_text()),
                })
            }
        }
    }
}
