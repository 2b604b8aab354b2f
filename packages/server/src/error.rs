use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`,
    /// `CONSTRAINT_VIOLATION`, `INVALID_CREDENTIALS`, `TOKEN_MISSING`,
    /// `TOKEN_INVALID`, `PERMISSION_DENIED`, `NOT_FOUND`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Password confirmation does not match.")]
    pub message: String,
    /// Request field the error refers to, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "password_confirm")]
    pub field: Option<&'static str>,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation {
        field: Option<&'static str>,
        message: String,
    },
    ConstraintViolation(String),
    InvalidCredentials,
    TokenMissing,
    TokenInvalid,
    PermissionDenied,
    NotFound(String),
    Internal(String),
}

impl AppError {
    /// Validation failure that is not tied to a single field.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Validation failure scoped to one request field.
    pub fn field(field: &'static str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: Some(field),
            message: message.into(),
        }
    }

    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message,
                    field,
                },
            ),
            AppError::ConstraintViolation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "CONSTRAINT_VIOLATION",
                    message: msg,
                    field: None,
                },
            ),
            AppError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "INVALID_CREDENTIALS",
                    message: "Invalid credentials".into(),
                    field: None,
                },
            ),
            AppError::TokenMissing => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "TOKEN_MISSING",
                    message: "Authentication credentials were not provided".into(),
                    field: None,
                },
            ),
            AppError::TokenInvalid => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "TOKEN_INVALID",
                    message: "Invalid token".into(),
                    field: None,
                },
            ),
            AppError::PermissionDenied => (
                StatusCode::FORBIDDEN,
                ErrorBody {
                    code: "PERMISSION_DENIED",
                    message: "Insufficient permissions".into(),
                    field: None,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                    field: None,
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                        field: None,
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                tracing::debug!("Unique constraint violated: {detail}");
                AppError::ConstraintViolation("A record with these values already exists".into())
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                tracing::debug!("Foreign key constraint violated: {detail}");
                AppError::ConstraintViolation("Referenced record does not exist".into())
            }
            _ => match err {
                DbErr::RecordNotFound(msg) => AppError::NotFound(msg),
                other => AppError::Internal(other.to_string()),
            },
        }
    }
}
