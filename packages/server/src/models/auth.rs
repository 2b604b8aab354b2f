use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::shared::{validate_email, validate_optional_text};
use crate::entity::user::Role;
use crate::error::AppError;

static USERNAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w.@+-]+$").expect("username regex should compile")
});

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Request body for user registration.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    /// Unique username (1-150 chars: letters, digits and `@.+-_`).
    #[schema(example = "lens_alice")]
    pub username: String,
    /// Unique email address.
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Password (8-128 characters).
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
    /// Must equal `password`.
    #[schema(example = "s3cure_P@ss!")]
    pub password_confirm: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Instagram handle.
    #[serde(default)]
    #[schema(example = "@alice.shoots")]
    pub instagram: Option<String>,
    /// Defaults to `MEMBER`. Self-registration may not pick any other role.
    #[serde(default)]
    pub role: Option<Role>,
}

pub fn validate_username(username: &str) -> Result<(), AppError> {
    let username = username.trim();
    if username.is_empty() || username.chars().count() > 150 {
        return Err(AppError::field(
            "username",
            "Username must be 1-150 characters",
        ));
    }
    if !USERNAME_PATTERN.is_match(username) {
        return Err(AppError::field(
            "username",
            "Username may contain only letters, digits and @/./+/-/_ characters",
        ));
    }
    Ok(())
}

fn validate_password_length(field: &'static str, password: &str) -> Result<(), AppError> {
    let len = password.chars().count();
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        return Err(AppError::field(
            field,
            format!("Password must be {MIN_PASSWORD_LEN}-{MAX_PASSWORD_LEN} characters"),
        ));
    }
    Ok(())
}

pub fn validate_register_request(payload: &RegisterRequest) -> Result<(), AppError> {
    validate_username(&payload.username)?;
    validate_email("email", &payload.email)?;
    validate_password_length("password", &payload.password)?;
    validate_password_length("password_confirm", &payload.password_confirm)?;
    if payload.password != payload.password_confirm {
        return Err(AppError::field(
            "password_confirm",
            "Password confirmation does not match.",
        ));
    }
    validate_optional_text("first_name", payload.first_name.as_deref(), 150)?;
    validate_optional_text("last_name", payload.last_name.as_deref(), 150)?;
    validate_optional_text("instagram", payload.instagram.as_deref(), 255)?;
    Ok(())
}

/// Request body for token issuance.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct TokenRequest {
    #[serde(default)]
    #[schema(example = "lens_alice")]
    pub username: String,
    #[serde(default)]
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_token_request(payload: &TokenRequest) -> Result<(), AppError> {
    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::validation("Username and password are required"));
    }
    Ok(())
}

/// Successful token issuance.
#[derive(Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    /// Opaque bearer token. Send as `Authorization: Bearer <token>`.
    #[schema(example = "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b")]
    pub token: String,
}
