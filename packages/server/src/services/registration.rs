use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, SqlErr};

use crate::entity::user::{self, DEFAULT_ROLE};
use crate::error::AppError;
use crate::models::auth::{RegisterRequest, validate_register_request};
use crate::models::shared::normalize_optional;
use crate::repository;
use crate::utils::hash;

fn username_taken() -> AppError {
    AppError::field("username", "A user with that username already exists.")
}

fn email_taken() -> AppError {
    AppError::field("email", "A user with that email already exists.")
}

/// Create a user account from a registration payload.
///
/// Uniqueness is checked up front for friendly field errors, and again by the
/// database on insert for requests that race each other.
///
/// Unless `allow_role` is set, a requested role other than the default is
/// rejected, so self-service signups always produce members.
pub async fn register<C: ConnectionTrait>(
    conn: &C,
    payload: RegisterRequest,
    allow_role: bool,
) -> Result<user::Model, AppError> {
    validate_register_request(&payload)?;
    if !allow_role && payload.role.is_some_and(|role| role != DEFAULT_ROLE) {
        return Err(AppError::field("role", "Only admins may assign a role."));
    }

    let username = payload.username.trim().to_string();
    let email = payload.email.trim().to_string();

    if repository::user::is_taken(conn, user::Column::Username, &username, None).await? {
        return Err(username_taken());
    }
    if repository::user::is_taken(conn, user::Column::Email, &email, None).await? {
        return Err(email_taken());
    }

    let password_hash = hash::hash_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))?;

    let new_user = user::ActiveModel {
        username: Set(username.clone()),
        email: Set(email),
        password: Set(password_hash),
        first_name: Set(payload.first_name.unwrap_or_default().trim().to_string()),
        last_name: Set(payload.last_name.unwrap_or_default().trim().to_string()),
        role: Set(payload.role.unwrap_or(DEFAULT_ROLE)),
        instagram: Set(normalize_optional(payload.instagram)),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    match new_user.insert(conn).await {
        Ok(model) => {
            tracing::info!(user_id = model.id, username = %model.username, "Registered user");
            Ok(model)
        }
        Err(e) => match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                tracing::debug!("Registration lost a uniqueness race: {detail}");
                // The detail names the violated column on every supported backend.
                if detail.contains("email") {
                    Err(email_taken())
                } else {
                    Err(username_taken())
                }
            }
            _ => Err(e.into()),
        },
    }
}
