use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::entity::user::{self, Role};
use crate::error::AppError;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Authenticated user resolved from the `Authorization` header.
///
/// Both `Bearer <token>` and `Token <token>` schemes are accepted. Add this as
/// a handler parameter to require authentication; role checks happen in the
/// handler body.
pub struct AuthUser {
    pub user_id: i32,
    pub username: String,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Returns `Ok(())` for admins, `Err(PermissionDenied)` otherwise.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }

    /// Admins may act on anyone; members only on their own account.
    pub fn require_self_or_admin(&self, user_id: i32) -> Result<(), AppError> {
        if self.is_admin() || self.user_id == user_id {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }
}

impl From<user::Model> for AuthUser {
    fn from(user: user::Model) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::TokenMissing)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .or_else(|| auth_header.strip_prefix("Token "))
            .ok_or(AppError::TokenInvalid)?;

        let user = AuthService::new(&state.db)
            .resolve_token(token.trim())
            .await?;

        Ok(user.into())
    }
}
