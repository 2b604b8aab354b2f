use std::sync::LazyLock;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set, SqlErr,
};

use crate::entity::{auth_token, user};
use crate::error::AppError;
use crate::repository;
use crate::utils::{hash, token};

/// Verified against when the username is unknown, so both failure paths cost
/// one Argon2 verification.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash::hash_password("pixellens-dummy-password").ok());

pub struct AuthService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> AuthService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Check a username/password pair. Both "no such user" and "wrong
    /// password" yield the same `InvalidCredentials` error.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<user::Model, AppError> {
        let Some(user) = repository::user::find_by_username(self.conn, username.trim()).await?
        else {
            if let Some(dummy) = DUMMY_HASH.as_deref() {
                let _ = hash::verify_password(password, dummy);
            }
            return Err(AppError::InvalidCredentials);
        };

        let valid = hash::verify_password(password, &user.password)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {e}")))?;
        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Return the user's token, minting one on first use.
    ///
    /// Idempotent: repeated calls return the same key until the user is deleted.
    pub async fn issue_token(&self, user_id: i32) -> Result<String, AppError> {
        if let Some(existing) = self.find_token_for(user_id).await? {
            return Ok(existing.key);
        }

        let new_token = auth_token::ActiveModel {
            key: Set(token::generate()),
            user_id: Set(user_id),
            created_at: Set(Utc::now()),
        };

        match new_token.insert(self.conn).await {
            Ok(model) => Ok(model.key),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                // A concurrent login for the same user won the insert.
                tracing::debug!(user_id, "Token minted concurrently, reusing it");
                self.find_token_for(user_id)
                    .await?
                    .map(|t| t.key)
                    .ok_or_else(|| AppError::Internal("Token vanished after conflict".into()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Map a presented token to its owner.
    pub async fn resolve_token(&self, key: &str) -> Result<user::Model, AppError> {
        if !token::is_well_formed(key) {
            return Err(AppError::TokenInvalid);
        }

        let token = auth_token::Entity::find_by_id(key.to_string())
            .one(self.conn)
            .await?
            .ok_or(AppError::TokenInvalid)?;

        user::Entity::find_by_id(token.user_id)
            .one(self.conn)
            .await?
            .ok_or(AppError::TokenInvalid)
    }

    async fn find_token_for(&self, user_id: i32) -> Result<Option<auth_token::Model>, AppError> {
        Ok(auth_token::Entity::find()
            .filter(auth_token::Column::UserId.eq(user_id))
            .one(self.conn)
            .await?)
    }
}
