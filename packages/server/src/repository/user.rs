use sea_orm::*;

use super::for_update;
use crate::entity::{auth_token, portfolio_item, user};
use crate::error::AppError;
use crate::models::shared::normalize_optional;
use crate::models::user::{UpdateUserRequest, UserListQuery, validate_update_user};

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    query: &UserListQuery,
) -> Result<Vec<user::Model>, AppError> {
    let mut select = user::Entity::find();
    if let Some(role) = query.role {
        select = select.filter(user::Column::Role.eq(role));
    }
    Ok(select.order_by_asc(user::Column::Id).all(conn).await?)
}

pub async fn find<C: ConnectionTrait>(conn: &C, id: i32) -> Result<user::Model, AppError> {
    user::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))
}

pub async fn find_by_username<C: ConnectionTrait>(
    conn: &C,
    username: &str,
) -> Result<Option<user::Model>, AppError> {
    Ok(user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(conn)
        .await?)
}

/// Whether `column = value` is taken by a user other than `except`.
pub(crate) async fn is_taken<C: ConnectionTrait>(
    conn: &C,
    column: user::Column,
    value: &str,
    except: Option<i32>,
) -> Result<bool, AppError> {
    let mut select = user::Entity::find().filter(column.eq(value));
    if let Some(id) = except {
        select = select.filter(user::Column::Id.ne(id));
    }
    Ok(select.count(conn).await? > 0)
}

/// Caller is responsible for deciding whether a role change is allowed.
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    req: UpdateUserRequest,
) -> Result<user::Model, AppError> {
    validate_update_user(&req)?;

    if req == UpdateUserRequest::default() {
        return find(db, id).await;
    }

    let txn = super::begin_write(db).await?;
    let existing = for_update(user::Entity::find_by_id(id), &txn)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    if let Some(ref username) = req.username
        && is_taken(&txn, user::Column::Username, username.trim(), Some(id)).await?
    {
        return Err(AppError::field(
            "username",
            "A user with that username already exists.",
        ));
    }
    if let Some(ref email) = req.email
        && is_taken(&txn, user::Column::Email, email.trim(), Some(id)).await?
    {
        return Err(AppError::field("email", "A user with that email already exists."));
    }

    let mut active: user::ActiveModel = existing.into();

    if let Some(username) = req.username {
        active.username = Set(username.trim().to_string());
    }
    if let Some(email) = req.email {
        active.email = Set(email.trim().to_string());
    }
    if let Some(first_name) = req.first_name {
        active.first_name = Set(first_name.trim().to_string());
    }
    if let Some(last_name) = req.last_name {
        active.last_name = Set(last_name.trim().to_string());
    }
    if let Some(role) = req.role {
        active.role = Set(role);
    }
    if let Some(instagram) = req.instagram {
        active.instagram = Set(normalize_optional(instagram));
    }

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(model)
}

/// Delete a user. Their token goes with them; portfolio items they created
/// stay but lose the creator reference.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), AppError> {
    let txn = super::begin_write(db).await?;
    let _user = for_update(user::Entity::find_by_id(id), &txn)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    auth_token::Entity::delete_many()
        .filter(auth_token::Column::UserId.eq(id))
        .exec(&txn)
        .await?;

    let orphaned = portfolio_item::Entity::update_many()
        .set(portfolio_item::ActiveModel {
            created_by: Set(None),
            ..Default::default()
        })
        .filter(portfolio_item::Column::CreatedBy.eq(id))
        .exec(&txn)
        .await?;

    user::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::debug!(
        user_id = id,
        portfolio_items = orphaned.rows_affected,
        "Deleted user"
    );
    Ok(())
}
