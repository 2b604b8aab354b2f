use sea_orm::*;

use super::for_update;
use crate::entity::{portfolio_item, user};
use crate::error::AppError;
use crate::models::portfolio::{
    CreatePortfolioItemRequest, PortfolioListQuery, UpdatePortfolioItemRequest,
    validate_create_portfolio_item, validate_update_portfolio_item,
};
use crate::models::shared::normalize_optional;

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    query: &PortfolioListQuery,
) -> Result<Vec<portfolio_item::Model>, AppError> {
    let mut select = portfolio_item::Entity::find();
    if let Some(media_type) = query.media_type {
        select = select.filter(portfolio_item::Column::MediaType.eq(media_type));
    }
    if let Some(ref category) = query.category {
        select = select.filter(portfolio_item::Column::Category.eq(category.trim()));
    }
    if let Some(created_by) = query.created_by {
        select = select.filter(portfolio_item::Column::CreatedBy.eq(created_by));
    }
    Ok(select
        .order_by_asc(portfolio_item::Column::Id)
        .all(conn)
        .await?)
}

pub async fn find<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<portfolio_item::Model, AppError> {
    portfolio_item::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Portfolio item not found".into()))
}

async fn find_for_update<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<portfolio_item::Model, AppError> {
    for_update(portfolio_item::Entity::find_by_id(id), conn)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Portfolio item not found".into()))
}

async fn ensure_creator<C: ConnectionTrait>(conn: &C, user_id: i32) -> Result<(), AppError> {
    let exists = user::Entity::find_by_id(user_id).one(conn).await?.is_some();
    if !exists {
        return Err(AppError::field(
            "createdBy",
            format!("Invalid pk \"{user_id}\" - object does not exist."),
        ));
    }
    Ok(())
}

/// `req.created_by` is expected to already hold the effective creator.
pub async fn create<C: ConnectionTrait>(
    conn: &C,
    req: CreatePortfolioItemRequest,
) -> Result<portfolio_item::Model, AppError> {
    validate_create_portfolio_item(&req)?;

    if let Some(user_id) = req.created_by {
        ensure_creator(conn, user_id).await?;
    }

    let new_item = portfolio_item::ActiveModel {
        media_type: Set(req.media_type),
        title: Set(req.title.trim().to_string()),
        description: Set(req.description),
        media_url: Set(req.media_url.trim().to_string()),
        thumbnail_url: Set(normalize_optional(req.thumbnail_url)),
        category: Set(req.category.trim().to_string()),
        created_by: Set(req.created_by),
        ..Default::default()
    };

    Ok(new_item.insert(conn).await?)
}

/// `authorize` sees the locked row before anything is written.
pub async fn update<F>(
    db: &DatabaseConnection,
    id: i32,
    req: UpdatePortfolioItemRequest,
    authorize: F,
) -> Result<portfolio_item::Model, AppError>
where
    F: FnOnce(&portfolio_item::Model) -> Result<(), AppError>,
{
    validate_update_portfolio_item(&req)?;

    let txn = super::begin_write(db).await?;
    let existing = find_for_update(&txn, id).await?;
    authorize(&existing)?;

    if req == UpdatePortfolioItemRequest::default() {
        return Ok(existing);
    }
    if let Some(Some(user_id)) = req.created_by {
        ensure_creator(&txn, user_id).await?;
    }

    let mut active: portfolio_item::ActiveModel = existing.into();

    if let Some(media_type) = req.media_type {
        active.media_type = Set(media_type);
    }
    if let Some(title) = req.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(description) = req.description {
        active.description = Set(description);
    }
    if let Some(media_url) = req.media_url {
        active.media_url = Set(media_url.trim().to_string());
    }
    if let Some(thumbnail_url) = req.thumbnail_url {
        active.thumbnail_url = Set(normalize_optional(thumbnail_url));
    }
    if let Some(category) = req.category {
        active.category = Set(category.trim().to_string());
    }
    if let Some(created_by) = req.created_by {
        active.created_by = Set(created_by);
    }

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(model)
}

pub async fn delete<F>(db: &DatabaseConnection, id: i32, authorize: F) -> Result<(), AppError>
where
    F: FnOnce(&portfolio_item::Model) -> Result<(), AppError>,
{
    let txn = super::begin_write(db).await?;
    let existing = find_for_update(&txn, id).await?;
    authorize(&existing)?;

    portfolio_item::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    Ok(())
}
