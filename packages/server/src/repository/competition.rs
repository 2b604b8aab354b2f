use sea_orm::*;

use super::for_update;
use crate::entity::{competition, competition_registration};
use crate::error::AppError;
use crate::models::competition::{
    CompetitionListQuery, CreateCompetitionRequest, UpdateCompetitionRequest,
    validate_create_competition, validate_paid_price, validate_update_competition,
};
use crate::models::shared::validate_date_range;

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    query: &CompetitionListQuery,
) -> Result<Vec<competition::Model>, AppError> {
    let mut select = competition::Entity::find();
    if let Some(status) = query.status {
        select = select.filter(competition::Column::Status.eq(status));
    }
    Ok(select
        .order_by_asc(competition::Column::Id)
        .all(conn)
        .await?)
}

/// Look up a competition by ID, returning 404 if not found.
pub async fn find<C: ConnectionTrait>(conn: &C, id: i32) -> Result<competition::Model, AppError> {
    competition::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Competition not found".into()))
}

pub(crate) async fn find_for_update<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<competition::Model, AppError> {
    for_update(competition::Entity::find_by_id(id), conn)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Competition not found".into()))
}

pub async fn create<C: ConnectionTrait>(
    conn: &C,
    req: CreateCompetitionRequest,
) -> Result<competition::Model, AppError> {
    validate_create_competition(&req)?;

    let new_competition = competition::ActiveModel {
        title: Set(req.title.trim().to_string()),
        description: Set(req.description),
        theme: Set(req.theme.trim().to_string()),
        start_date: Set(req.start_date),
        end_date: Set(req.end_date),
        status: Set(req.status.unwrap_or_default()),
        is_paid: Set(req.is_paid.unwrap_or(false)),
        price: Set(req.price.unwrap_or_default()),
        ..Default::default()
    };

    Ok(new_competition.insert(conn).await?)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    req: UpdateCompetitionRequest,
) -> Result<competition::Model, AppError> {
    validate_update_competition(&req)?;

    if req == UpdateCompetitionRequest::default() {
        return find(db, id).await;
    }

    let txn = super::begin_write(db).await?;
    let existing = find_for_update(&txn, id).await?;

    // Cross-field rules against the merged record
    validate_date_range(
        req.start_date.unwrap_or(existing.start_date),
        req.end_date.unwrap_or(existing.end_date),
    )?;
    validate_paid_price(
        req.is_paid.unwrap_or(existing.is_paid),
        req.price.unwrap_or(existing.price),
    )?;

    let mut active: competition::ActiveModel = existing.into();

    if let Some(title) = req.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(description) = req.description {
        active.description = Set(description);
    }
    if let Some(theme) = req.theme {
        active.theme = Set(theme.trim().to_string());
    }
    if let Some(start_date) = req.start_date {
        active.start_date = Set(start_date);
    }
    if let Some(end_date) = req.end_date {
        active.end_date = Set(end_date);
    }
    if let Some(status) = req.status {
        active.status = Set(status);
    }
    if let Some(is_paid) = req.is_paid {
        active.is_paid = Set(is_paid);
    }
    if let Some(price) = req.price {
        active.price = Set(price);
    }

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(model)
}

/// Delete a competition together with all of its registrations.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), AppError> {
    let txn = super::begin_write(db).await?;
    let _competition = find_for_update(&txn, id).await?;

    let removed = competition_registration::Entity::delete_many()
        .filter(competition_registration::Column::CompetitionId.eq(id))
        .exec(&txn)
        .await?;
    competition::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    tracing::debug!(
        competition_id = id,
        registrations = removed.rows_affected,
        "Deleted competition"
    );
    Ok(())
}
