use sea_orm::*;

use super::for_update;
use crate::entity::{workshop, workshop_registration};
use crate::error::AppError;
use crate::models::shared::validate_date_range;
use crate::models::workshop::{
    CreateWorkshopRequest, UpdateWorkshopRequest, WorkshopListQuery, normalize_venue,
    validate_create_workshop, validate_update_workshop, validate_venue, venue_for_mode,
};

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    query: &WorkshopListQuery,
) -> Result<Vec<workshop::Model>, AppError> {
    let mut select = workshop::Entity::find();
    if let Some(mode) = query.mode {
        select = select.filter(workshop::Column::Mode.eq(mode));
    }
    Ok(select.order_by_asc(workshop::Column::Id).all(conn).await?)
}

pub async fn find<C: ConnectionTrait>(conn: &C, id: i32) -> Result<workshop::Model, AppError> {
    workshop::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Workshop not found".into()))
}

/// Locks the workshop row so seat counting and inserts serialize per workshop.
pub(crate) async fn find_for_update<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<workshop::Model, AppError> {
    for_update(workshop::Entity::find_by_id(id), conn)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Workshop not found".into()))
}

pub(crate) async fn registration_count<C: ConnectionTrait>(
    conn: &C,
    workshop_id: i32,
) -> Result<u64, AppError> {
    Ok(workshop_registration::Entity::find()
        .filter(workshop_registration::Column::WorkshopId.eq(workshop_id))
        .count(conn)
        .await?)
}

pub async fn create<C: ConnectionTrait>(
    conn: &C,
    req: CreateWorkshopRequest,
) -> Result<workshop::Model, AppError> {
    validate_create_workshop(&req)?;

    let new_workshop = workshop::ActiveModel {
        title: Set(req.title.trim().to_string()),
        description: Set(req.description),
        level: Set(req.level.trim().to_string()),
        start_date: Set(req.start_date),
        end_date: Set(req.end_date),
        mode: Set(req.mode),
        venue: Set(venue_for_mode(req.mode, req.venue)),
        price: Set(req.price),
        capacity: Set(req.capacity),
        ..Default::default()
    };

    Ok(new_workshop.insert(conn).await?)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    req: UpdateWorkshopRequest,
) -> Result<workshop::Model, AppError> {
    validate_update_workshop(&req)?;

    if req == UpdateWorkshopRequest::default() {
        return find(db, id).await;
    }

    let txn = super::begin_write(db).await?;
    let existing = find_for_update(&txn, id).await?;

    validate_date_range(
        req.start_date.unwrap_or(existing.start_date),
        req.end_date.unwrap_or(existing.end_date),
    )?;

    let mode = req.mode.unwrap_or(existing.mode);
    let venue = match req.venue {
        Some(ref venue) => normalize_venue(venue.clone()),
        None => existing.venue.clone(),
    };
    validate_venue(mode, venue.as_deref())?;
    let venue = venue_for_mode(mode, venue);

    if let Some(capacity) = req.capacity {
        let taken = registration_count(&txn, id).await?;
        if (capacity as u64) < taken {
            return Err(AppError::field(
                "capacity",
                format!("capacity cannot be lower than the {taken} existing registrations"),
            ));
        }
    }

    let existing_venue = existing.venue.clone();
    let mut active: workshop::ActiveModel = existing.into();

    if let Some(title) = req.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(description) = req.description {
        active.description = Set(description);
    }
    if let Some(level) = req.level {
        active.level = Set(level.trim().to_string());
    }
    if let Some(start_date) = req.start_date {
        active.start_date = Set(start_date);
    }
    if let Some(end_date) = req.end_date {
        active.end_date = Set(end_date);
    }
    if let Some(mode) = req.mode {
        active.mode = Set(mode);
    }
    if venue != existing_venue {
        active.venue = Set(venue);
    }
    if let Some(price) = req.price {
        active.price = Set(price);
    }
    if let Some(capacity) = req.capacity {
        active.capacity = Set(capacity);
    }

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(model)
}

/// Delete a workshop together with all of its registrations.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), AppError> {
    let txn = super::begin_write(db).await?;
    let _workshop = find_for_update(&txn, id).await?;

    let removed = workshop_registration::Entity::delete_many()
        .filter(workshop_registration::Column::WorkshopId.eq(id))
        .exec(&txn)
        .await?;
    workshop::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    tracing::debug!(
        workshop_id = id,
        registrations = removed.rows_affected,
        "Deleted workshop"
    );
    Ok(())
}
