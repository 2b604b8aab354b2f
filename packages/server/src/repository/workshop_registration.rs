use sea_orm::*;

use crate::entity::workshop_registration;
use crate::error::AppError;
use crate::models::workshop_registration::{
    CreateWorkshopRegistrationRequest, UpdateWorkshopRegistrationRequest,
    WorkshopRegistrationListQuery, validate_create_workshop_registration,
    validate_update_workshop_registration,
};
use crate::repository::workshop;

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    query: &WorkshopRegistrationListQuery,
) -> Result<Vec<workshop_registration::Model>, AppError> {
    let mut select = workshop_registration::Entity::find();
    if let Some(workshop_id) = query.workshop {
        select = select.filter(workshop_registration::Column::WorkshopId.eq(workshop_id));
    }
    if let Some(payment_status) = query.payment_status {
        select = select.filter(workshop_registration::Column::PaymentStatus.eq(payment_status));
    }
    Ok(select
        .order_by_asc(workshop_registration::Column::Id)
        .all(conn)
        .await?)
}

pub async fn find<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<workshop_registration::Model, AppError> {
    workshop_registration::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Workshop registration not found".into()))
}

/// Lock the target workshop and make sure it still has a free seat.
async fn reserve_seat<C: ConnectionTrait>(conn: &C, workshop_id: i32) -> Result<(), AppError> {
    let target = match workshop::find_for_update(conn, workshop_id).await {
        Ok(w) => w,
        Err(AppError::NotFound(_)) => {
            return Err(AppError::field(
                "workshop",
                format!("Invalid pk \"{workshop_id}\" - object does not exist."),
            ));
        }
        Err(e) => return Err(e),
    };

    let taken = workshop::registration_count(conn, workshop_id).await?;
    if taken >= target.capacity as u64 {
        tracing::debug!(workshop_id, taken, capacity = target.capacity, "Workshop full");
        return Err(AppError::ConstraintViolation("Workshop is full".into()));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    req: CreateWorkshopRegistrationRequest,
) -> Result<workshop_registration::Model, AppError> {
    validate_create_workshop_registration(&req)?;

    let txn = super::begin_write(db).await?;
    reserve_seat(&txn, req.workshop).await?;

    let new_registration = workshop_registration::ActiveModel {
        workshop_id: Set(req.workshop),
        name: Set(req.name.trim().to_string()),
        email: Set(req.email.trim().to_string()),
        phone: Set(req.phone.trim().to_string()),
        payment_status: Set(req.payment_status.unwrap_or_default()),
        ..Default::default()
    };

    let model = new_registration.insert(&txn).await?;
    txn.commit().await?;

    Ok(model)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    req: UpdateWorkshopRegistrationRequest,
) -> Result<workshop_registration::Model, AppError> {
    validate_update_workshop_registration(&req)?;

    if req == UpdateWorkshopRegistrationRequest::default() {
        return find(db, id).await;
    }

    let txn = super::begin_write(db).await?;
    let existing = find(&txn, id).await?;

    if let Some(workshop_id) = req.workshop
        && workshop_id != existing.workshop_id
    {
        reserve_seat(&txn, workshop_id).await?;
    }

    let mut active: workshop_registration::ActiveModel = existing.into();

    if let Some(workshop_id) = req.workshop {
        active.workshop_id = Set(workshop_id);
    }
    if let Some(name) = req.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(email) = req.email {
        active.email = Set(email.trim().to_string());
    }
    if let Some(phone) = req.phone {
        active.phone = Set(phone.trim().to_string());
    }
    if let Some(payment_status) = req.payment_status {
        active.payment_status = Set(payment_status);
    }

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(model)
}

pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> Result<(), AppError> {
    let result = workshop_registration::Entity::delete_by_id(id)
        .exec(conn)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Workshop registration not found".into()));
    }
    Ok(())
}
