use sea_orm::*;

use crate::entity::service_lead;
use crate::error::AppError;
use crate::models::service_lead::{
    CreateServiceLeadRequest, ServiceLeadListQuery, UpdateServiceLeadRequest,
    validate_create_service_lead, validate_update_service_lead,
};

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    query: &ServiceLeadListQuery,
) -> Result<Vec<service_lead::Model>, AppError> {
    let mut select = service_lead::Entity::find();
    if let Some(status) = query.status {
        select = select.filter(service_lead::Column::Status.eq(status));
    }
    Ok(select
        .order_by_asc(service_lead::Column::Id)
        .all(conn)
        .await?)
}

pub async fn find<C: ConnectionTrait>(conn: &C, id: i32) -> Result<service_lead::Model, AppError> {
    service_lead::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Service lead not found".into()))
}

pub async fn create<C: ConnectionTrait>(
    conn: &C,
    req: CreateServiceLeadRequest,
) -> Result<service_lead::Model, AppError> {
    validate_create_service_lead(&req)?;

    let new_lead = service_lead::ActiveModel {
        name: Set(req.name.trim().to_string()),
        email: Set(req.email.trim().to_string()),
        phone: Set(req.phone.trim().to_string()),
        project_type: Set(req.project_type.trim().to_string()),
        budget_range: Set(req.budget_range.trim().to_string()),
        event_date: Set(req.event_date),
        details: Set(req.details),
        status: Set(req.status.unwrap_or_default()),
        ..Default::default()
    };

    Ok(new_lead.insert(conn).await?)
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    req: UpdateServiceLeadRequest,
) -> Result<service_lead::Model, AppError> {
    validate_update_service_lead(&req)?;

    let existing = find(conn, id).await?;
    if req == UpdateServiceLeadRequest::default() {
        return Ok(existing);
    }

    let mut active: service_lead::ActiveModel = existing.into();

    if let Some(name) = req.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(email) = req.email {
        active.email = Set(email.trim().to_string());
    }
    if let Some(phone) = req.phone {
        active.phone = Set(phone.trim().to_string());
    }
    if let Some(project_type) = req.project_type {
        active.project_type = Set(project_type.trim().to_string());
    }
    if let Some(budget_range) = req.budget_range {
        active.budget_range = Set(budget_range.trim().to_string());
    }
    if let Some(event_date) = req.event_date {
        active.event_date = Set(event_date);
    }
    if let Some(details) = req.details {
        active.details = Set(details);
    }
    if let Some(status) = req.status {
        active.status = Set(status);
    }

    Ok(active.update(conn).await?)
}

pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> Result<(), AppError> {
    let result = service_lead::Entity::delete_by_id(id).exec(conn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Service lead not found".into()));
    }
    Ok(())
}
