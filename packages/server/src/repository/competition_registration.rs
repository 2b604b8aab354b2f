use sea_orm::*;

use crate::entity::competition_registration;
use crate::error::AppError;
use crate::models::competition_registration::{
    CompetitionRegistrationListQuery, CreateCompetitionRegistrationRequest,
    UpdateCompetitionRegistrationRequest, validate_create_competition_registration,
    validate_update_competition_registration,
};
use crate::models::shared::normalize_optional;
use crate::repository::competition;

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    query: &CompetitionRegistrationListQuery,
) -> Result<Vec<competition_registration::Model>, AppError> {
    let mut select = competition_registration::Entity::find();
    if let Some(competition_id) = query.competition {
        select = select.filter(competition_registration::Column::CompetitionId.eq(competition_id));
    }
    if let Some(status) = query.status {
        select = select.filter(competition_registration::Column::Status.eq(status));
    }
    Ok(select
        .order_by_asc(competition_registration::Column::Id)
        .all(conn)
        .await?)
}

pub async fn find<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<competition_registration::Model, AppError> {
    competition_registration::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Competition registration not found".into()))
}

/// The referenced competition must exist; reported against the request field.
async fn ensure_competition<C: ConnectionTrait>(conn: &C, id: i32) -> Result<(), AppError> {
    match competition::find_for_update(conn, id).await {
        Ok(_) => Ok(()),
        Err(AppError::NotFound(_)) => Err(AppError::field(
            "competition",
            format!("Invalid pk \"{id}\" - object does not exist."),
        )),
        Err(e) => Err(e),
    }
}

pub async fn create(
    db: &DatabaseConnection,
    req: CreateCompetitionRegistrationRequest,
) -> Result<competition_registration::Model, AppError> {
    validate_create_competition_registration(&req)?;

    let txn = super::begin_write(db).await?;
    ensure_competition(&txn, req.competition).await?;

    let new_registration = competition_registration::ActiveModel {
        competition_id: Set(req.competition),
        name: Set(req.name.trim().to_string()),
        email: Set(req.email.trim().to_string()),
        college: Set(req.college.trim().to_string()),
        instagram: Set(normalize_optional(req.instagram)),
        submission_url: Set(req.submission_url.trim().to_string()),
        status: Set(req.status.unwrap_or_default()),
        ..Default::default()
    };

    let model = new_registration.insert(&txn).await?;
    txn.commit().await?;

    Ok(model)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    req: UpdateCompetitionRegistrationRequest,
) -> Result<competition_registration::Model, AppError> {
    validate_update_competition_registration(&req)?;

    if req == UpdateCompetitionRegistrationRequest::default() {
        return find(db, id).await;
    }

    let txn = super::begin_write(db).await?;
    let existing = find(&txn, id).await?;

    if let Some(competition_id) = req.competition
        && competition_id != existing.competition_id
    {
        ensure_competition(&txn, competition_id).await?;
    }

    let mut active: competition_registration::ActiveModel = existing.into();

    if let Some(competition_id) = req.competition {
        active.competition_id = Set(competition_id);
    }
    if let Some(name) = req.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(email) = req.email {
        active.email = Set(email.trim().to_string());
    }
    if let Some(college) = req.college {
        active.college = Set(college.trim().to_string());
    }
    if let Some(instagram) = req.instagram {
        active.instagram = Set(normalize_optional(instagram));
    }
    if let Some(submission_url) = req.submission_url {
        active.submission_url = Set(submission_url.trim().to_string());
    }
    if let Some(status) = req.status {
        active.status = Set(status);
    }

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(model)
}

pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> Result<(), AppError> {
    let result = competition_registration::Entity::delete_by_id(id)
        .exec(conn)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound(
            "Competition registration not found".into(),
        ));
    }
    Ok(())
}
