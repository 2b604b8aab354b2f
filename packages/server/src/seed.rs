use sea_orm::sea_query::{
    Index, IndexCreateStatement, PostgresQueryBuilder, SqliteQueryBuilder,
};
use sea_orm::*;
use tracing::info;

use crate::config::BootstrapAdmin;
use crate::entity::user::Role;
use crate::entity::{competition_registration, portfolio_item, workshop_registration};
use crate::error::AppError;
use crate::models::auth::RegisterRequest;
use crate::repository;
use crate::services::registration;

/// Create the configured admin account unless that username already exists.
pub async fn ensure_bootstrap_admin(
    db: &DatabaseConnection,
    admin: &BootstrapAdmin,
) -> Result<(), AppError> {
    if let Some(existing) = repository::user::find_by_username(db, admin.username.trim()).await? {
        if existing.role != Role::Admin {
            tracing::warn!(
                username = %existing.username,
                "Bootstrap admin username belongs to a non-admin account; leaving it unchanged"
            );
        }
        return Ok(());
    }

    let user = registration::register(
        db,
        RegisterRequest {
            username: admin.username.clone(),
            email: admin.email.clone(),
            password: admin.password.clone(),
            password_confirm: admin.password.clone(),
            first_name: None,
            last_name: None,
            instagram: None,
            role: Some(Role::Admin),
        },
        true,
    )
    .await?;

    info!(user_id = user.id, username = %user.username, "Created bootstrap admin");
    Ok(())
}

/// Ensure required database indexes exist.
///
/// Schema-sync creates tables and unique constraints but not plain indexes on
/// foreign keys, so the list filters and cascades get theirs here.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_index(
        db,
        Index::create()
            .if_not_exists()
            .name("idx_competition_registration_competition")
            .table(competition_registration::Entity)
            .col(competition_registration::Column::CompetitionId)
            .to_owned(),
    )
    .await;

    create_index(
        db,
        Index::create()
            .if_not_exists()
            .name("idx_workshop_registration_workshop")
            .table(workshop_registration::Entity)
            .col(workshop_registration::Column::WorkshopId)
            .to_owned(),
    )
    .await;

    create_index(
        db,
        Index::create()
            .if_not_exists()
            .name("idx_portfolio_item_created_by")
            .table(portfolio_item::Entity)
            .col(portfolio_item::Column::CreatedBy)
            .to_owned(),
    )
    .await;

    Ok(())
}

/// Index creation failures are logged, not fatal.
async fn create_index(db: &DatabaseConnection, index: IndexCreateStatement) {
    let stmt = build_index(db.get_database_backend(), &index);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => info!("Ensured index exists: {stmt}"),
        Err(e) => tracing::warn!("Failed to create index ({stmt}): {e}"),
    }
}

fn build_index(backend: DbBackend, index: &IndexCreateStatement) -> String {
    match backend {
        DbBackend::Sqlite => index.to_string(SqliteQueryBuilder),
        _ => index.to_string(PostgresQueryBuilder),
    }
}
