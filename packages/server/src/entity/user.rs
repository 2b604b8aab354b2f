use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account role. `Admin` is a superset of `Member`.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[sea_orm(string_value = "ADMIN")]
    Admin,
    #[sea_orm(string_value = "MEMBER")]
    Member,
}

/// The role assigned to newly registered users.
pub const DEFAULT_ROLE: Role = Role::Member;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 PHC string. Never leaves the persistence layer.
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub instagram: Option<String>,

    #[sea_orm(has_many)]
    pub portfolio_items: HasMany<super::portfolio_item::Entity>,

    #[sea_orm(has_one)]
    pub auth_token: HasOne<super::auth_token::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
