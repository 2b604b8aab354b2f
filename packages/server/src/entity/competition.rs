use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum CompetitionStatus {
    #[default]
    #[sea_orm(string_value = "UPCOMING")]
    Upcoming,
    #[sea_orm(string_value = "ONGOING")]
    Ongoing,
    #[sea_orm(string_value = "CLOSED")]
    Closed,
}

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "competition")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub theme: String,
    pub start_date: DateTimeUtc,
    pub end_date: DateTimeUtc,
    pub status: CompetitionStatus,
    pub is_paid: bool,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,

    #[sea_orm(has_many)]
    pub registrations: HasMany<super::competition_registration::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
