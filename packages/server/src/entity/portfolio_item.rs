use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

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
pub enum MediaType {
    #[sea_orm(string_value = "PHOTO")]
    Photo,
    #[sea_orm(string_value = "VIDEO")]
    Video,
}

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "portfolio_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub media_type: MediaType,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub media_url: String,
    pub thumbnail_url: Option<String>,
    pub category: String,

    /// Weak reference; cleared when the creator is deleted.
    pub created_by: Option<i32>,
    #[sea_orm(belongs_to, from = "created_by", to = "id")]
    pub creator: HasOne<super::user::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
