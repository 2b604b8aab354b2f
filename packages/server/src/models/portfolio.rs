use serde::{Deserialize, Serialize};

use super::shared::{double_option, validate_body, validate_text, validate_url};
use crate::entity::portfolio_item::{self, MediaType};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortfolioItemRequest {
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub title: String,
    pub description: String,
    #[schema(example = "https://www.youtube.com/embed/abc123")]
    pub media_url: String,
    pub thumbnail_url: Option<String>,
    #[schema(example = "Weddings")]
    pub category: String,
    /// Creator user ID. Defaults to the caller; only admins may name someone else.
    pub created_by: Option<i32>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePortfolioItemRequest {
    #[serde(rename = "type")]
    pub media_type: Option<MediaType>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub media_url: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub thumbnail_url: Option<Option<String>>,
    pub category: Option<String>,
    /// Admin only.
    #[serde(default, deserialize_with = "double_option")]
    pub created_by: Option<Option<i32>>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItemResponse {
    pub id: i32,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub title: String,
    pub description: String,
    pub media_url: String,
    pub thumbnail_url: Option<String>,
    pub category: String,
    pub created_by: Option<i32>,
}

impl From<portfolio_item::Model> for PortfolioItemResponse {
    fn from(m: portfolio_item::Model) -> Self {
        Self {
            id: m.id,
            media_type: m.media_type,
            title: m.title,
            description: m.description,
            media_url: m.media_url,
            thumbnail_url: m.thumbnail_url,
            category: m.category,
            created_by: m.created_by,
        }
    }
}

#[derive(Deserialize, Default, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PortfolioListQuery {
    #[serde(rename = "type")]
    pub media_type: Option<MediaType>,
    pub category: Option<String>,
    pub created_by: Option<i32>,
}

pub fn validate_create_portfolio_item(req: &CreatePortfolioItemRequest) -> Result<(), AppError> {
    validate_text("title", &req.title, 255)?;
    validate_body("description", &req.description)?;
    validate_url("mediaUrl", &req.media_url)?;
    if let Some(ref thumbnail) = req.thumbnail_url
        && !thumbnail.trim().is_empty()
    {
        validate_url("thumbnailUrl", thumbnail)?;
    }
    validate_text("category", &req.category, 100)?;
    Ok(())
}

pub fn validate_update_portfolio_item(req: &UpdatePortfolioItemRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_text("title", title, 255)?;
    }
    if let Some(ref description) = req.description {
        validate_body("description", description)?;
    }
    if let Some(ref media_url) = req.media_url {
        validate_url("mediaUrl", media_url)?;
    }
    if let Some(Some(ref thumbnail)) = req.thumbnail_url
        && !thumbnail.trim().is_empty()
    {
        validate_url("thumbnailUrl", thumbnail)?;
    }
    if let Some(ref category) = req.category {
        validate_text("category", category, 100)?;
    }
    Ok(())
}

/// Request body for the video metadata lookup.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct FetchVideoDataRequest {
    #[serde(default, alias = "youtube_url")]
    #[schema(example = "https://www.youtube.com/watch?v=dQw4w9WgXcQ")]
    pub url: String,
}

/// Embeddable metadata for a video link.
#[derive(Serialize, Debug, PartialEq, utoipa::ToSchema)]
pub struct VideoDataResponse {
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub video_id: String,
    pub embed_url: String,
    /// Present when the metadata was synthesized instead of looked up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}
