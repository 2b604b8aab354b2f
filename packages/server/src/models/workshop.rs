use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::shared::{
    double_option, normalize_optional, validate_body, validate_date_range, validate_price,
    validate_text,
};
use crate::entity::workshop::{self, WorkshopMode};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkshopRequest {
    #[schema(example = "Night Sky Basics")]
    pub title: String,
    pub description: String,
    #[schema(example = "Beginner")]
    pub level: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub mode: WorkshopMode,
    /// Required when `mode` is `OFFLINE`, discarded when `ONLINE`.
    pub venue: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 49.0)]
    pub price: Decimal,
    #[schema(example = 25)]
    pub capacity: i32,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkshopRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub level: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub mode: Option<WorkshopMode>,
    #[serde(default, deserialize_with = "double_option")]
    pub venue: Option<Option<String>>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    pub capacity: Option<i32>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub level: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub mode: WorkshopMode,
    pub venue: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub capacity: i32,
}

impl From<workshop::Model> for WorkshopResponse {
    fn from(m: workshop::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            level: m.level,
            start_date: m.start_date,
            end_date: m.end_date,
            mode: m.mode,
            venue: m.venue,
            price: m.price,
            capacity: m.capacity,
        }
    }
}

#[derive(Deserialize, Default, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WorkshopListQuery {
    pub mode: Option<WorkshopMode>,
}

/// Cross-field rule: offline workshops need a venue.
pub fn validate_venue(mode: WorkshopMode, venue: Option<&str>) -> Result<(), AppError> {
    match (mode, venue) {
        (WorkshopMode::Offline, None) => Err(AppError::field(
            "venue",
            "venue is required for offline workshops",
        )),
        (WorkshopMode::Offline, Some(venue)) => validate_text("venue", venue, 255),
        (WorkshopMode::Online, _) => Ok(()),
    }
}

fn validate_capacity(capacity: i32) -> Result<(), AppError> {
    if capacity <= 0 {
        return Err(AppError::field("capacity", "capacity must be > 0"));
    }
    Ok(())
}

pub fn validate_create_workshop(req: &CreateWorkshopRequest) -> Result<(), AppError> {
    validate_text("title", &req.title, 255)?;
    validate_body("description", &req.description)?;
    validate_text("level", &req.level, 50)?;
    validate_date_range(req.start_date, req.end_date)?;
    validate_venue(req.mode, normalize_venue(req.venue.clone()).as_deref())?;
    validate_price("price", req.price)?;
    validate_capacity(req.capacity)
}

pub fn validate_update_workshop(req: &UpdateWorkshopRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_text("title", title, 255)?;
    }
    if let Some(ref description) = req.description {
        validate_body("description", description)?;
    }
    if let Some(ref level) = req.level {
        validate_text("level", level, 50)?;
    }
    if let (Some(start), Some(end)) = (req.start_date, req.end_date) {
        validate_date_range(start, end)?;
    }
    if let Some(price) = req.price {
        validate_price("price", price)?;
    }
    if let Some(capacity) = req.capacity {
        validate_capacity(capacity)?;
    }
    Ok(())
}

/// Blank venues count as missing.
pub fn normalize_venue(venue: Option<String>) -> Option<String> {
    normalize_optional(venue)
}

/// Venue as stored for `mode`: online workshops never keep one.
pub fn venue_for_mode(mode: WorkshopMode, venue: Option<String>) -> Option<String> {
    match mode {
        WorkshopMode::Online => None,
        WorkshopMode::Offline => normalize_venue(venue),
    }
}
