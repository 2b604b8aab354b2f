use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::shared::{validate_body, validate_date_range, validate_price, validate_text};
use crate::entity::competition::{self, CompetitionStatus};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompetitionRequest {
    #[schema(example = "Monsoon Streets")]
    pub title: String,
    pub description: String,
    #[schema(example = "Rain and reflections")]
    pub theme: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Defaults to `UPCOMING`.
    pub status: Option<CompetitionStatus>,
    /// Defaults to `false`.
    pub is_paid: Option<bool>,
    /// Defaults to 0. Must stay 0 for free competitions.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>, example = 250.0)]
    pub price: Option<Decimal>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompetitionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub theme: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<CompetitionStatus>,
    pub is_paid: Option<bool>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub theme: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: CompetitionStatus,
    pub is_paid: bool,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
}

impl From<competition::Model> for CompetitionResponse {
    fn from(m: competition::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            theme: m.theme,
            start_date: m.start_date,
            end_date: m.end_date,
            status: m.status,
            is_paid: m.is_paid,
            price: m.price,
        }
    }
}

#[derive(Deserialize, Default, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompetitionListQuery {
    pub status: Option<CompetitionStatus>,
}

/// Cross-field rule: free competitions carry no price.
pub fn validate_paid_price(is_paid: bool, price: Decimal) -> Result<(), AppError> {
    if !is_paid && !price.is_zero() {
        return Err(AppError::field(
            "price",
            "price must be 0 unless isPaid is set",
        ));
    }
    Ok(())
}

pub fn validate_create_competition(req: &CreateCompetitionRequest) -> Result<(), AppError> {
    validate_text("title", &req.title, 255)?;
    validate_body("description", &req.description)?;
    validate_text("theme", &req.theme, 255)?;
    validate_date_range(req.start_date, req.end_date)?;
    let price = req.price.unwrap_or_default();
    validate_price("price", price)?;
    validate_paid_price(req.is_paid.unwrap_or(false), price)
}

pub fn validate_update_competition(req: &UpdateCompetitionRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_text("title", title, 255)?;
    }
    if let Some(ref description) = req.description {
        validate_body("description", description)?;
    }
    if let Some(ref theme) = req.theme {
        validate_text("theme", theme, 255)?;
    }
    if let (Some(start), Some(end)) = (req.start_date, req.end_date) {
        validate_date_range(start, end)?;
    }
    if let Some(price) = req.price {
        validate_price("price", price)?;
    }
    Ok(())
}
