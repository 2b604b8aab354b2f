use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::shared::{validate_body, validate_email, validate_phone, validate_text};
use crate::entity::service_lead::{self, LeadStatus};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceLeadRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[schema(example = "Wedding")]
    pub project_type: String,
    #[schema(example = "50k-1L")]
    pub budget_range: String,
    #[schema(example = "2026-12-12")]
    pub event_date: NaiveDate,
    pub details: String,
    /// Only admins may set anything other than `NEW`.
    pub status: Option<LeadStatus>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceLeadRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub project_type: Option<String>,
    pub budget_range: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub details: Option<String>,
    pub status: Option<LeadStatus>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLeadResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub project_type: String,
    pub budget_range: String,
    pub event_date: NaiveDate,
    pub details: String,
    pub status: LeadStatus,
}

impl From<service_lead::Model> for ServiceLeadResponse {
    fn from(m: service_lead::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            project_type: m.project_type,
            budget_range: m.budget_range,
            event_date: m.event_date,
            details: m.details,
            status: m.status,
        }
    }
}

#[derive(Deserialize, Default, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ServiceLeadListQuery {
    pub status: Option<LeadStatus>,
}

pub fn validate_create_service_lead(req: &CreateServiceLeadRequest) -> Result<(), AppError> {
    validate_text("name", &req.name, 255)?;
    validate_email("email", &req.email)?;
    validate_phone("phone", &req.phone)?;
    validate_text("projectType", &req.project_type, 100)?;
    validate_text("budgetRange", &req.budget_range, 100)?;
    validate_body("details", &req.details)?;
    Ok(())
}

pub fn validate_update_service_lead(req: &UpdateServiceLeadRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_text("name", name, 255)?;
    }
    if let Some(ref email) = req.email {
        validate_email("email", email)?;
    }
    if let Some(ref phone) = req.phone {
        validate_phone("phone", phone)?;
    }
    if let Some(ref project_type) = req.project_type {
        validate_text("projectType", project_type, 100)?;
    }
    if let Some(ref budget_range) = req.budget_range {
        validate_text("budgetRange", budget_range, 100)?;
    }
    if let Some(ref details) = req.details {
        validate_body("details", details)?;
    }
    Ok(())
}
