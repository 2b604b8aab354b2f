use serde::{Deserialize, Serialize};

use super::shared::{validate_email, validate_phone, validate_text};
use crate::entity::workshop_registration::{self, PaymentStatus};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkshopRegistrationRequest {
    /// Workshop ID.
    #[schema(example = 1)]
    pub workshop: i32,
    pub name: String,
    pub email: String,
    #[schema(example = "+91 98765 43210")]
    pub phone: String,
    /// Only admins may set anything other than `PENDING`.
    pub payment_status: Option<PaymentStatus>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkshopRegistrationRequest {
    pub workshop: Option<i32>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub payment_status: Option<PaymentStatus>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopRegistrationResponse {
    pub id: i32,
    pub workshop: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub payment_status: PaymentStatus,
}

impl From<workshop_registration::Model> for WorkshopRegistrationResponse {
    fn from(m: workshop_registration::Model) -> Self {
        Self {
            id: m.id,
            workshop: m.workshop_id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            payment_status: m.payment_status,
        }
    }
}

#[derive(Deserialize, Default, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WorkshopRegistrationListQuery {
    /// Only registrations for this workshop.
    pub workshop: Option<i32>,
    pub payment_status: Option<PaymentStatus>,
}

pub fn validate_create_workshop_registration(
    req: &CreateWorkshopRegistrationRequest,
) -> Result<(), AppError> {
    validate_text("name", &req.name, 255)?;
    validate_email("email", &req.email)?;
    validate_phone("phone", &req.phone)?;
    Ok(())
}

pub fn validate_update_workshop_registration(
    req: &UpdateWorkshopRegistrationRequest,
) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_text("name", name, 255)?;
    }
    if let Some(ref email) = req.email {
        validate_email("email", email)?;
    }
    if let Some(ref phone) = req.phone {
        validate_phone("phone", phone)?;
    }
    Ok(())
}
