use serde::{Deserialize, Serialize};

use super::shared::{double_option, validate_email, validate_optional_text, validate_text, validate_url};
use crate::entity::competition_registration::{self, SubmissionStatus};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompetitionRegistrationRequest {
    /// Competition ID.
    #[schema(example = 1)]
    pub competition: i32,
    pub name: String,
    pub email: String,
    pub college: String,
    pub instagram: Option<String>,
    #[schema(example = "https://drive.example.com/entry.jpg")]
    pub submission_url: String,
    /// Only admins may set anything other than `SUBMITTED`.
    pub status: Option<SubmissionStatus>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompetitionRegistrationRequest {
    pub competition: Option<i32>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub college: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub instagram: Option<Option<String>>,
    pub submission_url: Option<String>,
    pub status: Option<SubmissionStatus>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionRegistrationResponse {
    pub id: i32,
    pub competition: i32,
    pub name: String,
    pub email: String,
    pub college: String,
    pub instagram: Option<String>,
    pub submission_url: String,
    pub status: SubmissionStatus,
}

impl From<competition_registration::Model> for CompetitionRegistrationResponse {
    fn from(m: competition_registration::Model) -> Self {
        Self {
            id: m.id,
            competition: m.competition_id,
            name: m.name,
            email: m.email,
            college: m.college,
            instagram: m.instagram,
            submission_url: m.submission_url,
            status: m.status,
        }
    }
}

#[derive(Deserialize, Default, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompetitionRegistrationListQuery {
    /// Only registrations for this competition.
    pub competition: Option<i32>,
    pub status: Option<SubmissionStatus>,
}

pub fn validate_create_competition_registration(
    req: &CreateCompetitionRegistrationRequest,
) -> Result<(), AppError> {
    validate_text("name", &req.name, 255)?;
    validate_email("email", &req.email)?;
    validate_text("college", &req.college, 255)?;
    validate_optional_text("instagram", req.instagram.as_deref(), 255)?;
    validate_url("submissionUrl", &req.submission_url)?;
    Ok(())
}

pub fn validate_update_competition_registration(
    req: &UpdateCompetitionRegistrationRequest,
) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_text("name", name, 255)?;
    }
    if let Some(ref email) = req.email {
        validate_email("email", email)?;
    }
    if let Some(ref college) = req.college {
        validate_text("college", college, 255)?;
    }
    if let Some(Some(ref instagram)) = req.instagram {
        validate_optional_text("instagram", Some(instagram), 255)?;
    }
    if let Some(ref url) = req.submission_url {
        validate_url("submissionUrl", url)?;
    }
    Ok(())
}
