use serde::{Deserialize, Serialize};

use super::shared::{double_option, validate_email, validate_optional_text};
use crate::entity::user::{self, Role};
use crate::error::AppError;
use crate::models::auth::validate_username;

/// Public user fields. Password material is never part of this shape.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "lens_alice")]
    pub username: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub instagram: Option<String>,
}

impl From<user::Model> for UserResponse {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            email: m.email,
            first_name: m.first_name,
            last_name: m.last_name,
            role: m.role,
            instagram: m.instagram,
        }
    }
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Admin only.
    pub role: Option<Role>,
    #[serde(default, deserialize_with = "double_option")]
    pub instagram: Option<Option<String>>,
}

pub fn validate_update_user(req: &UpdateUserRequest) -> Result<(), AppError> {
    if let Some(ref username) = req.username {
        validate_username(username)?;
    }
    if let Some(ref email) = req.email {
        validate_email("email", email)?;
    }
    validate_optional_text("first_name", req.first_name.as_deref(), 150)?;
    validate_optional_text("last_name", req.last_name.as_deref(), 150)?;
    if let Some(Some(ref instagram)) = req.instagram {
        validate_optional_text("instagram", Some(instagram), 255)?;
    }
    Ok(())
}

#[derive(Deserialize, Default, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    /// Only users with this role.
    pub role: Option<Role>,
}
