//! DTOs for user administration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{RoleName, User};

/// Public view of a user. Never includes the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub roles: Vec<RoleName>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            roles: user.roles,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde(deserialize_with = "crate::api::dto::trimmed::string")]
    #[validate(length(min = 3, max = 150, message = "Name must be between 3 and 150 characters"))]
    pub name: String,

    #[validate(
        email(message = "Email must be valid"),
        length(max = 150, message = "Email must be at most 150 characters")
    )]
    pub email: String,

    #[validate(length(min = 6, max = 100, message = "Password must be between 6 and 100 characters"))]
    pub password: String,

    /// Role names such as `ROLE_ADMIN`; defaults to `ROLE_USER`.
    pub roles: Option<Vec<String>>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "crate::api::dto::trimmed::option")]
    #[validate(length(min = 3, max = 150, message = "Name must be between 3 and 150 characters"))]
    pub name: Option<String>,

    #[validate(
        email(message = "Email must be valid"),
        length(max = 150, message = "Email must be at most 150 characters")
    )]
    pub email: Option<String>,

    #[validate(length(min = 6, max = 100, message = "Password must be between 6 and 100 characters"))]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRolesRequest {
    #[validate(length(min = 1, message = "At least one role is required"))]
    pub roles: Vec<String>,
}
