//! DTOs for registration and login.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::AuthSession;
use crate::domain::entities::RoleName;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
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
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email must be valid"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Issued token plus the identity it carries.
///
/// ```json
/// {
///   "token": "eyJhbGciOiJIUzI1NiJ9...",
///   "type": "Bearer",
///   "expiresIn": 1800,
///   "id": 1,
///   "name": "Ada Lovelace",
///   "email": "ada@example.com",
///   "roles": ["ROLE_USER"]
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: &'static str,
    /// Seconds until the token expires.
    pub expires_in: i64,
    pub id: i64,
    pub name: String,
    pub email: String,
    pub roles: Vec<RoleName>,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            token: session.token,
            token_type: "Bearer",
            expires_in: session.expires_in,
            id: session.user.id,
            name: session.user.name,
            email: session.user.email,
            roles: session.user.roles,
        }
    }
}
