//! The authenticated caller.

use serde_json::json;

use crate::domain::entities::{RoleName, User};
use crate::error::AppError;

/// Identity attached to a request by the bearer authentication middleware.
///
/// Built from the database row on every request, so role changes and deleted
/// accounts take effect without waiting for the token to expire.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub roles: Vec<RoleName>,
}

impl CurrentUser {
    pub fn has_role(&self, role: RoleName) -> bool {
        self.roles.contains(&role)
    }

    pub fn has_any_role(&self, roles: &[RoleName]) -> bool {
        roles.iter().any(|r| self.has_role(*r))
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(RoleName::Admin)
    }

    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if the caller lacks `role`.
    pub fn require_role(&self, role: RoleName) -> Result<(), AppError> {
        if self.has_role(role) {
            return Ok(());
        }

        tracing::warn!(user_id = self.id, required = %role, "Access denied");
        Err(AppError::forbidden(
            "Access denied",
            json!({ "requiredRole": role.as_str() }),
        ))
    }

    /// Whether the caller may modify a resource owned by `owner_id`.
    ///
    /// Admins and moderators may modify anything.
    pub fn can_manage(&self, owner_id: i64) -> bool {
        self.id == owner_id || self.has_any_role(&[RoleName::Admin, RoleName::Moderator])
    }

    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] unless the caller is `user_id` or an admin.
    pub fn require_self_or_admin(&self, user_id: i64) -> Result<(), AppError> {
        if self.id == user_id || self.is_admin() {
            return Ok(());
        }

        tracing::warn!(user_id = self.id, target = user_id, "Access to another account denied");
        Err(AppError::forbidden(
            "You can only access your own account",
            json!({ "id": user_id }),
        ))
    }
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            roles: user.roles.clone(),
        }
    }
}
