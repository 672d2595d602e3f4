//! Repository trait for role lookup.

use crate::domain::entities::{Role, RoleName};
use crate::error::AppError;
use async_trait::async_trait;

/// Read access to the seeded `roles` table.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRoleRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Finds a role by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_name(&self, name: RoleName) -> Result<Option<Role>, AppError>;

    /// Lists all roles ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<Role>, AppError>;
}
