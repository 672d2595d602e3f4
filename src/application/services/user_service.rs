//! User account management.

use std::sync::Arc;

use super::normalize_name;
use crate::domain::entities::user::normalize_email;
use crate::domain::entities::{NewUser, RoleName, User, UserUpdate};
use crate::domain::principal::CurrentUser;
use crate::domain::repositories::{RoleRepository, UserRepository};
use crate::error::AppError;
use crate::infrastructure::security::PasswordHasher;
use serde_json::json;

const NAME_BOUNDS: std::ops::RangeInclusive<usize> = 3..=150;

/// Parses role names, dropping duplicates.
///
/// # Errors
///
/// Returns [`AppError::Validation`] for the first unknown name.
pub fn parse_roles(raw: &[String]) -> Result<Vec<RoleName>, AppError> {
    let mut roles = raw
        .iter()
        .map(|r| {
            r.parse::<RoleName>().map_err(|e| {
                AppError::bad_request(
                    format!("Unknown role: {}", e.0),
                    json!({ "allowed": RoleName::ALL.map(|r| r.as_str()) }),
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    roles.sort();
    roles.dedup();
    Ok(roles)
}

/// Service for administering user accounts and their roles.
///
/// Every operation takes the calling [`CurrentUser`] and enforces access
/// itself, so handlers stay thin.
pub struct UserService<U: UserRepository, R: RoleRepository> {
    user_repository: Arc<U>,
    role_repository: Arc<R>,
    hasher: PasswordHasher,
}

impl<U: UserRepository, R: RoleRepository> UserService<U, R> {
    /// Creates a new user service.
    pub fn new(user_repository: Arc<U>, role_repository: Arc<R>, hasher: PasswordHasher) -> Self {
        Self {
            user_repository,
            role_repository,
            hasher,
        }
    }

    /// Lists all users ordered by id. Admin only.
    pub async fn list(&self, caller: &CurrentUser) -> Result<Vec<User>, AppError> {
        caller.require_role(RoleName::Admin)?;
        self.user_repository.list().await
    }

    /// Creates a user with the given roles, `ROLE_USER` when none are given.
    /// Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is taken.
    /// Returns [`AppError::Validation`] for unknown or unseeded roles.
    pub async fn create(
        &self,
        caller: &CurrentUser,
        name: String,
        email: String,
        password: String,
        roles: Option<Vec<String>>,
    ) -> Result<User, AppError> {
        caller.require_role(RoleName::Admin)?;

        let name = normalize_name(&name, NAME_BOUNDS)?;
        let email = normalize_email(&email);
        if self.user_repository.exists_by_email(&email).await? {
            return Err(AppError::conflict(
                "Email is already in use",
                json!({ "email": email }),
            ));
        }

        let roles = match roles {
            Some(raw) if !raw.is_empty() => parse_roles(&raw)?,
            _ => vec![RoleName::User],
        };
        self.ensure_roles_exist(&roles).await?;

        let password_hash = self.hasher.hash(password).await?;

        let user = self
            .user_repository
            .create(NewUser {
                name,
                email,
                password_hash,
                roles,
            })
            .await?;

        tracing::info!(user_id = user.id, created_by = caller.id, "User created");

        Ok(user)
    }

    /// Returns a user. Callers may read their own account; admins any account.
    pub async fn get(&self, caller: &CurrentUser, id: i64) -> Result<User, AppError> {
        caller.require_self_or_admin(id)?;
        self.find(id).await
    }

    /// Applies a partial update. Callers may update their own account; admins
    /// any account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the new email belongs to another user.
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn update(
        &self,
        caller: &CurrentUser,
        id: i64,
        name: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<User, AppError> {
        caller.require_self_or_admin(id)?;

        let existing = self.find(id).await?;

        let name = name
            .map(|n| normalize_name(&n, NAME_BOUNDS))
            .transpose()?;
        let email = email.map(|e| normalize_email(&e));
        if let Some(email) = &email
            && *email != existing.email
            && self.user_repository.exists_by_email(email).await?
        {
            return Err(AppError::conflict(
                "Email is already in use",
                json!({ "email": email }),
            ));
        }

        let password_hash = match password {
            Some(p) => Some(self.hasher.hash(p).await?),
            None => None,
        };

        let update = UserUpdate {
            name,
            email,
            password_hash,
        };

        if update.is_empty() {
            return Ok(existing);
        }

        self.user_repository.update(id, update).await
    }

    /// Deletes a user and, through the foreign key, their products. Admin only.
    pub async fn delete(&self, caller: &CurrentUser, id: i64) -> Result<(), AppError> {
        caller.require_role(RoleName::Admin)?;

        if !self.user_repository.delete(id).await? {
            return Err(AppError::not_found("User not found", json!({ "id": id })));
        }

        tracing::info!(user_id = id, deleted_by = caller.id, "User deleted");
        Ok(())
    }

    /// Replaces the roles of a user. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `roles` is empty or names an
    /// unknown role.
    pub async fn set_roles(
        &self,
        caller: &CurrentUser,
        id: i64,
        roles: Vec<String>,
    ) -> Result<User, AppError> {
        caller.require_role(RoleName::Admin)?;

        if roles.is_empty() {
            return Err(AppError::bad_request(
                "At least one role is required",
                json!({ "roles": roles }),
            ));
        }

        let roles = parse_roles(&roles)?;
        self.ensure_roles_exist(&roles).await?;

        let user = self.user_repository.set_roles(id, roles).await?;

        tracing::info!(
            user_id = id,
            roles = %user.roles_claim(),
            changed_by = caller.id,
            "User roles replaced"
        );

        Ok(user)
    }

    async fn find(&self, id: i64) -> Result<User, AppError> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))
    }

    async fn ensure_roles_exist(&self, roles: &[RoleName]) -> Result<(), AppError> {
        for role in roles {
            if self.role_repository.find_by_name(*role).await?.is_none() {
                return Err(AppError::bad_request(
                    "Role not found",
                    json!({ "role": role.as_str() }),
                ));
            }
        }
        Ok(())
    }
}
