//! Registration, login and bearer token authentication.

use std::sync::Arc;

use super::normalize_name;
use crate::domain::entities::{NewUser, RoleName, User};
use crate::domain::entities::user::normalize_email;
use crate::domain::principal::CurrentUser;
use crate::domain::repositories::{RoleRepository, UserRepository};
use crate::error::AppError;
use crate::infrastructure::security::{JwtService, PasswordHasher};
use serde_json::json;

const NAME_BOUNDS: std::ops::RangeInclusive<usize> = 3..=150;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// A freshly issued token together with the user it belongs to.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
    pub expires_in: i64,
}

/// Service for account registration, credential checks and JWT authentication.
///
/// Tokens are stateless; the user row is reloaded on every authenticated
/// request so deleted accounts and role changes take effect immediately.
pub struct AuthService<U: UserRepository, R: RoleRepository> {
    user_repository: Arc<U>,
    role_repository: Arc<R>,
    jwt: Arc<JwtService>,
    hasher: PasswordHasher,
}

impl<U: UserRepository, R: RoleRepository> AuthService<U, R> {
    /// Creates a new authentication service.
    pub fn new(
        user_repository: Arc<U>,
        role_repository: Arc<R>,
        jwt: Arc<JwtService>,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            user_repository,
            role_repository,
            jwt,
            hasher,
        }
    }

    /// Registers a new account with `ROLE_USER` and signs it in.
    ///
    /// The email is trimmed and lowercased before the uniqueness check.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Validation`] if the `ROLE_USER` row is missing.
    pub async fn register(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> Result<AuthSession, AppError> {
        let name = normalize_name(&name, NAME_BOUNDS)?;
        let email = normalize_email(&email);

        if self.user_repository.exists_by_email(&email).await? {
            return Err(AppError::conflict(
                "Email is already in use",
                json!({ "email": email }),
            ));
        }

        if self
            .role_repository
            .find_by_name(RoleName::User)
            .await?
            .is_none()
        {
            tracing::error!("ROLE_USER is missing from the roles table");
            return Err(AppError::bad_request(
                "Default role not found",
                json!({ "role": RoleName::User.as_str() }),
            ));
        }

        let password_hash = self.hasher.hash(password).await?;

        let user = self
            .user_repository
            .create(NewUser {
                name,
                email,
                password_hash,
                roles: vec![RoleName::User],
            })
            .await?;

        tracing::info!(user_id = user.id, "User registered");

        self.issue(user)
    }

    /// Checks credentials and issues a token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] with the same message whether the
    /// email is unknown or the password is wrong.
    pub async fn login(&self, email: String, password: String) -> Result<AuthSession, AppError> {
        let email = normalize_email(&email);

        let Some(user) = self.user_repository.find_by_email(&email).await? else {
            tracing::warn!("Login attempt for unknown email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS, json!({})));
        };

        if !self
            .hasher
            .verify(password, user.password_hash.clone())
            .await?
        {
            tracing::warn!(user_id = user.id, "Login attempt with wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS, json!({})));
        }

        tracing::info!(user_id = user.id, "User logged in");

        self.issue(user)
    }

    /// Resolves a bearer token to the current user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if:
    /// - the token is invalid, expired or from another issuer
    /// - the user it names no longer exists
    pub async fn authenticate(&self, token: &str) -> Result<CurrentUser, AppError> {
        let user_id = self.jwt.user_id_from_token(token).map_err(|e| {
            tracing::warn!(reason = %e, "JWT rejected");
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Invalid or expired token" }),
            )
        })?;

        let user = self.user_repository.find_by_id(user_id).await?.ok_or_else(|| {
            AppError::unauthorized("Unauthorized", json!({ "reason": "User no longer exists" }))
        })?;

        Ok(CurrentUser::from(&user))
    }

    /// Loads the full account of the current user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account was deleted meanwhile.
    pub async fn me(&self, current: &CurrentUser) -> Result<User, AppError> {
        self.user_repository
            .find_by_id(current.id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": current.id })))
    }

    fn issue(&self, user: User) -> Result<AuthSession, AppError> {
        let token = self.jwt.generate_token(&user).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign JWT");
            AppError::internal("Failed to issue token", json!({}))
        })?;

        Ok(AuthSession {
            user,
            token,
            expires_in: self.jwt.expires_in_seconds(),
        })
    }
}
