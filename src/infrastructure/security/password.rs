//! bcrypt password hashing.

use serde_json::json;

use crate::error::AppError;

/// Hashes and verifies passwords with bcrypt.
///
/// bcrypt is deliberately slow, so both operations run on tokio's blocking
/// pool instead of an async worker thread.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Creates a hasher with the given bcrypt cost (4..=31).
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hashes a plain-text password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if hashing fails or the blocking task panics.
    pub async fn hash(&self, plain: String) -> Result<String, AppError> {
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(plain, cost))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing task failed");
                AppError::internal("Password hashing failed", json!({}))
            })?
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing failed");
                AppError::internal("Password hashing failed", json!({}))
            })
    }

    /// Checks `plain` against a stored bcrypt hash.
    ///
    /// A malformed stored hash verifies as `false`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the blocking task panics.
    pub async fn verify(&self, plain: String, hash: String) -> Result<bool, AppError> {
        let result = tokio::task::spawn_blocking(move || bcrypt::verify(plain, &hash))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Password verification task failed");
                AppError::internal("Password verification failed", json!({}))
            })?;

        match result {
            Ok(valid) => Ok(valid),
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is malformed");
                Ok(false)
            }
        }
    }
}
