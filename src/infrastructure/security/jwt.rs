//! JSON Web Token issuance and validation.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::entities::User;

/// Payload of tokens issued by this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User id, as a decimal string.
    pub sub: String,
    pub email: String,
    pub name: String,
    /// Comma-joined role names, e.g. `ROLE_USER,ROLE_ADMIN`.
    pub roles: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

/// Why a token was rejected.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("invalid JWT signature")]
    InvalidSignature,
    #[error("malformed JWT")]
    Malformed,
    #[error("expired JWT")]
    Expired,
    #[error("unsupported JWT")]
    Unsupported,
    #[error("JWT issued by an unexpected issuer")]
    InvalidIssuer,
    #[error("JWT subject is not a user id")]
    InvalidSubject,
    #[error("failed to sign JWT: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::InvalidSignature => JwtError::InvalidSignature,
            ErrorKind::ExpiredSignature => JwtError::Expired,
            ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::MissingAlgorithm
            | ErrorKind::InvalidKeyFormat => JwtError::Unsupported,
            ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
            _ => JwtError::Malformed,
        }
    }
}

/// Issues and validates HS256 tokens with a shared secret.
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    expiration: Duration,
}

impl JwtService {
    /// Creates a service.
    ///
    /// # Arguments
    ///
    /// - `secret` - HMAC key; at least 32 bytes is enforced by [`crate::config::Config::validate`]
    /// - `issuer` - value of the `iss` claim; tokens from other issuers are rejected
    /// - `expiration` - token lifetime
    pub fn new(secret: &str, issuer: impl Into<String>, expiration: Duration) -> Self {
        let issuer = issuer.into();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            issuer,
            expiration,
        }
    }

    /// Token lifetime in seconds, as reported to clients.
    pub fn expires_in_seconds(&self) -> i64 {
        self.expiration.num_seconds()
    }

    /// Issues a signed token for `user`.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::Signing`] if encoding fails.
    pub fn generate_token(&self, user: &User) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            roles: user.roles_claim(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + self.expiration).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(JwtError::Signing)
    }

    /// Verifies signature, algorithm, issuer and expiry, and returns the claims.
    ///
    /// # Errors
    ///
    /// Returns the [`JwtError`] variant describing the rejection.
    pub fn validate(&self, token: &str) -> Result<TokenClaims, JwtError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }

    /// Validates `token` and parses its subject as a user id.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::InvalidSubject`] if `sub` is not an integer, or any
    /// error from [`JwtService::validate`].
    pub fn user_id_from_token(&self, token: &str) -> Result<i64, JwtError> {
        let claims = self.validate(token)?;
        claims.sub.parse().map_err(|_| JwtError::InvalidSubject)
    }

    /// Validates `token` and returns its `email` claim.
    ///
    /// # Errors
    ///
    /// Returns any error from [`JwtService::validate`].
    pub fn email_from_token(&self, token: &str) -> Result<String, JwtError> {
        Ok(self.validate(token)?.email)
    }

    /// Returns whether `token` is valid, logging the rejection reason.
    pub fn is_valid(&self, token: &str) -> bool {
        match self.validate(token) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(reason = %e, "JWT rejected");
                false
            }
        }
    }
}
