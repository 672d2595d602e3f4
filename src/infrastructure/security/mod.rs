//! Token and password primitives.
//!
//! - [`jwt`] - HS256 JSON Web Tokens carrying the user id, email, name and roles
//! - [`password`] - bcrypt hashing on the blocking thread pool

pub mod jwt;
pub mod password;

pub use jwt::{JwtError, JwtService, TokenClaims};
pub use password::PasswordHasher;
