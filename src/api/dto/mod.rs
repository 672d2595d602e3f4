//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization with camelCase
//! field names, and validator for input validation.

pub mod auth;
pub mod category;
pub mod health;
pub mod pagination;
pub mod product;
pub mod user;

/// Serde helpers that trim names before `validator` sees them, so length
/// rules apply to the value that is stored.
pub(crate) mod trimmed {
    use serde::{Deserialize, Deserializer};

    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(value.trim().to_string())
    }

    pub fn option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.map(|v| v.trim().to_string()))
    }
}
