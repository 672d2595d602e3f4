//! Business logic services for the application layer.

pub mod auth_service;
pub mod category_service;
pub mod product_service;
pub mod user_service;

pub use auth_service::{AuthService, AuthSession};
pub use category_service::CategoryService;
pub use product_service::{ProductDraft, ProductService};
pub use user_service::UserService;

use std::ops::RangeInclusive;

use serde_json::json;

use crate::error::AppError;

/// Trims a name and checks its length in characters against `bounds`.
pub(crate) fn normalize_name(
    raw: &str,
    bounds: RangeInclusive<usize>,
) -> Result<String, AppError> {
    let name = raw.trim();
    let len = name.chars().count();
    if !bounds.contains(&len) {
        return Err(AppError::bad_request(
            "Validation failed",
            json!({
                "name": [format!(
                    "Name must be between {} and {} characters",
                    bounds.start(),
                    bounds.end()
                )]
            }),
        ));
    }
    Ok(name.to_string())
}
