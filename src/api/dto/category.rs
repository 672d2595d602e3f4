//! DTOs for categories.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Category;

/// Body of category create and update requests.
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRequest {
    #[serde(deserialize_with = "crate::api::dto::trimmed::string")]
    #[validate(length(min = 2, max = 120, message = "Name must be between 2 and 120 characters"))]
    pub name: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
        }
    }
}
