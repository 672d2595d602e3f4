//! DTOs for products.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::dto::category::CategoryResponse;
use crate::application::services::ProductDraft;
use crate::domain::entities::{Product, ProductOwner};

/// Body of `POST /api/products`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[serde(deserialize_with = "crate::api::dto::trimmed::string")]
    #[validate(length(min = 3, max = 150, message = "Name must be between 3 and 150 characters"))]
    pub name: String,

    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than 0"))]
    pub price: f64,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 1, message = "At least one category is required"))]
    pub category_ids: Vec<i64>,

    /// Owner of the new product; only admins may name someone else.
    pub user_id: Option<i64>,
}

impl CreateProductRequest {
    pub fn into_parts(self) -> (ProductDraft, Option<i64>) {
        (
            ProductDraft {
                name: self.name,
                price: self.price,
                description: self.description,
                category_ids: self.category_ids,
            },
            self.user_id,
        )
    }
}

/// Body of `PUT /api/products/{id}`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[serde(deserialize_with = "crate::api::dto::trimmed::string")]
    #[validate(length(min = 3, max = 150, message = "Name must be between 3 and 150 characters"))]
    pub name: String,

    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than 0"))]
    pub price: f64,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 1, message = "At least one category is required"))]
    pub category_ids: Vec<i64>,
}

impl From<UpdateProductRequest> for ProductDraft {
    fn from(req: UpdateProductRequest) -> Self {
        ProductDraft {
            name: req.name,
            price: req.price,
            description: req.description,
            category_ids: req.category_ids,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductOwnerResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<ProductOwner> for ProductOwnerResponse {
    fn from(owner: ProductOwner) -> Self {
        Self {
            id: owner.id,
            name: owner.name,
            email: owner.email,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub user: ProductOwnerResponse,
    pub categories: Vec<CategoryResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            description: product.description,
            user: product.owner.into(),
            categories: product
                .categories
                .into_iter()
                .map(CategoryResponse::from)
                .collect(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(price: f64, category_ids: Vec<i64>) -> CreateProductRequest {
        CreateProductRequest {
            name: "Laptop".to_string(),
            price,
            description: None,
            category_ids,
            user_id: None,
        }
    }

    #[test]
    fn test_price_must_be_positive() {
        assert!(request(0.01, vec![1]).validate().is_ok());

        let errors = request(0.0, vec![1]).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));

        assert!(request(-5.0, vec![1]).validate().is_err());
    }

    #[test]
    fn test_categories_required() {
        let errors = request(10.0, vec![]).validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 1);
    }

    #[test]
    fn test_name_length_checked_after_trim() {
        let json = r#"{"name":"     ","price":5.0,"categoryIds":[1]}"#;
        let req: CreateProductRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.name, "");
        assert!(req.validate().unwrap_err().field_errors().contains_key("name"));

        let json = r#"{"name":"  Laptop  ","price":5.0,"categoryIds":[1]}"#;
        let req: CreateProductRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.name, "Laptop");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{"name":"Laptop","price":999.5,"categoryIds":[1,2],"userId":7}"#;
        let req: CreateProductRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.category_ids, vec![1, 2]);
        assert_eq!(req.user_id, Some(7));
        assert!(req.description.is_none());
    }
}
