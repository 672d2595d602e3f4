//! Domain entity representing a catalog product.

use chrono::{DateTime, Utc};
use serde_json::json;

use super::category::Category;
use crate::error::AppError;

/// Summary of the user that owns a product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductOwner {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// A product with its owner and categories resolved.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub owner: ProductOwner,
    pub categories: Vec<Category>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a new product.
///
/// `category_ids` must already be verified to exist.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub owner_id: i64,
    pub category_ids: Vec<i64>,
}

/// Full replacement of a product's editable fields. The owner never changes.
#[derive(Debug, Clone)]
pub struct ProductUpdate {
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub category_ids: Vec<i64>,
}

/// Criteria for listing products. Unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the product name.
    pub name: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub category_id: Option<i64>,
    pub owner_id: Option<i64>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds name filtering. Blank names are ignored.
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        self
    }

    pub fn with_price_range(mut self, min_price: Option<f64>, max_price: Option<f64>) -> Self {
        self.min_price = min_price;
        self.max_price = max_price;
        self
    }

    pub fn with_category(mut self, category_id: Option<i64>) -> Self {
        self.category_id = category_id;
        self
    }

    pub fn with_owner(mut self, owner_id: Option<i64>) -> Self {
        self.owner_id = owner_id;
        self
    }

    /// Checks the price bounds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a bound is negative or
    /// `max_price < min_price`.
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(min) = self.min_price
            && min < 0.0
        {
            return Err(AppError::bad_request(
                "Minimum price cannot be negative",
                json!({ "minPrice": min }),
            ));
        }

        if let Some(max) = self.max_price
            && max < 0.0
        {
            return Err(AppError::bad_request(
                "Maximum price cannot be negative",
                json!({ "maxPrice": max }),
            ));
        }

        if let (Some(min), Some(max)) = (self.min_price, self.max_price)
            && max < min
        {
            return Err(AppError::bad_request(
                "Maximum price must be greater than or equal to minimum price",
                json!({ "minPrice": min, "maxPrice": max }),
            ));
        }

        Ok(())
    }
}
