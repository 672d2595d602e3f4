//! Repository trait for products.

use crate::domain::entities::{NewProduct, Product, ProductFilter, ProductUpdate};
use crate::domain::pagination::{Page, PageRequest, Slice};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for products.
///
/// Every returned [`Product`] has its owner and categories resolved.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgProductRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_product.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Creates a product and links its categories in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the name is taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_product: NewProduct) -> Result<Product, AppError>;

    /// Finds a product by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, AppError>;

    /// Finds a product by exact name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, AppError>;

    /// Replaces a product's fields and category links in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the product does not exist.
    /// Returns [`AppError::Conflict`] if the name is taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: i64, update: ProductUpdate) -> Result<Product, AppError>;

    /// Deletes a product. Returns `false` if no product had this id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Lists every product matching `filter`, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, filter: ProductFilter) -> Result<Vec<Product>, AppError>;

    /// Returns one page of matching products with the total count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_page(
        &self,
        filter: ProductFilter,
        page: PageRequest,
    ) -> Result<Page<Product>, AppError>;

    /// Returns one page of matching products without counting.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_slice(
        &self,
        filter: ProductFilter,
        page: PageRequest,
    ) -> Result<Slice<Product>, AppError>;
}
