//! Category management service.

use std::sync::Arc;

use super::normalize_name;
use crate::domain::entities::{Category, CategoryUpdate, NewCategory, RoleName};
use crate::domain::principal::CurrentUser;
use crate::domain::repositories::CategoryRepository;
use crate::error::AppError;
use serde_json::json;

const NAME_BOUNDS: std::ops::RangeInclusive<usize> = 2..=120;

/// Service for reading and administering categories.
///
/// Reads are open to any authenticated caller; writes require `ROLE_ADMIN`.
pub struct CategoryService<C: CategoryRepository> {
    repository: Arc<C>,
}

impl<C: CategoryRepository> CategoryService<C> {
    /// Creates a new category service.
    pub fn new(repository: Arc<C>) -> Self {
        Self { repository }
    }

    /// Lists all categories ordered by name.
    pub async fn list(&self) -> Result<Vec<Category>, AppError> {
        self.repository.list().await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no category has this id.
    pub async fn get(&self, id: i64) -> Result<Category, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Category not found", json!({ "id": id })))
    }

    /// Creates a category. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the name is taken.
    pub async fn create(
        &self,
        caller: &CurrentUser,
        name: String,
        description: Option<String>,
    ) -> Result<Category, AppError> {
        caller.require_role(RoleName::Admin)?;

        let name = normalize_name(&name, NAME_BOUNDS)?;
        if self.repository.find_by_name(&name).await?.is_some() {
            return Err(AppError::conflict(
                "Category name already exists",
                json!({ "name": name }),
            ));
        }

        let category = self
            .repository
            .create(NewCategory { name, description })
            .await?;

        tracing::info!(category_id = category.id, "Category created");
        Ok(category)
    }

    /// Replaces name and description. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the category does not exist.
    /// Returns [`AppError::Conflict`] if another category has the name.
    pub async fn update(
        &self,
        caller: &CurrentUser,
        id: i64,
        name: String,
        description: Option<String>,
    ) -> Result<Category, AppError> {
        caller.require_role(RoleName::Admin)?;

        self.get(id).await?;

        let name = normalize_name(&name, NAME_BOUNDS)?;
        if let Some(other) = self.repository.find_by_name(&name).await?
            && other.id != id
        {
            return Err(AppError::conflict(
                "Category name already exists",
                json!({ "name": name }),
            ));
        }

        self.repository
            .update(id, CategoryUpdate { name, description })
            .await
    }

    /// Deletes a category that no product uses. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the category does not exist.
    /// Returns [`AppError::Conflict`] with `productsCount` if products still
    /// reference it.
    pub async fn delete(&self, caller: &CurrentUser, id: i64) -> Result<(), AppError> {
        caller.require_role(RoleName::Admin)?;

        self.get(id).await?;

        let products_count = self.repository.count_products(id).await?;
        if products_count > 0 {
            return Err(AppError::conflict(
                "Category is in use by products",
                json!({ "id": id, "productsCount": products_count }),
            ));
        }

        if !self.repository.delete(id).await? {
            return Err(AppError::not_found("Category not found", json!({ "id": id })));
        }

        tracing::info!(category_id = id, "Category deleted");
        Ok(())
    }
}
