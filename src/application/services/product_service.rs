//! Product catalog service.

use std::sync::Arc;

use super::normalize_name;
use crate::domain::entities::{NewProduct, Product, ProductFilter, ProductUpdate, RoleName};
use crate::domain::pagination::{Page, PageRequest, Slice};
use crate::domain::principal::CurrentUser;
use crate::domain::repositories::{CategoryRepository, ProductRepository, UserRepository};
use crate::error::AppError;
use serde_json::json;

const NAME_BOUNDS: std::ops::RangeInclusive<usize> = 3..=150;

/// Product fields shared by create and update.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub category_ids: Vec<i64>,
}

/// Service for creating, querying and modifying products.
///
/// # Ownership
///
/// A product belongs to the user who created it. Only the owner, a moderator
/// or an admin may update or delete it. Admins may create products on behalf
/// of another user.
pub struct ProductService<P: ProductRepository, U: UserRepository, C: CategoryRepository> {
    product_repository: Arc<P>,
    user_repository: Arc<U>,
    category_repository: Arc<C>,
}

impl<P: ProductRepository, U: UserRepository, C: CategoryRepository> ProductService<P, U, C> {
    /// Creates a new product service.
    pub fn new(
        product_repository: Arc<P>,
        user_repository: Arc<U>,
        category_repository: Arc<C>,
    ) -> Self {
        Self {
            product_repository,
            user_repository,
            category_repository,
        }
    }

    /// Creates a product owned by the caller, or by `user_id` when an admin
    /// creates it on someone's behalf.
    ///
    /// # Errors
    ///
    /// - [`AppError::Forbidden`] if a non-admin names another owner
    /// - [`AppError::NotFound`] if the owner or a category does not exist
    /// - [`AppError::Conflict`] if the name is taken
    pub async fn create(
        &self,
        caller: &CurrentUser,
        draft: ProductDraft,
        user_id: Option<i64>,
    ) -> Result<Product, AppError> {
        let owner_id = match user_id {
            Some(id) if id != caller.id => {
                if !caller.is_admin() {
                    tracing::warn!(
                        user_id = caller.id,
                        requested_owner = id,
                        "Non-admin tried to create a product for another user"
                    );
                    return Err(AppError::forbidden(
                        "Only administrators can create products for other users",
                        json!({ "userId": id }),
                    ));
                }
                self.ensure_user_exists(id).await?;
                id
            }
            _ => caller.id,
        };

        let name = normalize_name(&draft.name, NAME_BOUNDS)?;
        if self.product_repository.find_by_name(&name).await?.is_some() {
            return Err(AppError::conflict(
                "Product name already exists",
                json!({ "name": name }),
            ));
        }

        let category_ids = self.resolve_categories(draft.category_ids).await?;

        let product = self
            .product_repository
            .create(NewProduct {
                name,
                price: draft.price,
                description: draft.description,
                owner_id,
                category_ids,
            })
            .await?;

        tracing::info!(product_id = product.id, owner_id, "Product created");
        Ok(product)
    }

    /// Lists every product ordered by id. Admin only.
    pub async fn list_all(&self, caller: &CurrentUser) -> Result<Vec<Product>, AppError> {
        caller.require_role(RoleName::Admin)?;
        self.product_repository.list(ProductFilter::new()).await
    }

    /// Returns one page of products matching `filter`, with the total count.
    pub async fn page(
        &self,
        filter: ProductFilter,
        page: PageRequest,
    ) -> Result<Page<Product>, AppError> {
        filter.validate()?;
        self.product_repository.find_page(filter, page).await
    }

    /// Returns one page of products without counting the total.
    pub async fn slice(
        &self,
        filter: ProductFilter,
        page: PageRequest,
    ) -> Result<Slice<Product>, AppError> {
        filter.validate()?;
        self.product_repository.find_slice(filter, page).await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no product has this id.
    pub async fn get(&self, id: i64) -> Result<Product, AppError> {
        self.product_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found", json!({ "id": id })))
    }

    /// Pages through the products owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn page_by_owner(
        &self,
        user_id: i64,
        filter: ProductFilter,
        page: PageRequest,
    ) -> Result<Page<Product>, AppError> {
        self.ensure_user_exists(user_id).await?;
        self.page(filter.with_owner(Some(user_id)), page).await
    }

    /// Lists all products owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn list_by_owner(&self, user_id: i64) -> Result<Vec<Product>, AppError> {
        self.ensure_user_exists(user_id).await?;
        self.product_repository
            .list(ProductFilter::new().with_owner(Some(user_id)))
            .await
    }

    /// Lists all products tagged with `category_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the category does not exist.
    pub async fn list_by_category(&self, category_id: i64) -> Result<Vec<Product>, AppError> {
        if self
            .category_repository
            .find_by_id(category_id)
            .await?
            .is_none()
        {
            return Err(AppError::not_found(
                "Category not found",
                json!({ "id": category_id }),
            ));
        }

        self.product_repository
            .list(ProductFilter::new().with_category(Some(category_id)))
            .await
    }

    /// Replaces a product's fields and categories.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the product or a category does not exist
    /// - [`AppError::Forbidden`] if the caller may not manage the product
    /// - [`AppError::Conflict`] if another product has the name
    pub async fn update(
        &self,
        caller: &CurrentUser,
        id: i64,
        draft: ProductDraft,
    ) -> Result<Product, AppError> {
        let existing = self.get(id).await?;
        ensure_can_manage(caller, &existing)?;

        let name = normalize_name(&draft.name, NAME_BOUNDS)?;
        if let Some(other) = self.product_repository.find_by_name(&name).await?
            && other.id != id
        {
            return Err(AppError::conflict(
                "Product name already exists",
                json!({ "name": name }),
            ));
        }

        let category_ids = self.resolve_categories(draft.category_ids).await?;

        let product = self
            .product_repository
            .update(
                id,
                ProductUpdate {
                    name,
                    price: draft.price,
                    description: draft.description,
                    category_ids,
                },
            )
            .await?;

        tracing::info!(product_id = id, updated_by = caller.id, "Product updated");
        Ok(product)
    }

    /// Deletes a product.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the product does not exist
    /// - [`AppError::Forbidden`] if the caller may not manage the product
    pub async fn delete(&self, caller: &CurrentUser, id: i64) -> Result<(), AppError> {
        let existing = self.get(id).await?;
        ensure_can_manage(caller, &existing)?;

        if !self.product_repository.delete(id).await? {
            return Err(AppError::not_found("Product not found", json!({ "id": id })));
        }

        tracing::info!(product_id = id, deleted_by = caller.id, "Product deleted");
        Ok(())
    }

    async fn ensure_user_exists(&self, user_id: i64) -> Result<(), AppError> {
        if self.user_repository.find_by_id(user_id).await?.is_none() {
            return Err(AppError::not_found(
                "User not found",
                json!({ "id": user_id }),
            ));
        }
        Ok(())
    }

    /// Deduplicates `ids` and checks that each names an existing category.
    async fn resolve_categories(&self, mut ids: Vec<i64>) -> Result<Vec<i64>, AppError> {
        ids.sort_unstable();
        ids.dedup();

        if ids.is_empty() {
            return Err(AppError::bad_request(
                "At least one category is required",
                json!({ "categoryIds": ids }),
            ));
        }

        let found = self.category_repository.find_by_ids(ids.clone()).await?;
        if found.len() != ids.len() {
            let missing: Vec<i64> = ids
                .iter()
                .copied()
                .filter(|id| !found.iter().any(|c| c.id == *id))
                .collect();
            return Err(AppError::not_found(
                "Category not found",
                json!({ "ids": missing }),
            ));
        }

        Ok(ids)
    }
}

fn ensure_can_manage(caller: &CurrentUser, product: &Product) -> Result<(), AppError> {
    if caller.can_manage(product.owner.id) {
        return Ok(());
    }

    tracing::warn!(
        user_id = caller.id,
        product_id = product.id,
        owner_id = product.owner.id,
        "Product modification denied"
    );
    Err(AppError::forbidden(
        "You cannot modify products owned by another user",
        json!({ "id": product.id }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Category, ProductOwner, User};
    use crate::domain::repositories::{
        MockCategoryRepository, MockProductRepository, MockUserRepository,
    };
    use chrono::Utc;

    type TestService =
        ProductService<MockProductRepository, MockUserRepository, MockCategoryRepository>;

    fn service(
        products: MockProductRepository,
        users: MockUserRepository,
        categories: MockCategoryRepository,
    ) -> TestService {
        ProductService::new(Arc::new(products), Arc::new(users), Arc::new(categories))
    }

    fn caller(id: i64, roles: Vec<RoleName>) -> CurrentUser {
        CurrentUser {
            id,
            name: format!("User {id}"),
            email: format!("user{id}@example.com"),
            roles,
        }
    }

    fn create_test_category(id: i64) -> Category {
        Category {
            id,
            name: format!("Category {id}"),
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn create_test_product(id: i64, name: &str, owner_id: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            price: 9.99,
            description: None,
            owner: ProductOwner {
                id: owner_id,
                name: format!("User {owner_id}"),
                email: format!("user{owner_id}@example.com"),
            },
            categories: vec![create_test_category(1)],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn create_test_user(id: i64) -> User {
        User {
            id,
            name: format!("User {id}"),
            email: format!("user{id}@example.com"),
            password_hash: String::new(),
            roles: vec![RoleName::User],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn draft(name: &str, category_ids: Vec<i64>) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            price: 19.5,
            description: Some("desc".to_string()),
            category_ids,
        }
    }

    fn categories_found() -> MockCategoryRepository {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_find_by_ids()
            .returning(|ids| Ok(ids.into_iter().map(create_test_category).collect()));
        categories
    }

    #[tokio::test]
    async fn test_create_owned_by_caller() {
        let mut products = MockProductRepository::new();
        products
            .expect_find_by_name()
            .withf(|name| name == "Laptop")
            .times(1)
            .returning(|_| Ok(None));
        products
            .expect_create()
            .withf(|p| p.owner_id == 5 && p.category_ids == vec![1, 2] && p.name == "Laptop")
            .times(1)
            .returning(|p| Ok(create_test_product(11, &p.name, p.owner_id)));

        let product = service(products, MockUserRepository::new(), categories_found())
            .create(
                &caller(5, vec![RoleName::User]),
                draft(" Laptop ", vec![2, 1, 2]),
                None,
            )
            .await
            .unwrap();

        assert_eq!(product.owner.id, 5);
    }

    #[tokio::test]
    async fn test_create_for_other_user_requires_admin() {
        let mut products = MockProductRepository::new();
        products.expect_create().times(0);

        let result = service(products, MockUserRepository::new(), MockCategoryRepository::new())
            .create(&caller(5, vec![RoleName::User]), draft("Laptop", vec![1]), Some(6))
            .await;

        assert!(matches!(result, Err(AppError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_admin_creates_for_other_user() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .withf(|id| *id == 6)
            .times(1)
            .returning(|id| Ok(Some(create_test_user(id))));

        let mut products = MockProductRepository::new();
        products.expect_find_by_name().returning(|_| Ok(None));
        products
            .expect_create()
            .withf(|p| p.owner_id == 6)
            .times(1)
            .returning(|p| Ok(create_test_product(12, &p.name, p.owner_id)));

        let product = service(products, users, categories_found())
            .create(&caller(1, vec![RoleName::Admin]), draft("Laptop", vec![1]), Some(6))
            .await
            .unwrap();

        assert_eq!(product.owner.id, 6);
    }

    #[tokio::test]
    async fn test_admin_creates_for_missing_user() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().times(1).returning(|_| Ok(None));

        let result = service(MockProductRepository::new(), users, MockCategoryRepository::new())
            .create(&caller(1, vec![RoleName::Admin]), draft("Laptop", vec![1]), Some(404))
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_create_duplicate_name() {
        let mut products = MockProductRepository::new();
        products
            .expect_find_by_name()
            .returning(|name| Ok(Some(create_test_product(3, name, 9))));
        products.expect_create().times(0);

        let result = service(products, MockUserRepository::new(), categories_found())
            .create(&caller(5, vec![RoleName::User]), draft("Laptop", vec![1]), None)
            .await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_create_unknown_category() {
        let mut products = MockProductRepository::new();
        products.expect_find_by_name().returning(|_| Ok(None));
        products.expect_create().times(0);

        let mut categories = MockCategoryRepository::new();
        categories
            .expect_find_by_ids()
            .returning(|_| Ok(vec![create_test_category(1)]));

        let err = service(products, MockUserRepository::new(), categories)
            .create(&caller(5, vec![RoleName::User]), draft("Laptop", vec![1, 77]), None)
            .await
            .unwrap_err();

        match err {
            AppError::NotFound { message, details } => {
                assert_eq!(message, "Category not found");
                assert_eq!(details["ids"], json!([77]));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_without_categories() {
        let mut products = MockProductRepository::new();
        products.expect_find_by_name().returning(|_| Ok(None));
        products.expect_create().times(0);

        let result = service(products, MockUserRepository::new(), MockCategoryRepository::new())
            .create(&caller(5, vec![RoleName::User]), draft("Laptop", vec![]), None)
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let mut products = MockProductRepository::new();
        products.expect_find_by_name().times(0);
        products.expect_create().times(0);

        let svc = service(products, MockUserRepository::new(), MockCategoryRepository::new());
        let user = caller(5, vec![RoleName::User]);

        let blank = svc.create(&user, draft("     ", vec![1]), None).await;
        assert!(matches!(blank, Err(AppError::Validation { .. })));

        let short = svc.create(&user, draft("  ab ", vec![1]), None).await;
        assert!(matches!(short, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_update_by_non_owner_forbidden() {
        let mut products = MockProductRepository::new();
        products
            .expect_find_by_id()
            .returning(|id| Ok(Some(create_test_product(id, "Laptop", 5))));
        products.expect_update().times(0);

        let err = service(products, MockUserRepository::new(), MockCategoryRepository::new())
            .update(&caller(6, vec![RoleName::User]), 3, draft("Laptop", vec![1]))
            .await
            .unwrap_err();

        assert_eq!(
            err.message(),
            "You cannot modify products owned by another user"
        );
    }

    #[tokio::test]
    async fn test_moderator_updates_any_product() {
        let mut products = MockProductRepository::new();
        products
            .expect_find_by_id()
            .returning(|id| Ok(Some(create_test_product(id, "Laptop", 5))));
        products
            .expect_find_by_name()
            .returning(|name| Ok(Some(create_test_product(3, name, 5))));
        products
            .expect_update()
            .withf(|id, u| *id == 3 && u.price == 19.5)
            .times(1)
            .returning(|id, u| Ok(create_test_product(id, &u.name, 5)));

        service(products, MockUserRepository::new(), categories_found())
            .update(&caller(8, vec![RoleName::Moderator]), 3, draft("Laptop", vec![1]))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_by_owner() {
        let mut products = MockProductRepository::new();
        products
            .expect_find_by_id()
            .returning(|id| Ok(Some(create_test_product(id, "Laptop", 5))));
        products
            .expect_delete()
            .withf(|id| *id == 3)
            .times(1)
            .returning(|_| Ok(true));

        service(products, MockUserRepository::new(), MockCategoryRepository::new())
            .delete(&caller(5, vec![RoleName::User]), 3)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_page_rejects_invalid_price_range() {
        let mut products = MockProductRepository::new();
        products.expect_find_page().times(0);

        let filter = ProductFilter::new().with_price_range(Some(50.0), Some(10.0));
        let page = PageRequest::parse(0, 10, &[]).unwrap();

        let result = service(products, MockUserRepository::new(), MockCategoryRepository::new())
            .page(filter, page)
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_page_by_owner_sets_owner_filter() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(create_test_user(id))));

        let mut products = MockProductRepository::new();
        products
            .expect_find_page()
            .withf(|filter, _| filter.owner_id == Some(5))
            .times(1)
            .returning(|_, page| Ok(Page::new(vec![], &page, 0)));

        let page = service(products, users, MockCategoryRepository::new())
            .page_by_owner(
                5,
                ProductFilter::new(),
                PageRequest::parse(0, 10, &[]).unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(page.total_elements, 0);
    }

    #[tokio::test]
    async fn test_list_by_missing_category() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_find_by_id().returning(|_| Ok(None));

        let mut products = MockProductRepository::new();
        products.expect_list().times(0);

        let result = service(products, MockUserRepository::new(), categories)
            .list_by_category(4)
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }
}
