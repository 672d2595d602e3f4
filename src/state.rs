//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{AuthService, CategoryService, ProductService, UserService};
use crate::infrastructure::persistence::{
    PgCategoryRepository, PgProductRepository, PgRoleRepository, PgUserRepository,
};
use crate::infrastructure::security::{JwtService, PasswordHasher};

pub type AppAuthService = AuthService<PgUserRepository, PgRoleRepository>;
pub type AppUserService = UserService<PgUserRepository, PgRoleRepository>;
pub type AppCategoryService = CategoryService<PgCategoryRepository>;
pub type AppProductService =
    ProductService<PgProductRepository, PgUserRepository, PgCategoryRepository>;

/// Services wired to their PostgreSQL repositories.
///
/// Cloned per request; every field is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AppAuthService>,
    pub user_service: Arc<AppUserService>,
    pub category_service: Arc<AppCategoryService>,
    pub product_service: Arc<AppProductService>,
    pub pool: Arc<PgPool>,
}

impl AppState {
    /// Builds repositories and services over one connection pool.
    pub fn new(pool: Arc<PgPool>, jwt: Arc<JwtService>, hasher: PasswordHasher) -> Self {
        let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
        let role_repository = Arc::new(PgRoleRepository::new(pool.clone()));
        let category_repository = Arc::new(PgCategoryRepository::new(pool.clone()));
        let product_repository = Arc::new(PgProductRepository::new(pool.clone()));

        Self {
            auth_service: Arc::new(AuthService::new(
                user_repository.clone(),
                role_repository.clone(),
                jwt,
                hasher,
            )),
            user_service: Arc::new(UserService::new(
                user_repository.clone(),
                role_repository,
                hasher,
            )),
            category_service: Arc::new(CategoryService::new(category_repository.clone())),
            product_service: Arc::new(ProductService::new(
                product_repository,
                user_repository,
                category_repository,
            )),
            pool,
        }
    }
}
