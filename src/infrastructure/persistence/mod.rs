//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Queries are
//! checked at runtime (`query_as` with `FromRow` rows) so the crate builds
//! without a live database; dynamic listing queries are composed with
//! [`sqlx::QueryBuilder`].
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - Users and role assignments
//! - [`PgRoleRepository`] - Seeded roles
//! - [`PgCategoryRepository`] - Categories
//! - [`PgProductRepository`] - Products, filters and pagination

pub mod pg_category_repository;
pub mod pg_product_repository;
pub mod pg_role_repository;
pub mod pg_user_repository;

pub use pg_category_repository::PgCategoryRepository;
pub use pg_product_repository::PgProductRepository;
pub use pg_role_repository::PgRoleRepository;
pub use pg_user_repository::PgUserRepository;
