//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! access checks, and business rules. Services consume repository traits and
//! provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Registration, login and JWT authentication
//! - [`services::user_service::UserService`] - Account administration and role assignment
//! - [`services::category_service::CategoryService`] - Category management
//! - [`services::product_service::ProductService`] - Product CRUD, ownership and listing

pub mod services;
