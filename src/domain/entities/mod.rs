//! Core domain entities representing the catalog data model.
//!
//! # Entity Types
//!
//! - [`User`] - An account that owns products
//! - [`Role`] / [`RoleName`] - Authorization roles granted to users
//! - [`Category`] - A product grouping
//! - [`Product`] - A catalog item owned by a user and tagged with categories
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation
//! and modification:
//! - `NewUser`, `NewCategory`, `NewProduct` - For creating new records
//! - `UserUpdate`, `CategoryUpdate`, `ProductUpdate` - For updates

pub mod category;
pub mod product;
pub mod role;
pub mod user;

pub use category::{Category, CategoryUpdate, NewCategory};
pub use product::{NewProduct, Product, ProductFilter, ProductOwner, ProductUpdate};
pub use role::{Role, RoleName};
pub use user::{NewUser, User, UserUpdate};
