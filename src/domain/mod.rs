//! Domain layer containing business entities and repository contracts.
//!
//! This module holds the core model of the catalog independent of HTTP and
//! database concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Users, roles, categories and products
//! - [`repositories`] - Data access trait definitions
//! - [`pagination`] - Page requests, sorting, `Page` and `Slice` results
//! - [`principal`] - The authenticated caller and its authorization checks
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])

pub mod entities;
pub mod pagination;
pub mod principal;
pub mod repositories;
