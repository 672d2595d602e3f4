//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod categories;
pub mod health;
pub mod products;
pub mod users;

pub use auth::{login_handler, me_handler, register_handler};
pub use categories::{
    create_category_handler, delete_category_handler, get_category_handler,
    list_categories_handler, update_category_handler,
};
pub use health::{health_handler, info_handler};
pub use products::{
    category_products_handler, create_product_handler, delete_product_handler,
    get_product_handler, list_products_handler, paginated_products_handler,
    search_products_handler, slice_products_handler, update_product_handler,
    user_products_page_handler,
};
pub use users::{
    create_user_handler, delete_user_handler, get_user_handler, list_users_handler,
    update_roles_handler, update_user_handler, user_products_handler,
};
