//! API route configuration.
//!
//! Everything except registration and login requires a Bearer token via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    category_products_handler, create_category_handler, create_product_handler,
    create_user_handler, delete_category_handler, delete_product_handler, delete_user_handler,
    get_category_handler, get_product_handler, get_user_handler, list_categories_handler,
    list_products_handler, list_users_handler, login_handler, me_handler,
    paginated_products_handler, register_handler, search_products_handler,
    slice_products_handler, update_category_handler, update_product_handler,
    update_roles_handler, update_user_handler, user_products_handler,
    user_products_page_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Credential endpoints, reachable without a token.
///
/// # Endpoints
///
/// - `POST /auth/register` - Create an account and receive a token
/// - `POST /auth/login`    - Exchange credentials for a token
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
}

/// Routes that require an authenticated caller.
///
/// # Endpoints
///
/// - `GET    /auth/me`                      - Current account
/// - `GET    /users`                        - List users (admin)
/// - `POST   /users`                        - Create a user (admin)
/// - `GET    /users/{id}`                   - Get a user (self or admin)
/// - `PATCH  /users/{id}`                   - Update a user (self or admin)
/// - `DELETE /users/{id}`                   - Delete a user (admin)
/// - `PUT    /users/{id}/roles`             - Replace roles (admin)
/// - `GET    /users/{id}/products`          - Products owned by a user
/// - `GET    /categories`                   - List categories
/// - `POST   /categories`                   - Create a category (admin)
/// - `GET    /categories/{id}`              - Get a category
/// - `PUT    /categories/{id}`              - Update a category (admin)
/// - `DELETE /categories/{id}`              - Delete an unused category (admin)
/// - `GET    /products`                     - List all products (admin)
/// - `POST   /products`                     - Create a product
/// - `GET    /products/paginated`           - Page through products
/// - `GET    /products/slice`               - Page without totals
/// - `GET    /products/search`              - Filter and page
/// - `GET    /products/user/{userId}`       - Filter and page one owner's products
/// - `GET    /products/category/{categoryId}` - Products in a category
/// - `GET    /products/{id}`                - Get a product
/// - `PUT    /products/{id}`                - Update a product (owner, moderator, admin)
/// - `DELETE /products/{id}`                - Delete a product (owner, moderator, admin)
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(me_handler))
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route(
            "/users/{id}",
            get(get_user_handler)
                .patch(update_user_handler)
                .delete(delete_user_handler),
        )
        .route("/users/{id}/roles", put(update_roles_handler))
        .route("/users/{id}/products", get(user_products_handler))
        .route(
            "/categories",
            get(list_categories_handler).post(create_category_handler),
        )
        .route(
            "/categories/{id}",
            get(get_category_handler)
                .put(update_category_handler)
                .delete(delete_category_handler),
        )
        .route(
            "/products",
            get(list_products_handler).post(create_product_handler),
        )
        .route("/products/paginated", get(paginated_products_handler))
        .route("/products/slice", get(slice_products_handler))
        .route("/products/search", get(search_products_handler))
        .route("/products/user/{user_id}", get(user_products_page_handler))
        .route(
            "/products/category/{category_id}",
            get(category_products_handler),
        )
        .route(
            "/products/{id}",
            get(get_product_handler)
                .put(update_product_handler)
                .delete(delete_product_handler),
        )
}
