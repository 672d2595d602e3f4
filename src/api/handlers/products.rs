//! Handlers for products.

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use axum_extra::extract::{Query, QueryRejection};
use validator::Validate;

use crate::api::dto::pagination::{PageResponse, ProductQuery, SliceResponse};
use crate::api::dto::product::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use crate::domain::entities::ProductFilter;
use crate::domain::principal::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a product owned by the caller.
///
/// # Endpoint
///
/// `POST /api/products`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Laptop",
///   "price": 999.99,
///   "description": "14 inch",
///   "categoryIds": [1, 2],
///   "userId": 3
/// }
/// ```
///
/// `userId` is optional; naming another user requires `ROLE_ADMIN`.
///
/// # Errors
///
/// - 400 if validation fails
/// - 403 if a non-admin names another owner
/// - 404 if the owner or a category does not exist
/// - 409 if the name is taken
pub async fn create_product_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let (draft, user_id) = payload.into_parts();
    let product = state
        .product_service
        .create(&current, draft, user_id)
        .await?;

    Ok((StatusCode::CREATED, Json(product.into())))
}

/// Lists every product ordered by id.
///
/// # Endpoint
///
/// `GET /api/products` (admin)
pub async fn list_products_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state.product_service.list_all(&current).await?;
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

/// Pages through all products.
///
/// # Endpoint
///
/// `GET /api/products/paginated?page=0&size=10&sort=name,asc`
///
/// # Response
///
/// ```json
/// {
///   "content": [ ... ],
///   "number": 0,
///   "size": 10,
///   "totalElements": 42,
///   "totalPages": 5,
///   "numberOfElements": 10,
///   "first": true,
///   "last": false,
///   "empty": false
/// }
/// ```
pub async fn paginated_products_handler(
    State(state): State<AppState>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<PageResponse<ProductResponse>>, AppError> {
    let Query(query) = query?;
    let page = query.page_request("id")?;

    let result = state
        .product_service
        .page(ProductFilter::new(), page)
        .await?;

    Ok(Json(result.map(ProductResponse::from).into()))
}

/// Pages through all products without computing totals.
///
/// # Endpoint
///
/// `GET /api/products/slice?page=0&size=10&sort=createdAt,desc`
pub async fn slice_products_handler(
    State(state): State<AppState>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<SliceResponse<ProductResponse>>, AppError> {
    let Query(query) = query?;
    let page = query.page_request("id")?;

    let result = state
        .product_service
        .slice(ProductFilter::new(), page)
        .await?;

    Ok(Json(result.map(ProductResponse::from).into()))
}

/// Filters and pages through products.
///
/// # Endpoint
///
/// `GET /api/products/search?name=laptop&minPrice=500&maxPrice=2000&categoryId=1&page=0&size=5&sort=price,desc`
///
/// All filters are optional; results default to `createdAt` order.
///
/// # Errors
///
/// Returns 400 for a negative or inverted price range, an out-of-range page
/// or size, or an unknown sort property.
pub async fn search_products_handler(
    State(state): State<AppState>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<PageResponse<ProductResponse>>, AppError> {
    let Query(query) = query?;
    let page = query.page_request("createdAt")?;

    let result = state.product_service.page(query.filter(), page).await?;

    Ok(Json(result.map(ProductResponse::from).into()))
}

/// # Endpoint
///
/// `GET /api/products/{id}`
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state.product_service.get(id).await?;
    Ok(Json(product.into()))
}

/// Filters and pages through the products of one user.
///
/// # Endpoint
///
/// `GET /api/products/user/{userId}?page=0&size=5&sort=price,desc`
///
/// Accepts the same filters as `/api/products/search`.
pub async fn user_products_page_handler(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<PageResponse<ProductResponse>>, AppError> {
    let Query(query) = query?;
    let page = query.page_request("createdAt")?;

    let result = state
        .product_service
        .page_by_owner(user_id, query.filter(), page)
        .await?;

    Ok(Json(result.map(ProductResponse::from).into()))
}

/// # Endpoint
///
/// `GET /api/products/category/{categoryId}`
pub async fn category_products_handler(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state.product_service.list_by_category(category_id).await?;
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

/// Replaces a product's fields and categories.
///
/// # Endpoint
///
/// `PUT /api/products/{id}` (owner, moderator or admin)
pub async fn update_product_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<ProductResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let product = state
        .product_service
        .update(&current, id, payload.into())
        .await?;

    Ok(Json(product.into()))
}

/// # Endpoint
///
/// `DELETE /api/products/{id}` (owner, moderator or admin)
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.product_service.delete(&current, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
