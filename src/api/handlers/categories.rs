//! Handlers for categories.

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::category::{CategoryRequest, CategoryResponse};
use crate::domain::principal::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// # Endpoint
///
/// `GET /api/categories`
pub async fn list_categories_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let categories = state.category_service.list().await?;
    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// # Endpoint
///
/// `GET /api/categories/{id}`
pub async fn get_category_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CategoryResponse>, AppError> {
    let category = state.category_service.get(id).await?;
    Ok(Json(category.into()))
}

/// # Endpoint
///
/// `POST /api/categories` (admin)
///
/// # Request Body
///
/// ```json
/// { "name": "Electronics", "description": "Devices and gadgets" }
/// ```
pub async fn create_category_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CategoryResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let category = state
        .category_service
        .create(&current, payload.name, payload.description)
        .await?;

    Ok((StatusCode::CREATED, Json(category.into())))
}

/// # Endpoint
///
/// `PUT /api/categories/{id}` (admin)
pub async fn update_category_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<Json<CategoryResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let category = state
        .category_service
        .update(&current, id, payload.name, payload.description)
        .await?;

    Ok(Json(category.into()))
}

/// Deletes a category no product uses.
///
/// # Endpoint
///
/// `DELETE /api/categories/{id}` (admin)
///
/// # Errors
///
/// Returns 409 with `productsCount` in details while products reference it.
pub async fn delete_category_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.category_service.delete(&current, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
