//! Handlers for user administration.

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::product::ProductResponse;
use crate::api::dto::user::{
    CreateUserRequest, UpdateRolesRequest, UpdateUserRequest, UserResponse,
};
use crate::domain::principal::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Lists all users.
///
/// # Endpoint
///
/// `GET /api/users` (admin)
pub async fn list_users_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.user_service.list(&current).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Creates a user with explicit roles.
///
/// # Endpoint
///
/// `POST /api/users` (admin)
///
/// # Request Body
///
/// ```json
/// { "name": "Grace", "email": "grace@example.com", "password": "secret1", "roles": ["ROLE_MODERATOR"] }
/// ```
pub async fn create_user_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let user = state
        .user_service
        .create(
            &current,
            payload.name,
            payload.email,
            payload.password,
            payload.roles,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// # Endpoint
///
/// `GET /api/users/{id}` (self or admin)
pub async fn get_user_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.user_service.get(&current, id).await?;
    Ok(Json(user.into()))
}

/// Partially updates name, email or password.
///
/// # Endpoint
///
/// `PATCH /api/users/{id}` (self or admin)
pub async fn update_user_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let user = state
        .user_service
        .update(&current, id, payload.name, payload.email, payload.password)
        .await?;

    Ok(Json(user.into()))
}

/// Deletes a user together with their products.
///
/// # Endpoint
///
/// `DELETE /api/users/{id}` (admin)
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.user_service.delete(&current, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Replaces the roles of a user.
///
/// # Endpoint
///
/// `PUT /api/users/{id}/roles` (admin)
///
/// # Request Body
///
/// ```json
/// { "roles": ["ROLE_USER", "ROLE_MODERATOR"] }
/// ```
pub async fn update_roles_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateRolesRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let user = state
        .user_service
        .set_roles(&current, id, payload.roles)
        .await?;

    Ok(Json(user.into()))
}

/// Lists every product owned by a user.
///
/// # Endpoint
///
/// `GET /api/users/{id}/products`
pub async fn user_products_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state.product_service.list_by_owner(id).await?;
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}
