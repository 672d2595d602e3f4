//! Handlers for registration, login and the current account.

use axum::{Extension, Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use validator::Validate;

use crate::api::dto::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::api::dto::user::UserResponse;
use crate::domain::principal::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account and returns a token for it.
///
/// # Endpoint
///
/// `POST /api/auth/register`
///
/// # Request Body
///
/// ```json
/// { "name": "Ada Lovelace", "email": "ada@example.com", "password": "secret1" }
/// ```
///
/// # Errors
///
/// - 400 if validation fails or the default role is missing
/// - 409 if the email is already registered
pub async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let session = state
        .auth_service
        .register(payload.name, payload.email, payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(session.into())))
}

/// Exchanges credentials for a token.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// # Errors
///
/// Returns 401 with `Invalid email or password` for an unknown email and for a
/// wrong password alike.
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let session = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(session.into()))
}

/// Returns the authenticated account.
///
/// # Endpoint
///
/// `GET /api/auth/me`
pub async fn me_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.auth_service.me(&current).await?;
    Ok(Json(user.into()))
}
