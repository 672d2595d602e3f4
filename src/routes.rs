//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /actuator/health` - Health check with database status (public)
//! - `GET  /actuator/info`   - Build information (public)
//! - `/api/auth/register`, `/api/auth/login` - Credentials (public, rate limited)
//! - `/api/*`                - REST API (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on credential endpoints
//! - **Authentication** - JWT Bearer token
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, info_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// The rate limiter keys on the peer address, so the router must be served
/// with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = Router::new()
        .merge(api::routes::public_routes().layer(rate_limit::auth_layer()))
        .merge(
            api::routes::protected_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
        );

    let router = Router::new()
        .route("/actuator/health", get(health_handler))
        .route("/actuator/info", get(info_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
