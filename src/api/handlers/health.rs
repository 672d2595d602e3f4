//! Handlers for operational endpoints.

use std::time::Duration;

use axum::{Json, extract::State, http::StatusCode};
use sqlx::PgPool;

use crate::api::dto::health::{
    AppInfo, ComponentStatus, HealthComponents, HealthResponse, InfoResponse,
};
use crate::state::AppState;

/// Upper bound on the database probe, well under the pool's acquire timeout.
const DB_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /actuator/health`
///
/// # Response Codes
///
/// - **200 OK**: All components up
/// - **503 Service Unavailable**: The database is unreachable
///
/// # Response
///
/// ```json
/// {
///   "status": "UP",
///   "version": "0.1.0",
///   "components": { "db": { "status": "UP" } }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db = check_database(&state.pool, DB_CHECK_TIMEOUT).await;
    let up = db.status == "UP";

    let response = HealthResponse {
        status: if up { "UP" } else { "DOWN" },
        version: env!("CARGO_PKG_VERSION"),
        components: HealthComponents { db },
    };

    let status = if up {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

/// Checks database connectivity with a trivial query bounded by `limit`.
async fn check_database(pool: &PgPool, limit: Duration) -> ComponentStatus {
    let probe = sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool);

    match tokio::time::timeout(limit, probe).await {
        Ok(Ok(_)) => ComponentStatus {
            status: "UP",
            details: None,
        },
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Health check: database unreachable");
            ComponentStatus {
                status: "DOWN",
                details: Some(format!("Database error: {}", e)),
            }
        }
        Err(_) => {
            tracing::error!(
                timeout_ms = limit.as_millis() as u64,
                "Health check: database timed out"
            );
            ComponentStatus {
                status: "DOWN",
                details: Some(format!(
                    "Database did not respond within {}ms",
                    limit.as_millis()
                )),
            }
        }
    }
}

/// Static build information.
///
/// # Endpoint
///
/// `GET /actuator/info`
pub async fn info_handler() -> Json<InfoResponse> {
    Json(InfoResponse {
        app: AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
        },
    })
}
