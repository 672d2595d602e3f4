//! DTOs for operational endpoints.

use serde::Serialize;

/// Health check response with component status.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `UP` or `DOWN`.
    pub status: &'static str,
    pub version: &'static str,
    pub components: HealthComponents,
}

#[derive(Debug, Serialize)]
pub struct HealthComponents {
    pub db: ComponentStatus,
}

/// Individual component health status.
#[derive(Debug, Serialize)]
pub struct ComponentStatus {
    pub status: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub app: AppInfo,
}

#[derive(Debug, Serialize)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
}
