use axum::Json;
use contact_relay_core::model::HealthStatus;

/// Liveness probe
#[utoipa::path(
    get,
    operation_id = "health_check",
    path = "/health",
    responses(
        (status = 200, description = "Service is running", body = HealthStatus)
    ),
    tag = "Health"
)]
// SAFETY: `axum` handler must be async
#[allow(clippy::unused_async)]
pub async fn health_check() -> Json<HealthStatus> { Json(HealthStatus::healthy()) }
