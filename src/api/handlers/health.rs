//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Storage**: Probes the configured link repository
/// 2. **Template**: Opens the caption template image
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "storage": { "status": "ok", "message": "Link storage reachable" },
///     "template": { "status": "ok", "message": "Template 800x600" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let storage_check = check_storage(&state).await;
    let template_check = check_template(&state);

    let all_healthy = storage_check.is_ok() && template_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            storage: storage_check,
            template: template_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_storage(state: &AppState) -> CheckStatus {
    match state.link_service.health_check().await {
        Ok(()) => CheckStatus::ok("Link storage reachable"),
        Err(e) => CheckStatus::error(format!("Storage error: {}", e)),
    }
}

fn check_template(state: &AppState) -> CheckStatus {
    match state.compositor.check_template() {
        Ok((width, height)) => CheckStatus::ok(format!("Template {}x{}", width, height)),
        Err(e) => CheckStatus::error(format!(
            "{}: {}",
            e,
            state.compositor.template_path().display()
        )),
    }
}
