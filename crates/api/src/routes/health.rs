//! Health check endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Subdomain used to probe the Directory Service
const PROBE_SUBDOMAIN: &str = "test";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub directory: String,
}

async fn directory_reachable(state: &AppState) -> bool {
    match state.directory.check_subdomain(PROBE_SUBDOMAIN).await {
        Ok(_) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Directory service probe failed");
            false
        }
    }
}

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let reachable = directory_reachable(&state).await;

    let overall_status = if reachable {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        overall_status,
        Json(HealthResponse {
            status: if reachable { "healthy" } else { "unhealthy" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            directory: if reachable { "reachable" } else { "unreachable" }.to_string(),
        }),
    )
}

/// Liveness probe (just returns 200 if the server is running)
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe (ready once the Directory Service answers)
pub async fn readiness(State(state): State<AppState>) -> ApiResult<StatusCode> {
    if directory_reachable(&state).await {
        Ok(StatusCode::OK)
    } else {
        Err(ApiError::DirectoryUnavailable)
    }
}
