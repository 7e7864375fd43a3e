//! HTTP routes

pub mod health;
pub mod session;
pub mod views;

use axum::{
    http::HeaderMap,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Scheme the client used, as reported by a fronting proxy.
/// Falls back to `default` when `X-Forwarded-Proto` is absent or is neither
/// http nor https.
pub fn request_protocol(headers: &HeaderMap, default: &str) -> String {
    headers
        .get("x-forwarded-proto")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.split(',').next().unwrap_or(s).trim().to_lowercase())
        .filter(|s| s == "http" || s == "https")
        .unwrap_or_else(|| default.to_string())
}

/// Create all routes
pub fn create_router(state: AppState) -> Router {
    // Health check routes (at root level for infrastructure monitoring)
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    let session_routes = Router::new()
        .route("/login", get(views::render).post(session::login))
        .route("/logout", post(session::logout));

    // Every other navigation goes through host classification
    let view_routes = Router::new()
        .route("/", get(views::render))
        .route("/signup", get(views::render))
        .fallback(views::render);

    Router::new()
        .merge(health_routes)
        .merge(session_routes)
        .merge(view_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
