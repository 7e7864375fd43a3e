//! Login and logout redirects

use axum::{
    extract::{Host, State},
    http::HeaderMap,
    response::Redirect,
    Form,
};
use projecthub_shared::{normalize_subdomain, validate_subdomain};
use serde::Deserialize;

use super::request_protocol;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub subdomain: String,
}

/// Send the browser to the workspace host for the submitted subdomain
pub async fn login(
    State(state): State<AppState>,
    Host(host): Host,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> ApiResult<Redirect> {
    let subdomain = normalize_subdomain(&form.subdomain);
    if subdomain.is_empty() {
        return Err(ApiError::Validation(
            "Please enter your workspace subdomain".to_string(),
        ));
    }
    validate_subdomain(&subdomain)?;

    let protocol = request_protocol(&headers, &state.config.default_protocol);
    let target = state.url_builder.build(&subdomain, &host, &protocol);

    tracing::info!(subdomain = %subdomain, target = %target, "Redirecting login to workspace");
    Ok(Redirect::to(&target))
}

/// Send the browser back to the bare root host
pub async fn logout(
    State(state): State<AppState>,
    Host(host): Host,
    headers: HeaderMap,
) -> Redirect {
    let protocol = request_protocol(&headers, &state.config.default_protocol);
    Redirect::to(&state.url_builder.root_url(&host, &protocol))
}
