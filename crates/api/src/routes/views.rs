//! View selection for page navigations

use axum::{extract::Host, http::Uri, Json};

use crate::error::{ApiError, ApiResult};
use crate::routing::{classify, dispatch, View};

/// Classify the host once for this navigation and pick the view for the path
pub async fn render(Host(host): Host, uri: Uri) -> ApiResult<Json<View>> {
    let verdict = classify(&host);
    let view = dispatch(uri.path(), &verdict).ok_or(ApiError::NotFound)?;

    tracing::debug!(host = %host, path = %uri.path(), ?verdict, ?view, "View selected");
    Ok(Json(view))
}
