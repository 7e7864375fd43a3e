//! View selection over a host verdict
//!
//! `/login` and `/signup` resolve the same on every host. The workspace view
//! set is addressable two ways, and both must land on the same view:
//! - the path root (and any path) on a tenant host: acme.projecthub.com/projects
//! - the `/dashboard` prefix on any host: projecthub.com/dashboard/projects

use projecthub_shared::HostVerdict;
use serde::Serialize;

/// Path prefix under which the workspace view set is mounted on a root host
pub const WORKSPACE_PREFIX: &str = "/dashboard";

/// Top-level view chosen for a navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum View {
    /// Root marketing page
    Home,
    Login,
    Signup,
    /// Tenant-scoped view set. `section` is the path inside the workspace;
    /// `base_path` prefixes every link inside it (empty on a tenant host,
    /// `/dashboard` on a root host).
    Workspace {
        tenant: Option<String>,
        section: String,
        base_path: &'static str,
    },
}

/// Select the view for `path` given the verdict computed for this navigation.
///
/// Returns `None` when the path has no view on this kind of host.
pub fn dispatch(path: &str, verdict: &HostVerdict) -> Option<View> {
    let path = normalize_path(path);

    match path.as_str() {
        "/login" => return Some(View::Login),
        "/signup" => return Some(View::Signup),
        _ => {}
    }

    if let Some(section) = strip_workspace_prefix(&path) {
        return Some(workspace(verdict, section));
    }

    match verdict {
        HostVerdict::Tenant(_) => Some(workspace(verdict, &path)),
        HostVerdict::Root if path == "/" => Some(View::Home),
        HostVerdict::Root => None,
    }
}

fn workspace(verdict: &HostVerdict, section: &str) -> View {
    View::Workspace {
        tenant: verdict.tenant_name().map(str::to_string),
        section: section.to_string(),
        base_path: base_path(verdict),
    }
}

/// Prefix for links inside the workspace view set on this kind of host
pub fn base_path(verdict: &HostVerdict) -> &'static str {
    if verdict.is_tenant() {
        ""
    } else {
        WORKSPACE_PREFIX
    }
}

/// `/dashboard` -> `/`, `/dashboard/projects` -> `/projects`, `/dashboards` -> None
fn strip_workspace_prefix(path: &str) -> Option<&str> {
    let rest = path.strip_prefix(WORKSPACE_PREFIX)?;
    if rest.is_empty() {
        Some("/")
    } else if rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

/// Drop the query string and trailing slashes; keep a leading slash
fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
