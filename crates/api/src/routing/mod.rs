//! Host-based routing for the ProjectHub front end
//!
//! This module decides, from the raw Host header, whether a request belongs
//! to the root application or to a tenant workspace, and composes the URLs
//! used to move a client between the two:
//! - Local hostname: acme.localhost:5174
//! - Local loopback IP: acme.127.0.0.1:5174
//! - Production: acme.projecthub.com

mod dispatcher;
mod host_classifier;
mod url_builder;

pub use dispatcher::{base_path, dispatch, View, WORKSPACE_PREFIX};
pub use host_classifier::classify;
pub use url_builder::WorkspaceUrlBuilder;
