//! ProjectHub Front End Library
//!
//! This crate contains the host classification, workspace URL composition,
//! view dispatch and workspace provisioning components for ProjectHub.

pub mod config;
pub mod directory;
pub mod error;
pub mod provisioning;
pub mod routes;
pub mod routing;
pub mod state;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use provisioning::{FlowSettings, ProvisioningFlow};
pub use routing::{classify, dispatch, View, WorkspaceUrlBuilder};
pub use state::AppState;
