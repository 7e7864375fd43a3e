//! Shared application state

use std::sync::Arc;

use crate::config::Config;
use crate::directory::{DirectoryResult, DirectoryService, HttpDirectoryClient};
use crate::routing::WorkspaceUrlBuilder;

/// State handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub url_builder: WorkspaceUrlBuilder,
    pub directory: Arc<dyn DirectoryService>,
}

impl AppState {
    /// Build state with an HTTP client for the configured Directory Service
    pub fn new(config: Config) -> DirectoryResult<Self> {
        let directory = HttpDirectoryClient::new(
            config.directory_api_url.clone(),
            config.directory_request_timeout(),
            config.signup_timeout(),
        )?;
        Ok(Self::with_directory(config, Arc::new(directory)))
    }

    /// Build state around an existing Directory Service implementation
    pub fn with_directory(config: Config, directory: Arc<dyn DirectoryService>) -> Self {
        let url_builder = WorkspaceUrlBuilder::new(config.base_domain.clone());
        Self {
            config: Arc::new(config),
            url_builder,
            directory,
        }
    }
}
