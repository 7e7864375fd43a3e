//! Error types for ProjectHub

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HubError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Result type alias for shared operations
pub type HubResult<T> = Result<T, HubError>;
