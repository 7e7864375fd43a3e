//! Application configuration

use std::env;
use std::time::Duration;

use url::Url;

use crate::provisioning::FlowSettings;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub bind_address: String,
    pub base_domain: String, // e.g., "projecthub.com" for *.projecthub.com workspaces
    pub default_protocol: String,

    // Directory Service
    pub directory_api_url: Url,
    pub directory_request_timeout_ms: u64,
    pub signup_timeout_ms: u64,

    // Provisioning flow
    pub subdomain_check_debounce_ms: u64,
    pub redirect_delay_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Server
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            base_domain: {
                let domain = env::var("BASE_DOMAIN")
                    .unwrap_or_else(|_| "projecthub.com".to_string())
                    .trim()
                    .to_lowercase();
                if domain.is_empty() || domain.contains("://") || domain.contains('/') {
                    return Err(ConfigError::Invalid(
                        "BASE_DOMAIN must be a bare domain such as projecthub.com",
                    ));
                }
                domain
            },
            default_protocol: {
                let protocol = env::var("DEFAULT_PROTOCOL")
                    .unwrap_or_else(|_| "http".to_string())
                    .to_lowercase();
                if protocol != "http" && protocol != "https" {
                    return Err(ConfigError::Invalid("DEFAULT_PROTOCOL must be http or https"));
                }
                protocol
            },

            // Directory Service
            directory_api_url: {
                let raw = env::var("DIRECTORY_API_URL")
                    .unwrap_or_else(|_| "http://localhost:8000".to_string());
                let url = Url::parse(&raw).map_err(|_| {
                    ConfigError::Invalid("DIRECTORY_API_URL must be an absolute URL")
                })?;
                if url.scheme() != "http" && url.scheme() != "https" {
                    return Err(ConfigError::Invalid("DIRECTORY_API_URL must use http or https"));
                }
                url
            },
            directory_request_timeout_ms: env::var("DIRECTORY_REQUEST_TIMEOUT_MS")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()
                .unwrap_or(10000),
            signup_timeout_ms: env::var("SIGNUP_TIMEOUT_MS")
                .unwrap_or_else(|_| "30000".to_string())
                .parse()
                .unwrap_or(30000),

            // Provisioning flow
            subdomain_check_debounce_ms: env::var("SUBDOMAIN_CHECK_DEBOUNCE_MS")
                .unwrap_or_else(|_| "500".to_string())
                .parse()
                .unwrap_or(500),
            redirect_delay_ms: env::var("REDIRECT_DELAY_MS")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        })
    }

    /// Timing settings handed to each provisioning flow
    pub fn flow_settings(&self) -> FlowSettings {
        FlowSettings {
            debounce: Duration::from_millis(self.subdomain_check_debounce_ms),
            redirect_delay: Duration::from_millis(self.redirect_delay_ms),
        }
    }

    pub fn directory_request_timeout(&self) -> Duration {
        Duration::from_millis(self.directory_request_timeout_ms)
    }

    pub fn signup_timeout(&self) -> Duration {
        Duration::from_millis(self.signup_timeout_ms)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}
