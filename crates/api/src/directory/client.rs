//! HTTP client for the Directory Service

use std::time::Duration;

use async_trait::async_trait;
use projecthub_shared::{HubError, SignupRequest, SignupResponse, SubdomainAvailability};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

const CHECK_SUBDOMAIN_PATH: &str = "api/check-subdomain/";
const SIGNUP_PATH: &str = "api/signup/";

/// Error type for Directory Service calls
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Timeout waiting for response")]
    Timeout,

    #[error("Request failed with status code {status}")]
    Rejected { status: u16, body: Value },

    #[error("Invalid response from directory service")]
    InvalidResponse,

    #[error("Invalid directory URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl DirectoryError {
    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DirectoryError::Timeout
        } else {
            DirectoryError::HttpError(err)
        }
    }
}

impl From<DirectoryError> for HubError {
    fn from(err: DirectoryError) -> Self {
        match &err {
            DirectoryError::Rejected { status, body } if (400..500).contains(status) => {
                let message = body
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| err.to_string());
                HubError::Validation(message)
            }
            _ => HubError::Network(err.to_string()),
        }
    }
}

/// Result type for Directory Service calls
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// The two Directory Service operations the front end depends on
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Ask whether `subdomain` can still be claimed
    async fn check_subdomain(&self, subdomain: &str) -> DirectoryResult<SubdomainAvailability>;

    /// Create a tenant workspace
    async fn signup(&self, request: &SignupRequest) -> DirectoryResult<SignupResponse>;
}

/// Directory Service client over HTTP
pub struct HttpDirectoryClient {
    http_client: Client,
    base_url: Url,
    signup_timeout: Duration,
}

impl HttpDirectoryClient {
    /// Create a client for the service at `base_url`.
    ///
    /// `request_timeout` bounds availability checks; `signup_timeout` bounds
    /// workspace creation, which is never retried.
    pub fn new(
        mut base_url: Url,
        request_timeout: Duration,
        signup_timeout: Duration,
    ) -> DirectoryResult<Self> {
        let http_client = Client::builder()
            .timeout(request_timeout)
            .pool_max_idle_per_host(10)
            .build()?;

        // Url::join replaces the last path segment unless the base ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http_client,
            base_url,
            signup_timeout,
        })
    }

    fn endpoint(&self, path: &str) -> DirectoryResult<Url> {
        Ok(self.base_url.join(path)?)
    }
}

#[async_trait]
impl DirectoryService for HttpDirectoryClient {
    async fn check_subdomain(&self, subdomain: &str) -> DirectoryResult<SubdomainAvailability> {
        let response = self
            .http_client
            .get(self.endpoint(CHECK_SUBDOMAIN_PATH)?)
            .query(&[("subdomain", subdomain)])
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(DirectoryError::from_transport)?;

        parse_response(response).await
    }

    async fn signup(&self, request: &SignupRequest) -> DirectoryResult<SignupResponse> {
        let response = self
            .http_client
            .post(self.endpoint(SIGNUP_PATH)?)
            .timeout(self.signup_timeout)
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await
            .map_err(DirectoryError::from_transport)?;

        parse_response(response).await
    }
}

/// Decode a 2xx body as `T`; anything else becomes `Rejected` with the JSON
/// body preserved (`null` when the body is not JSON)
async fn parse_response<T: DeserializeOwned>(response: Response) -> DirectoryResult<T> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(DirectoryError::from_transport)?;

    if !status.is_success() {
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        return Err(DirectoryError::Rejected {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&text).map_err(|e| {
        tracing::warn!(error = %e, "Directory service returned an unparseable body");
        DirectoryError::InvalidResponse
    })
}
