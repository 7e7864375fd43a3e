//! In-memory doubles for the Directory Service and the navigator

#![allow(clippy::unwrap_used)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use projecthub_shared::{SignupData, SignupRequest, SignupResponse, SubdomainAvailability};

use crate::directory::{DirectoryError, DirectoryResult, DirectoryService};
use crate::provisioning::Navigator;

/// Scripted Directory Service that records every call
#[derive(Default)]
pub struct MockDirectory {
    taken: Vec<String>,
    delays: HashMap<String, Duration>,
    fail_checks: bool,
    signup_delay: Option<Duration>,
    check_calls: Mutex<Vec<String>>,
    signup_responses: Mutex<VecDeque<DirectoryResult<SignupResponse>>>,
    signup_calls: Mutex<Vec<SignupRequest>>,
}

impl MockDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_taken(mut self, subdomain: &str) -> Self {
        self.taken.push(subdomain.to_string());
        self
    }

    /// Delay the availability answer for `subdomain`
    pub fn with_delay(mut self, subdomain: &str, delay: Duration) -> Self {
        self.delays.insert(subdomain.to_string(), delay);
        self
    }

    /// Delay every signup answer
    pub fn with_signup_delay(mut self, delay: Duration) -> Self {
        self.signup_delay = Some(delay);
        self
    }

    pub fn failing_checks(mut self) -> Self {
        self.fail_checks = true;
        self
    }

    pub fn push_signup(&self, response: DirectoryResult<SignupResponse>) {
        self.signup_responses.lock().unwrap().push_back(response);
    }

    pub fn push_signup_success(&self, company_name: &str, workspace_url: &str) {
        self.push_signup(Ok(SignupResponse {
            success: true,
            message: Some("Workspace created successfully!".into()),
            data: Some(SignupData {
                company_name: company_name.into(),
                workspace_url: workspace_url.into(),
                subdomain: None,
                admin_email: None,
                admin_name: None,
            }),
        }));
    }

    pub fn check_calls(&self) -> Vec<String> {
        self.check_calls.lock().unwrap().clone()
    }

    pub fn signup_calls(&self) -> Vec<SignupRequest> {
        self.signup_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DirectoryService for MockDirectory {
    async fn check_subdomain(&self, subdomain: &str) -> DirectoryResult<SubdomainAvailability> {
        self.check_calls.lock().unwrap().push(subdomain.to_string());

        if let Some(delay) = self.delays.get(subdomain) {
            tokio::time::sleep(*delay).await;
        }

        if self.fail_checks {
            return Err(DirectoryError::Timeout);
        }

        Ok(SubdomainAvailability {
            available: !self.taken.iter().any(|t| t == subdomain),
            subdomain: Some(subdomain.to_string()),
            message: None,
        })
    }

    async fn signup(&self, request: &SignupRequest) -> DirectoryResult<SignupResponse> {
        self.signup_calls.lock().unwrap().push(request.clone());

        if let Some(delay) = self.signup_delay {
            tokio::time::sleep(delay).await;
        }

        self.signup_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(DirectoryError::InvalidResponse))
    }
}

/// Navigator that remembers where it was sent
#[derive(Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) {
        self.visits.lock().unwrap().push(url.to_string());
    }
}
