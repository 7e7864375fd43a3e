//! Directory Service request and response bodies

use serde::{Deserialize, Serialize};

use crate::types::{ProvisioningResult, WorkspaceForm};

/// Response of `GET /api/check-subdomain/?subdomain=<value>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubdomainAvailability {
    pub available: bool,
    #[serde(default)]
    pub subdomain: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /api/signup/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub subdomain: String,
    pub company_name: String,
    pub admin_name: String,
    pub admin_email: String,
}

impl From<&WorkspaceForm> for SignupRequest {
    fn from(form: &WorkspaceForm) -> Self {
        Self {
            subdomain: form.subdomain.normalized.clone(),
            company_name: form.company_name.trim().to_string(),
            admin_name: form.admin_name.trim().to_string(),
            admin_email: form.admin_email.trim().to_string(),
        }
    }
}

/// Successful (2xx) body of `POST /api/signup/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<SignupData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupData {
    pub company_name: String,
    pub workspace_url: String,
    #[serde(default)]
    pub subdomain: Option<String>,
    #[serde(default)]
    pub admin_email: Option<String>,
    #[serde(default)]
    pub admin_name: Option<String>,
}

impl From<SignupData> for ProvisioningResult {
    fn from(data: SignupData) -> Self {
        Self {
            company_name: data.company_name,
            workspace_url: data.workspace_url,
        }
    }
}
