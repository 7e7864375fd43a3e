//! Common types used across ProjectHub

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::subdomain::{normalize_subdomain, MIN_SUBDOMAIN_LEN};

// =============================================================================
// Host Classification
// =============================================================================

/// Deployment environment, derived from the raw host on every classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// `localhost:<port>` and `<tenant>.localhost:<port>`
    LocalHostname,
    /// `127.0.0.1:<port>` and `<tenant>.127.0.0.1:<port>`
    LocalLoopbackIp,
    /// A DNS domain such as `projecthub.com`
    Production,
}

impl Environment {
    /// Detect the environment a host string belongs to
    pub fn detect(host: &str) -> Self {
        if host.contains("localhost") {
            Self::LocalHostname
        } else if host.contains("127.0.0.1") {
            Self::LocalLoopbackIp
        } else {
            Self::Production
        }
    }

    /// Number of dot-separated segments a bare (root) host has in this
    /// environment. A host with more segments carries a tenant label.
    pub fn root_segment_count(&self) -> usize {
        match self {
            // ["localhost:5174"]
            Self::LocalHostname => 1,
            // ["127", "0", "0", "1:5174"]
            Self::LocalLoopbackIp => 4,
            // ["projecthub", "com"]
            Self::Production => 2,
        }
    }

    pub fn is_local(&self) -> bool {
        !matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LocalHostname => write!(f, "local_hostname"),
            Self::LocalLoopbackIp => write!(f, "local_loopback_ip"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Whether a request belongs to the root application or to a tenant.
///
/// Recomputed per request and never cached: the host can change between
/// navigations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "tenant_name", rename_all = "lowercase")]
pub enum HostVerdict {
    Root,
    Tenant(String),
}

impl HostVerdict {
    pub fn is_tenant(&self) -> bool {
        matches!(self, Self::Tenant(_))
    }

    pub fn tenant_name(&self) -> Option<&str> {
        match self {
            Self::Root => None,
            Self::Tenant(name) => Some(name),
        }
    }
}

// =============================================================================
// Subdomain Candidate
// =============================================================================

/// Availability status of the subdomain being entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubdomainStatus {
    #[default]
    Unchecked,
    Checking,
    Available,
    Taken,
    /// Part of the status vocabulary for renderers; the availability checker
    /// downgrades failed checks to `Unchecked` instead of setting this.
    CheckFailed,
}

impl SubdomainStatus {
    /// A submission may not be sent while the status is one of these
    pub fn blocks_submission(&self) -> bool {
        matches!(self, Self::Checking | Self::Taken)
    }
}

impl std::fmt::Display for SubdomainStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unchecked => write!(f, "unchecked"),
            Self::Checking => write!(f, "checking"),
            Self::Available => write!(f, "available"),
            Self::Taken => write!(f, "taken"),
            Self::CheckFailed => write!(f, "check_failed"),
        }
    }
}

/// The subdomain as typed, as normalized, and its last known availability
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubdomainCandidate {
    pub raw: String,
    pub normalized: String,
    pub status: SubdomainStatus,
}

impl SubdomainCandidate {
    /// Build an unchecked candidate from user input
    pub fn from_input(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = normalize_subdomain(&raw);
        Self {
            raw,
            normalized,
            status: SubdomainStatus::Unchecked,
        }
    }

    /// Whether the normalized value is long enough to be worth probing
    pub fn is_checkable(&self) -> bool {
        self.normalized.len() >= MIN_SUBDOMAIN_LEN
    }
}

// =============================================================================
// Workspace Form
// =============================================================================

/// Per-field validation messages, keyed by wire field name
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Snapshot of the signup form
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkspaceForm {
    pub subdomain: SubdomainCandidate,
    pub company_name: String,
    pub admin_name: String,
    pub admin_email: String,
    #[serde(default)]
    pub field_errors: FieldErrors,
    #[serde(default)]
    pub general_error: Option<String>,
}

impl WorkspaceForm {
    /// Names of required fields that are still empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.subdomain.normalized.is_empty() {
            missing.push("subdomain");
        }
        if self.company_name.trim().is_empty() {
            missing.push("company_name");
        }
        if self.admin_name.trim().is_empty() {
            missing.push("admin_name");
        }
        if self.admin_email.trim().is_empty() {
            missing.push("admin_email");
        }
        missing
    }

    pub fn has_errors(&self) -> bool {
        !self.field_errors.is_empty() || self.general_error.is_some()
    }

    pub fn clear_errors(&mut self) {
        self.field_errors.clear();
        self.general_error = None;
    }
}

/// Outcome of a successful workspace creation. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisioningResult {
    pub company_name: String,
    pub workspace_url: String,
}
