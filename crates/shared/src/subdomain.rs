//! Subdomain normalization and validation
//!
//! Normalization runs on every keystroke and is lossy: anything outside
//! `[a-z0-9-]` is dropped after lowercasing. Validation mirrors the rules the
//! Directory Service applies when a workspace is created.

use crate::error::{HubError, HubResult};

/// Shortest subdomain the Directory Service will accept (and the availability
/// checker will probe)
pub const MIN_SUBDOMAIN_LEN: usize = 3;

/// Longest subdomain label allowed by DNS
pub const MAX_SUBDOMAIN_LEN: usize = 63;

/// Subdomains that can never be claimed by a tenant
pub const RESERVED_SUBDOMAINS: &[&str] = &[
    "www",
    "api",
    "admin",
    "mail",
    "ftp",
    "localhost",
    "public",
    "test",
    "demo",
];

/// Lowercase `raw` and strip every character outside `[a-z0-9-]`.
///
/// Idempotent: normalizing an already-normalized value returns it unchanged.
pub fn normalize_subdomain(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

/// Check a normalized subdomain against the workspace naming rules
pub fn validate_subdomain(value: &str) -> HubResult<()> {
    let starts_with_letter = value
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_lowercase());
    let allowed_chars = value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if !starts_with_letter || !allowed_chars {
        return Err(HubError::Validation(
            "Subdomain must start with a letter and contain only lowercase letters, numbers, and hyphens"
                .to_string(),
        ));
    }

    if value.len() < MIN_SUBDOMAIN_LEN {
        return Err(HubError::Validation(format!(
            "Subdomain must be at least {} characters long",
            MIN_SUBDOMAIN_LEN
        )));
    }

    if value.len() > MAX_SUBDOMAIN_LEN {
        return Err(HubError::Validation(format!(
            "Subdomain must be at most {} characters long",
            MAX_SUBDOMAIN_LEN
        )));
    }

    if RESERVED_SUBDOMAINS.contains(&value) {
        return Err(HubError::Validation(format!(
            "The subdomain '{}' is reserved",
            value
        )));
    }

    Ok(())
}
