//! Host classification
//!
//! Splits the host (port included) on `.` and compares the segment count with
//! the number of segments a bare host has in the detected environment:
//! - localhost:5174 -> ["localhost:5174"] (1)
//! - 127.0.0.1:5174 -> ["127", "0", "0", "1:5174"] (4)
//! - projecthub.com -> ["projecthub", "com"] (2)
//!
//! Anything longer carries a tenant label, and the first segment names it.
//! Deeper hosts such as a.b.projecthub.com are not disambiguated further.

use projecthub_shared::{Environment, HostVerdict};

/// Classify a raw host (e.g. `acme.localhost:5174`) as root or tenant
pub fn classify(host: &str) -> HostVerdict {
    let host = normalize_host(host);
    if host.is_empty() {
        return HostVerdict::Root;
    }

    let environment = Environment::detect(&host);
    let segments: Vec<&str> = host.split('.').collect();

    if segments.len() <= environment.root_segment_count() {
        return HostVerdict::Root;
    }

    match segments.first() {
        Some(label) if !label.is_empty() => HostVerdict::Tenant((*label).to_string()),
        _ => HostVerdict::Root,
    }
}

/// Normalize a host header value. The port is kept: the loopback segment
/// counts above rely on it being fused with the last octet.
fn normalize_host(host: &str) -> String {
    host.trim().trim_end_matches('.').to_lowercase()
}
