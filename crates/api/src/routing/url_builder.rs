//! Workspace URL composition
//!
//! Local hosts are rebased: any tenant label on the current host is dropped
//! and the requested subdomain is prefixed, keeping the port. Production URLs
//! are always built on the configured base domain, never on the current host,
//! so an already-tenant host cannot leak into the result.

use projecthub_shared::{normalize_subdomain, Environment};

/// Builds the URLs that move a client onto (or off) a tenant subdomain
#[derive(Debug, Clone)]
pub struct WorkspaceUrlBuilder {
    base_domain: String,
}

impl WorkspaceUrlBuilder {
    /// Create a builder for the given production base domain
    pub fn new(base_domain: impl Into<String>) -> Self {
        Self {
            base_domain: base_domain.into().trim().to_lowercase(),
        }
    }

    /// URL of `subdomain`'s workspace as seen from `current_host`.
    ///
    /// `protocol` accepts `http`, `http:` or `http://` forms; anything other
    /// than http or https is treated as http. The subdomain is
    /// normalized first, so it can never contribute more than one label; an
    /// empty subdomain yields the root URL.
    pub fn build(&self, subdomain: &str, current_host: &str, protocol: &str) -> String {
        let subdomain = normalize_subdomain(subdomain);
        let root = self.root_host(current_host);

        if subdomain.is_empty() {
            return format!("{}://{}", scheme(protocol), root);
        }
        format!("{}://{}.{}", scheme(protocol), subdomain, root)
    }

    /// URL of the bare root host, used to leave a workspace
    pub fn root_url(&self, current_host: &str, protocol: &str) -> String {
        format!("{}://{}", scheme(protocol), self.root_host(current_host))
    }

    /// The host with every tenant label removed
    fn root_host(&self, current_host: &str) -> String {
        let host = current_host.trim().trim_end_matches('.').to_lowercase();
        let environment = Environment::detect(&host);

        if !environment.is_local() {
            return self.base_domain.clone();
        }

        let segments: Vec<&str> = host.split('.').collect();
        let keep = environment.root_segment_count();
        if segments.len() <= keep {
            return host;
        }
        segments[segments.len() - keep..].join(".")
    }
}

fn scheme(protocol: &str) -> String {
    let scheme = protocol
        .trim()
        .trim_end_matches('/')
        .trim_end_matches(':')
        .to_lowercase();
    match scheme.as_str() {
        "http" | "https" => scheme,
        _ => "http".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::classify;
    use projecthub_shared::HostVerdict;

    fn builder() -> WorkspaceUrlBuilder {
        WorkspaceUrlBuilder::new("projecthub.com")
    }

    #[test]
    fn test_scheme_forms() {
        assert_eq!(scheme("http"), "http");
        assert_eq!(scheme("https:"), "https");
        assert_eq!(scheme("HTTPS://"), "https");
        assert_eq!(scheme(""), "http");
        assert_eq!(scheme("javascript"), "http");
        assert_eq!(scheme("ftp://"), "http");
    }

    #[test]
    fn test_build_from_local_root() {
        let b = builder();
        assert_eq!(b.build("acme", "localhost:5174", "http:"), "http://acme.localhost:5174");
        assert_eq!(b.build("acme", "127.0.0.1:5174", "http"), "http://acme.127.0.0.1:5174");
    }

    #[test]
    fn test_build_rebases_local_tenant_host() {
        let b = builder();
        assert_eq!(b.build("acme", "globex.localhost:5174", "http"), "http://acme.localhost:5174");
        assert_eq!(b.build("acme", "globex.127.0.0.1:5174", "http"), "http://acme.127.0.0.1:5174");
        assert_eq!(b.build("acme", "a.b.localhost:5174", "http"), "http://acme.localhost:5174");
    }

    #[test]
    fn test_build_production_uses_base_domain() {
        let b = builder();
        assert_eq!(b.build("acme", "projecthub.com", "https:"), "https://acme.projecthub.com");
        assert_eq!(b.build("acme", "globex.projecthub.com", "https"), "https://acme.projecthub.com");
        assert_eq!(b.build("acme", "", "https"), "https://acme.projecthub.com");
    }

    #[test]
    fn test_build_never_yields_two_tenant_labels() {
        let b = builder();
        for host in [
            "localhost:5174",
            "x.localhost:5174",
            "127.0.0.1:5174",
            "x.127.0.0.1:5174",
            "projecthub.com",
            "x.projecthub.com",
        ] {
            let url = b.build("a.b", host, "http");
            let target = url.trim_start_matches("http://");
            assert_eq!(classify(target), HostVerdict::Tenant("ab".to_string()), "{host}");
            assert!(!target.starts_with("ab.x."), "{url}");
        }
    }

    #[test]
    fn test_root_url() {
        let b = builder();
        assert_eq!(b.root_url("acme.localhost:5174", "http"), "http://localhost:5174");
        assert_eq!(b.root_url("acme.127.0.0.1:5174", "http"), "http://127.0.0.1:5174");
        assert_eq!(b.root_url("acme.projecthub.com", "https"), "https://projecthub.com");
        assert_eq!(b.build("", "acme.localhost:5174", "http"), "http://localhost:5174");
    }
}
