//! Hostname classification.
//!
//! # Responsibilities
//! - Normalize the raw `Host` value (case, port, trailing dot, brackets)
//! - Decide main domain vs. local development vs. tenant subdomain
//!
//! # Design Decisions
//! - Main-domain check runs first, then local development
//! - Anything unrecognized is a tenant subdomain (the common production case)
//! - Allow-lists come from configuration

use std::collections::HashSet;
use std::fmt;
use std::net::IpAddr;

use serde::Serialize;

use crate::config::DomainConfig;

/// What kind of host a request addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HostClassification {
    MainDomain,
    TenantSubdomain,
    LocalDevelopment,
}

impl HostClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostClassification::MainDomain => "main_domain",
            HostClassification::TenantSubdomain => "tenant_subdomain",
            HostClassification::LocalDevelopment => "local_development",
        }
    }
}

impl fmt::Display for HostClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a raw hostname or `Host` header value.
///
/// Lowercases, trims, drops a `:port` suffix, IPv6 brackets and a trailing dot.
pub fn normalize_hostname(raw: &str) -> String {
    let host = raw.trim().to_ascii_lowercase();

    let host = if let Some(rest) = host.strip_prefix('[') {
        // [::1]:8080
        rest.split(']').next().unwrap_or_default().to_string()
    } else if host.matches(':').count() == 1 {
        host.split(':').next().unwrap_or_default().to_string()
    } else {
        host
    };

    host.trim_end_matches('.').to_string()
}

/// Number of dot-separated labels.
pub fn label_count(hostname: &str) -> usize {
    if hostname.is_empty() {
        0
    } else {
        hostname.split('.').count()
    }
}

/// Classifies hostnames against the configured allow-lists.
#[derive(Debug, Clone)]
pub struct HostClassifier {
    main_domains: HashSet<String>,
    local_hosts: HashSet<String>,
    dev_markers: Vec<String>,
}

impl HostClassifier {
    pub fn new<M, L, D>(main_domains: M, local_hosts: L, dev_markers: D) -> Self
    where
        M: IntoIterator,
        M::Item: AsRef<str>,
        L: IntoIterator,
        L::Item: AsRef<str>,
        D: IntoIterator,
        D::Item: AsRef<str>,
    {
        Self {
            main_domains: main_domains
                .into_iter()
                .map(|d| normalize_hostname(d.as_ref()))
                .collect(),
            local_hosts: local_hosts
                .into_iter()
                .map(|h| normalize_hostname(h.as_ref()))
                .collect(),
            dev_markers: dev_markers
                .into_iter()
                .map(|m| m.as_ref().trim().to_ascii_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    pub fn from_config(config: &DomainConfig) -> Self {
        Self::new(&config.main_domains, &config.local_hosts, &config.dev_markers)
    }

    /// Classify a hostname. Never fails.
    pub fn classify(&self, hostname: &str) -> HostClassification {
        let host = normalize_hostname(hostname);

        if self.is_main_domain(&host) {
            HostClassification::MainDomain
        } else if self.is_local(&host) {
            HostClassification::LocalDevelopment
        } else {
            HostClassification::TenantSubdomain
        }
    }

    /// True when the host has more than two labels and is not a main domain.
    pub fn is_tenant_shape(&self, hostname: &str) -> bool {
        let host = normalize_hostname(hostname);
        label_count(&host) > 2 && !self.is_main_domain(&host)
    }

    fn is_main_domain(&self, host: &str) -> bool {
        self.main_domains.contains(host)
    }

    fn is_local(&self, host: &str) -> bool {
        if self.local_hosts.contains(host) {
            return true;
        }
        if let Ok(ip) = host.parse::<IpAddr>() {
            if ip.is_loopback() {
                return true;
            }
        }
        self.dev_markers.iter().any(|marker| host.contains(marker.as_str()))
    }
}

impl Default for HostClassifier {
    fn default() -> Self {
        Self::from_config(&DomainConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> HostClassifier {
        HostClassifier::new(
            ["flowclik.com", "www.flowclik.com"],
            ["localhost", "127.0.0.1"],
            ["manus.computer"],
        )
    }

    #[test]
    fn test_main_domains() {
        let c = classifier();
        assert_eq!(c.classify("flowclik.com"), HostClassification::MainDomain);
        assert_eq!(c.classify("www.flowclik.com"), HostClassification::MainDomain);
        assert_eq!(c.classify("FlowClik.com:443"), HostClassification::MainDomain);
        assert_eq!(c.classify("flowclik.com."), HostClassification::MainDomain);
    }

    #[test]
    fn test_local_development_hosts() {
        let c = classifier();
        assert_eq!(c.classify("localhost"), HostClassification::LocalDevelopment);
        assert_eq!(c.classify("localhost:5173"), HostClassification::LocalDevelopment);
        assert_eq!(c.classify("127.0.0.1"), HostClassification::LocalDevelopment);
        assert_eq!(c.classify("127.0.1.1:3000"), HostClassification::LocalDevelopment);
        assert_eq!(c.classify("[::1]:8080"), HostClassification::LocalDevelopment);
        assert_eq!(
            c.classify("3000-abc123.us1.manus.computer"),
            HostClassification::LocalDevelopment
        );
    }

    #[test]
    fn test_tenant_subdomains() {
        let c = classifier();
        assert_eq!(c.classify("studio.flowclik.com"), HostClassification::TenantSubdomain);
        assert_eq!(c.classify("ana.photos.flowclik.com"), HostClassification::TenantSubdomain);
        assert!(c.is_tenant_shape("studio.flowclik.com"));
        assert!(!c.is_tenant_shape("www.flowclik.com"));
        assert!(!c.is_tenant_shape("example.com"));
    }

    #[test]
    fn test_unknown_input_degrades_to_tenant_subdomain() {
        let c = classifier();
        assert_eq!(c.classify(""), HostClassification::TenantSubdomain);
        assert_eq!(c.classify("example.com"), HostClassification::TenantSubdomain);
    }

    #[test]
    fn test_normalize_hostname() {
        assert_eq!(normalize_hostname("  Studio.FlowClik.com:8443 "), "studio.flowclik.com");
        assert_eq!(normalize_hostname("[::1]:80"), "::1");
        assert_eq!(normalize_hostname("::1"), "::1");
        assert_eq!(normalize_hostname(""), "");
        assert_eq!(label_count("a.b.c"), 3);
        assert_eq!(label_count(""), 0);
    }
}
