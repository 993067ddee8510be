//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the tenancy
//! service. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::route_base::DEFAULT_DEV_PREFIX;
use crate::theme::applier::DEFAULT_ACCENT;
use crate::theme::config::ThemeConfig;

/// Root configuration for the tenancy service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TenancyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Host allow-lists used for classification.
    pub domains: DomainConfig,

    /// Route prefix and tenant lookup settings.
    pub routing: RoutingConfig,

    /// Theme defaults and excluded paths.
    pub theme: ThemeSettings,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    pub admin: AdminConfig,

    /// Tenant theme records.
    pub tenants: Vec<TenantConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Host allow-lists.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DomainConfig {
    /// Platform marketing hostnames (exact match).
    pub main_domains: Vec<String>,

    /// Hostnames always treated as local development (exact match).
    pub local_hosts: Vec<String>,

    /// Substrings identifying hosted development environments.
    pub dev_markers: Vec<String>,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            main_domains: vec!["flowclik.com".to_string(), "www.flowclik.com".to_string()],
            local_hosts: vec![
                "localhost".to_string(),
                "127.0.0.1".to_string(),
                "::1".to_string(),
            ],
            dev_markers: vec!["manus.computer".to_string(), "manusvm.computer".to_string()],
        }
    }
}

/// Route prefix and tenant lookup settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Prefix for tenant routes on development hosts.
    pub dev_prefix: String,

    /// Tenant served on development hosts.
    pub dev_tenant: Option<String>,

    /// Subdomain labels that never name a tenant.
    pub reserved_subdomains: Vec<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            dev_prefix: DEFAULT_DEV_PREFIX.to_string(),
            dev_tenant: None,
            reserved_subdomains: ["www", "api", "admin", "app"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Theme defaults and excluded paths.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeSettings {
    /// Accent used when a tenant has none.
    pub default_accent: String,

    /// Path prefixes that never receive tenant theming.
    pub excluded_prefixes: Vec<String>,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            default_accent: DEFAULT_ACCENT.to_string(),
            excluded_prefixes: [
                "/admin", "/system", "/client", "/login", "/register", "/signup", "/docs",
                "/terms", "/privacy",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 10,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Admin API configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AdminConfig {
    /// Enable admin endpoints.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,
}

/// One tenant's theme record.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TenantConfig {
    /// Subdomain label identifying the tenant.
    pub slug: String,

    #[serde(flatten)]
    pub theme: ThemeConfig,

    /// Tenant is still being provisioned; its theme reports as loading.
    #[serde(default)]
    pub pending: bool,
}
