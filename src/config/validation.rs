//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate host lists, prefixes and tenant slugs
//! - Detect duplicate tenants
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: TenancyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use crate::config::schema::TenancyConfig;
use crate::tenant::id::{TenantId, TenantIdError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("domains.main_domains must not be empty")]
    NoMainDomains,
    #[error("invalid {field} address '{value}'")]
    InvalidAddress { field: &'static str, value: String },
    #[error("routing.dev_prefix '{0}' must start with '/', must not end with '/' and must not be empty")]
    InvalidDevPrefix(String),
    #[error("theme.excluded_prefixes entry '{0}' must start with '/'")]
    InvalidExcludedPrefix(String),
    #[error("theme.default_accent must not be empty")]
    EmptyDefaultAccent,
    #[error("routing.dev_tenant: {0}")]
    InvalidDevTenant(TenantIdError),
    #[error("tenants[{index}]: {source}")]
    InvalidTenant { index: usize, source: TenantIdError },
    #[error("tenant '{0}' is defined more than once")]
    DuplicateTenant(String),
    #[error("tenant '{0}' uses a reserved subdomain")]
    ReservedTenant(String),
    #[error("admin.api_key must be set when admin is enabled")]
    MissingAdminKey,
    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,
}

pub fn validate_config(config: &TenancyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.domains.main_domains.iter().all(|d| d.trim().is_empty()) {
        errors.push(ValidationError::NoMainDomains);
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let prefix = &config.routing.dev_prefix;
    if prefix.len() < 2 || !prefix.starts_with('/') || prefix.ends_with('/') {
        errors.push(ValidationError::InvalidDevPrefix(prefix.clone()));
    }

    for excluded in &config.theme.excluded_prefixes {
        if !excluded.starts_with('/') {
            errors.push(ValidationError::InvalidExcludedPrefix(excluded.clone()));
        }
    }

    if config.theme.default_accent.trim().is_empty() {
        errors.push(ValidationError::EmptyDefaultAccent);
    }

    if let Some(dev_tenant) = &config.routing.dev_tenant {
        if let Err(e) = TenantId::parse(dev_tenant) {
            errors.push(ValidationError::InvalidDevTenant(e));
        }
    }

    let reserved: HashSet<String> = config
        .routing
        .reserved_subdomains
        .iter()
        .map(|s| s.trim().to_ascii_lowercase())
        .collect();
    let mut seen = HashSet::new();
    for (index, tenant) in config.tenants.iter().enumerate() {
        match TenantId::parse(&tenant.slug) {
            Ok(id) => {
                if reserved.contains(id.as_str()) {
                    errors.push(ValidationError::ReservedTenant(id.to_string()));
                }
                if !seen.insert(id.clone()) {
                    errors.push(ValidationError::DuplicateTenant(id.to_string()));
                }
            }
            Err(source) => errors.push(ValidationError::InvalidTenant { index, source }),
        }
    }

    if config.admin.enabled && config.admin.api_key.trim().is_empty() {
        errors.push(ValidationError::MissingAdminKey);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
