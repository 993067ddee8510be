//! Tenant lookup from the addressed host.

use std::collections::HashSet;

use crate::config::RoutingConfig;
use crate::routing::classifier::{label_count, normalize_hostname, HostClassification};
use crate::tenant::id::TenantId;

/// Derives the tenant a request belongs to.
#[derive(Debug, Clone, Default)]
pub struct TenantResolver {
    dev_tenant: Option<TenantId>,
    reserved: HashSet<String>,
}

impl TenantResolver {
    pub fn new<R>(dev_tenant: Option<TenantId>, reserved: R) -> Self
    where
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        Self {
            dev_tenant,
            reserved: reserved
                .into_iter()
                .map(|label| label.as_ref().trim().to_ascii_lowercase())
                .collect(),
        }
    }

    /// An invalid `dev_tenant` is dropped with a warning; validation
    /// reports it before this point.
    pub fn from_config(config: &RoutingConfig) -> Self {
        let dev_tenant = config.dev_tenant.as_deref().and_then(|slug| {
            TenantId::parse(slug)
                .map_err(|e| tracing::warn!(slug = %slug, error = %e, "Ignoring dev tenant"))
                .ok()
        });
        Self::new(dev_tenant, &config.reserved_subdomains)
    }

    pub fn resolve(&self, hostname: &str, classification: HostClassification) -> Option<TenantId> {
        match classification {
            HostClassification::MainDomain => None,
            HostClassification::LocalDevelopment => self.dev_tenant.clone(),
            HostClassification::TenantSubdomain => {
                let host = normalize_hostname(hostname);
                if label_count(&host) <= 2 {
                    return None;
                }
                let label = host.split('.').next()?;
                if self.reserved.contains(label) {
                    return None;
                }
                TenantId::parse(label).ok()
            }
        }
    }
}
