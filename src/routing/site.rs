//! Site variant selection.
//!
//! Decides which component tree renders for a path. The main domain always
//! serves the landing site, tenant subdomains always serve the tenant site,
//! and development hosts split on the route base.

use serde::Serialize;

use crate::routing::classifier::HostClassification;
use crate::routing::route_base::RouteBaseResolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteVariant {
    Landing,
    TenantSite,
}

impl SiteVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteVariant::Landing => "landing",
            SiteVariant::TenantSite => "tenant_site",
        }
    }
}

pub fn resolve_site(
    bases: &RouteBaseResolver,
    classification: HostClassification,
    path: &str,
) -> SiteVariant {
    match classification {
        HostClassification::MainDomain => SiteVariant::Landing,
        HostClassification::TenantSubdomain => SiteVariant::TenantSite,
        HostClassification::LocalDevelopment => match bases.strip_base(path, classification) {
            Some(_) => SiteVariant::TenantSite,
            None => SiteVariant::Landing,
        },
    }
}
