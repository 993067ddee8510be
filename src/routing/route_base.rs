//! Route base resolution.
//!
//! Tenant-site routes live at the path root on production hosts and under a
//! fixed prefix (`/site` by default) on local development hosts, where the
//! root belongs to the landing page.

use std::fmt;

use serde::Serialize;

use crate::routing::classifier::HostClassification;

/// Default prefix for tenant routes on development hosts.
pub const DEFAULT_DEV_PREFIX: &str = "/site";

/// Path prefix for tenant-site routes. Empty means root-relative.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct RouteBase(String);

impl RouteBase {
    pub fn root() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RouteBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps classifications to route bases and builds tenant URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteBaseResolver {
    dev_prefix: RouteBase,
}

impl RouteBaseResolver {
    /// `dev_prefix` is expected to be validated: leading `/`, no trailing `/`.
    pub fn new(dev_prefix: impl Into<String>) -> Self {
        Self {
            dev_prefix: RouteBase(dev_prefix.into()),
        }
    }

    pub fn base_for(&self, classification: HostClassification) -> RouteBase {
        match classification {
            HostClassification::LocalDevelopment => self.dev_prefix.clone(),
            HostClassification::TenantSubdomain | HostClassification::MainDomain => RouteBase::root(),
        }
    }

    /// Build the URL for a tenant-relative `path`.
    ///
    /// Leading separators are stripped first so `"/services"` and
    /// `"services"` produce the same URL.
    pub fn build_url(&self, path: &str, classification: HostClassification) -> String {
        let base = self.base_for(classification);
        let stripped = path.trim_start_matches('/');

        match (stripped.is_empty(), base.is_root()) {
            (true, true) => "/".to_string(),
            (true, false) => base.0,
            (false, true) => format!("/{}", stripped),
            (false, false) => format!("{}/{}", base.0, stripped),
        }
    }

    /// Inverse of [`build_url`](Self::build_url): the tenant-relative path, or
    /// `None` when `path` is not under the base.
    pub fn strip_base<'a>(&self, path: &'a str, classification: HostClassification) -> Option<&'a str> {
        let base = self.base_for(classification);
        if base.is_root() {
            return Some(if path.is_empty() { "/" } else { path });
        }

        let rest = path.strip_prefix(base.as_str())?;
        if rest.is_empty() {
            Some("/")
        } else if rest.starts_with('/') || rest.starts_with('?') {
            Some(rest)
        } else {
            None
        }
    }
}

impl Default for RouteBaseResolver {
    fn default() -> Self {
        Self::new(DEFAULT_DEV_PREFIX)
    }
}
