//! Request resolution.
//!
//! # Responsibilities
//! - Compile a `TenancyConfig` into classifier, route base, exclusions and
//!   theme store
//! - Resolve `(hostname, path)` into a complete `Resolution`
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Replaced wholesale on config reload
//! - Deterministic: same input and config always resolve the same way

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::config::TenancyConfig;
use crate::routing::classifier::{normalize_hostname, HostClassification, HostClassifier};
use crate::routing::matcher::ExclusionList;
use crate::routing::route_base::{RouteBase, RouteBaseResolver};
use crate::routing::site::{resolve_site, SiteVariant};
use crate::tenant::id::TenantId;
use crate::tenant::resolver::TenantResolver;
use crate::tenant::store::{InMemoryThemeStore, ThemeQuery, ThemeSource};
use crate::theme::applier::{ThemeApplier, ThemeState};
use crate::theme::sink::AttributeMap;

/// Everything the front end needs to render a navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub hostname: String,
    pub path: String,
    pub classification: HostClassification,
    pub route_base: RouteBase,
    pub site: SiteVariant,
    pub tenant: Option<TenantId>,
    pub theme: ThemeState,
    pub attributes: BTreeMap<String, String>,
}

/// Compiled resolution rules.
pub struct TenancyRouter {
    classifier: HostClassifier,
    bases: RouteBaseResolver,
    tenants: TenantResolver,
    excluded: Arc<ExclusionList>,
    default_accent: String,
    themes: Arc<dyn ThemeSource>,
}

impl std::fmt::Debug for TenancyRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TenancyRouter")
            .field("classifier", &self.classifier)
            .field("bases", &self.bases)
            .field("excluded", &self.excluded.len())
            .finish_non_exhaustive()
    }
}

impl TenancyRouter {
    /// Build from config using the in-memory theme store.
    pub fn from_config(config: &TenancyConfig) -> Self {
        let store = InMemoryThemeStore::from_config(&config.tenants);
        tracing::debug!(tenants = store.len(), "Theme store loaded");
        Self::with_source(config, Arc::new(store))
    }

    /// Build from config with an external theme source.
    pub fn with_source(config: &TenancyConfig, themes: Arc<dyn ThemeSource>) -> Self {
        Self {
            classifier: HostClassifier::from_config(&config.domains),
            bases: RouteBaseResolver::new(config.routing.dev_prefix.clone()),
            tenants: TenantResolver::from_config(&config.routing),
            excluded: Arc::new(ExclusionList::from_prefixes(
                config.theme.excluded_prefixes.iter().cloned(),
            )),
            default_accent: config.theme.default_accent.clone(),
            themes,
        }
    }

    pub fn classify(&self, hostname: &str) -> HostClassification {
        self.classifier.classify(hostname)
    }

    pub fn build_url(&self, hostname: &str, path: &str) -> String {
        self.bases.build_url(path, self.classify(hostname))
    }

    pub fn theme_source(&self) -> &Arc<dyn ThemeSource> {
        &self.themes
    }

    /// Resolve a navigation. Never fails; unknown inputs get defaults.
    pub fn resolve(&self, hostname: &str, path: &str) -> Resolution {
        let host = normalize_hostname(hostname);
        // One leading separator, so "admin" and "//admin" match like "/admin".
        let path = format!("/{}", path.trim_start_matches('/'));
        let path = path.as_str();

        let classification = self.classifier.classify(&host);
        let route_base = self.bases.base_for(classification);
        let site = resolve_site(&self.bases, classification, path);

        let tenant = match site {
            SiteVariant::TenantSite => self.tenants.resolve(&host, classification),
            SiteVariant::Landing => None,
        };

        let query = tenant
            .as_ref()
            .map(|id| self.themes.fetch(id))
            .unwrap_or_else(ThemeQuery::missing);

        // Exclusions are written against tenant-relative paths.
        let themed_path = self.bases.strip_base(path, classification).unwrap_or(path);

        let mut applier = ThemeApplier::with_default_accent(
            AttributeMap::new(),
            self.excluded.clone(),
            self.default_accent.clone(),
        );
        let theme = applier.apply(themed_path, &query);

        tracing::debug!(
            host = %host,
            path = %path,
            classification = %classification,
            site = site.as_str(),
            tenant = tenant.as_ref().map(TenantId::as_str).unwrap_or("-"),
            theme = theme.label(),
            "Resolved request"
        );

        Resolution {
            hostname: host,
            path: path.to_string(),
            classification,
            route_base,
            site,
            tenant,
            theme,
            attributes: applier.into_sink().into_inner(),
        }
    }
}
