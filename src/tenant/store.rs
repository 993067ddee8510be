//! Read-only tenant theme store.
//!
//! # Responsibilities
//! - Answer "what theme does this tenant have" in the shape the applier
//!   consumes (`data` + `is_loading`)
//! - Hold tenant records loaded from configuration
//!
//! # Design Decisions
//! - Concurrent reads via DashMap; writes only happen on config reload
//! - Unknown tenant is `data: None`, not an error
//! - Retry, caching and cancellation belong to the caller

use dashmap::{DashMap, DashSet};

use crate::config::TenantConfig;
use crate::tenant::id::TenantId;
use crate::theme::config::ThemeConfig;

/// Result of a theme fetch as seen by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeQuery {
    pub data: Option<ThemeConfig>,
    pub is_loading: bool,
}

impl ThemeQuery {
    pub fn loaded(theme: ThemeConfig) -> Self {
        Self {
            data: Some(theme),
            is_loading: false,
        }
    }

    pub fn missing() -> Self {
        Self::default()
    }

    pub fn pending() -> Self {
        Self {
            data: None,
            is_loading: true,
        }
    }
}

/// Source of tenant theme records.
pub trait ThemeSource: Send + Sync {
    fn fetch(&self, tenant: &TenantId) -> ThemeQuery;
}

/// In-memory theme store built from `[[tenants]]` configuration.
#[derive(Debug, Default)]
pub struct InMemoryThemeStore {
    themes: DashMap<TenantId, ThemeConfig>,
    pending: DashSet<TenantId>,
}

impl InMemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from tenant configs. Entries with invalid slugs are skipped;
    /// validation rejects them before this point.
    pub fn from_config(tenants: &[TenantConfig]) -> Self {
        let store = Self::new();
        for tenant in tenants {
            match TenantId::parse(&tenant.slug) {
                Ok(id) if tenant.pending => {
                    store.mark_pending(id);
                }
                Ok(id) => store.insert(id, tenant.theme.clone()),
                Err(e) => tracing::warn!(slug = %tenant.slug, error = %e, "Skipping tenant"),
            }
        }
        store
    }

    pub fn insert(&self, tenant: TenantId, theme: ThemeConfig) {
        self.pending.remove(&tenant);
        self.themes.insert(tenant, theme);
    }

    pub fn mark_pending(&self, tenant: TenantId) {
        self.themes.remove(&tenant);
        self.pending.insert(tenant);
    }

    pub fn len(&self) -> usize {
        self.themes.len() + self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all known tenants, sorted by slug.
    pub fn tenants(&self) -> Vec<(TenantId, ThemeQuery)> {
        let mut out: Vec<_> = self
            .themes
            .iter()
            .map(|entry| (entry.key().clone(), ThemeQuery::loaded(entry.value().clone())))
            .chain(self.pending.iter().map(|id| (id.key().clone(), ThemeQuery::pending())))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }
}

impl ThemeSource for InMemoryThemeStore {
    fn fetch(&self, tenant: &TenantId) -> ThemeQuery {
        if self.pending.contains(tenant) {
            return ThemeQuery::pending();
        }
        self.themes
            .get(tenant)
            .map(|theme| ThemeQuery::loaded(theme.value().clone()))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::config::{ColorMode, Layout};

    fn tenant(slug: &str, theme: ThemeConfig, pending: bool) -> TenantConfig {
        TenantConfig {
            slug: slug.to_string(),
            theme,
            pending,
        }
    }

    #[test]
    fn test_fetch_known_unknown_and_pending() {
        let store = InMemoryThemeStore::from_config(&[
            tenant("studio", ThemeConfig::new(Layout::Editorial, ColorMode::Dark, "blue"), false),
            tenant("newbie", ThemeConfig::default(), true),
        ]);

        let studio = store.fetch(&TenantId::parse("studio").unwrap());
        assert_eq!(studio.data.unwrap().layout, Some(Layout::Editorial));
        assert!(!studio.is_loading);

        assert_eq!(store.fetch(&TenantId::parse("newbie").unwrap()), ThemeQuery::pending());
        assert_eq!(store.fetch(&TenantId::parse("ghost").unwrap()), ThemeQuery::missing());
    }

    #[test]
    fn test_insert_clears_pending() {
        let store = InMemoryThemeStore::new();
        let id = TenantId::parse("ana").unwrap();
        store.mark_pending(id.clone());
        store.insert(id.clone(), ThemeConfig::with_layout(Layout::Sidebar));

        assert_eq!(store.len(), 1);
        assert!(!store.fetch(&id).is_loading);
    }

    #[test]
    fn test_tenants_snapshot_is_sorted() {
        let store = InMemoryThemeStore::from_config(&[
            tenant("zoe", ThemeConfig::default(), false),
            tenant("ana", ThemeConfig::default(), true),
        ]);
        let slugs: Vec<_> = store.tenants().into_iter().map(|(id, _)| id.to_string()).collect();
        assert_eq!(slugs, vec!["ana", "zoe"]);
    }
}
