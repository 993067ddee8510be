use axum::{extract::State, Json};
use serde::Serialize;

use crate::http::server::AppState;
use crate::tenant::id::TenantId;
use crate::theme::config::{ColorMode, Layout};

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub config_generation: u64,
    pub tenants: usize,
    pub main_domains: Vec<String>,
}

#[derive(Serialize)]
pub struct TenantStatus {
    pub slug: TenantId,
    pub loading: bool,
    pub layout: Option<Layout>,
    pub color_mode: Option<ColorMode>,
    pub accent_color: Option<String>,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let inner = state.inner.load();
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        config_generation: inner.generation,
        tenants: inner.store.len(),
        main_domains: inner.config.domains.main_domains.clone(),
    })
}

pub async fn get_tenants(State(state): State<AppState>) -> Json<Vec<TenantStatus>> {
    let inner = state.inner.load();
    let tenants = inner
        .store
        .tenants()
        .into_iter()
        .map(|(slug, query)| {
            let theme = query.data.unwrap_or_default();
            TenantStatus {
                slug,
                loading: query.is_loading,
                layout: theme.layout,
                color_mode: theme.color_mode,
                accent_color: theme.accent_color,
            }
        })
        .collect();
    Json(tenants)
}
