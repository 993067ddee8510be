//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Swap in reloaded configuration without dropping requests
//! - Stop on the shutdown signal

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::{MatchedPath, Query, State},
    http::{header, HeaderMap, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::admin::setup_admin_router;
use crate::config::TenancyConfig;
use crate::http::request::{request_id, request_id_layer};
use crate::observability::metrics;
use crate::routing::{HostClassification, TenancyRouter};
use crate::tenant::store::InMemoryThemeStore;

/// Snapshot of everything derived from one configuration.
pub struct Inner {
    pub config: TenancyConfig,
    pub router: TenancyRouter,
    pub store: Arc<InMemoryThemeStore>,
    /// Incremented on every accepted reload.
    pub generation: u64,
}

impl Inner {
    pub fn build(config: TenancyConfig, generation: u64) -> Self {
        let store = Arc::new(InMemoryThemeStore::from_config(&config.tenants));
        let router = TenancyRouter::with_source(&config, store.clone());
        Self {
            config,
            router,
            store,
            generation,
        }
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<ArcSwap<Inner>>,
}

impl AppState {
    pub fn new(config: TenancyConfig) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(Inner::build(config, 0))),
        }
    }

    /// Replace the active configuration.
    pub fn reload(&self, config: TenancyConfig) {
        let current = self.inner.load();
        for setting in restart_required(&current.config, &config) {
            tracing::warn!(setting, "Setting changes require a restart; keeping current value");
        }
        let generation = current.generation + 1;
        let tenants = config.tenants.len();
        self.inner.store(Arc::new(Inner::build(config, generation)));
        tracing::info!(generation, tenants, "Configuration reloaded");
    }
}

/// Settings baked into the listener or middleware stack at startup that
/// differ between `current` and `next`.
pub fn restart_required(current: &TenancyConfig, next: &TenancyConfig) -> Vec<&'static str> {
    let mut changed = Vec::new();
    if current.listener.bind_address != next.listener.bind_address {
        changed.push("listener.bind_address");
    }
    if current.timeouts.request_secs != next.timeouts.request_secs {
        changed.push("timeouts.request_secs");
    }
    changed
}

/// HTTP server for the tenancy service.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: TenancyConfig) -> Self {
        let state = AppState::new(config);
        let router = Self::build_router(state.clone());
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState) -> Router {
        let request_secs = state.inner.load().config.timeouts.request_secs;

        Router::new()
            .route("/resolve", get(resolve_handler))
            .route("/url", get(url_handler))
            .route("/health", get(health_handler))
            .merge(setup_admin_router(state.clone()))
            .route_layer(middleware::from_fn(track_requests))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(request_secs)))
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    request_id = %request_id(req.headers()),
                    method = %req.method(),
                    uri = %req.uri(),
                )
            }))
            .layer(request_id_layer())
    }

    /// The assembled router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server until `shutdown` fires, applying config updates as
    /// they arrive.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<TenancyConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let state = self.state.clone();
        let reloader = tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                state.reload(config);
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        reloader.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ResolveParams {
    /// Overrides the `Host` header.
    pub host: Option<String>,
    pub path: Option<String>,
}

impl ResolveParams {
    fn hostname(&self, headers: &HeaderMap) -> String {
        self.host
            .clone()
            .or_else(|| {
                headers
                    .get(header::HOST)
                    .and_then(|h| h.to_str().ok())
                    .map(str::to_string)
            })
            .unwrap_or_default()
    }

    fn path(&self) -> &str {
        self.path.as_deref().unwrap_or("/")
    }
}

#[derive(Debug, Serialize)]
pub struct UrlResponse {
    pub classification: HostClassification,
    pub url: String,
}

async fn resolve_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ResolveParams>,
) -> Response {
    let inner = state.inner.load();
    let hostname = params.hostname(&headers);

    let resolution = inner.router.resolve(&hostname, params.path());

    tracing::debug!(
        request_id = %request_id(&headers),
        classification = %resolution.classification,
        theme = resolution.theme.label(),
        "Resolution served"
    );
    metrics::record_resolution(&resolution);

    Json(resolution).into_response()
}

async fn url_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ResolveParams>,
) -> Response {
    let inner = state.inner.load();
    let hostname = params.hostname(&headers);

    let response = UrlResponse {
        classification: inner.router.classify(&hostname),
        url: inner.router.build_url(&hostname, params.path.as_deref().unwrap_or("")),
    };

    Json(response).into_response()
}

/// Records every routed request with the status actually returned,
/// including admin auth rejections.
async fn track_requests(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let endpoint = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let res = next.run(req).await;
    metrics::record_request(&endpoint, res.status().as_u16(), start);
    res
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use tower::ServiceExt;

    use crate::config::TenantConfig;
    use crate::theme::config::{Layout, ThemeConfig};

    fn server() -> HttpServer {
        let mut config = TenancyConfig::default();
        config.tenants.push(TenantConfig {
            slug: "studio".into(),
            theme: ThemeConfig::with_layout(Layout::Sidebar),
            pending: false,
        });
        HttpServer::new(config)
    }

    async fn get_json(router: Router, uri: &str, host: &str) -> (StatusCode, serde_json::Value) {
        let res = router
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header(header::HOST, host)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), 1024 * 1024).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_resolve_uses_host_header() {
        let (status, body) =
            get_json(server().router(), "/resolve?path=/gallery", "studio.flowclik.com").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["classification"], "tenant_subdomain");
        assert_eq!(body["tenant"], "studio");
        assert_eq!(body["theme"]["state"], "themed");
        assert_eq!(body["attributes"]["data-layout"], "sidebar");
        assert_eq!(body["attributes"]["data-accent-color"], "gold");
    }

    #[tokio::test]
    async fn test_host_query_param_overrides_header() {
        let (_, body) =
            get_json(server().router(), "/resolve?host=flowclik.com", "studio.flowclik.com").await;
        assert_eq!(body["classification"], "main_domain");
        assert_eq!(body["site"], "landing");
        assert_eq!(body["tenant"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_url_endpoint() {
        let (_, body) = get_json(server().router(), "/url?path=services", "localhost:3000").await;
        assert_eq!(body["url"], "/site/services");

        let (_, body) = get_json(server().router(), "/url", "studio.flowclik.com").await;
        assert_eq!(body["url"], "/");
    }

    #[tokio::test]
    async fn test_reload_swaps_router() {
        let server = server();
        let mut config = TenancyConfig::default();
        config.tenants.push(TenantConfig {
            slug: "studio".into(),
            theme: ThemeConfig::with_layout(Layout::WeddingVideos),
            pending: false,
        });
        server.state().reload(config);

        let (_, body) = get_json(server.router(), "/resolve", "studio.flowclik.com").await;
        assert_eq!(body["theme"]["state"], "fixed_palette");
        assert_eq!(server.state().inner.load().generation, 1);
    }

    #[test]
    fn test_restart_required_settings() {
        let current = TenancyConfig::default();
        let mut next = TenancyConfig::default();
        next.tenants.push(TenantConfig {
            slug: "films".into(),
            theme: ThemeConfig::default(),
            pending: false,
        });
        assert!(restart_required(&current, &next).is_empty());

        next.timeouts.request_secs = 30;
        assert_eq!(restart_required(&current, &next), vec!["timeouts.request_secs"]);

        next.listener.bind_address = "127.0.0.1:9000".into();
        assert_eq!(
            restart_required(&current, &next),
            vec!["listener.bind_address", "timeouts.request_secs"]
        );
    }

    #[tokio::test]
    async fn test_request_metrics_carry_response_status() {
        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let _guard = ::metrics::set_default_local_recorder(&recorder);

        let router = server().router();
        let (status, _) = get_json(router.clone(), "/resolve", "studio.flowclik.com").await;
        assert_eq!(status, StatusCode::OK);
        let res = router
            .oneshot(Request::builder().uri("/admin/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let rendered = handle.render();
        let line = |endpoint: &str| {
            rendered
                .lines()
                .find(|l| {
                    l.starts_with("tenancy_requests_total")
                        && l.contains(&format!("endpoint=\"{endpoint}\""))
                })
                .unwrap_or_default()
                .to_string()
        };
        assert!(line("/resolve").contains("status=\"200\""));
        assert!(line("/admin/status").contains("status=\"404\""));
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let res = server()
            .router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("x-request-id", "req-7")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.headers()["x-request-id"], "req-7");

        let res = server()
            .router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(res.headers().contains_key("x-request-id"));
    }
}
