//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use flowclik_tenancy::config::{TenancyConfig, TenantConfig};
use flowclik_tenancy::http::HttpServer;
use flowclik_tenancy::lifecycle::Shutdown;
use flowclik_tenancy::theme::{ColorMode, Layout, ThemeConfig};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A running service bound to an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub config_updates: mpsc::UnboundedSender<TenancyConfig>,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

pub fn tenant(slug: &str, theme: ThemeConfig) -> TenantConfig {
    TenantConfig {
        slug: slug.to_string(),
        theme,
        pending: false,
    }
}

/// Config with two tenants, a dev tenant and admin enabled.
pub fn sample_config() -> TenancyConfig {
    let mut config = TenancyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.routing.dev_tenant = Some("studio".to_string());
    config.admin.enabled = true;
    config.admin.api_key = "test-key".to_string();
    config.tenants = vec![
        tenant("studio", ThemeConfig::new(Layout::Editorial, ColorMode::Dark, "blue")),
        tenant("films", ThemeConfig::with_layout(Layout::WeddingVideos)),
    ];
    config
}

pub async fn start_server(config: TenancyConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (config_updates, updates_rx) = mpsc::unbounded_channel();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();

    let handle = tokio::spawn(async move { server.run(listener, updates_rx, server_shutdown).await });

    // Listener is already bound, but give the accept loop a moment.
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer {
        addr,
        shutdown,
        config_updates,
        handle,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
