//! End-to-end tests against a running tenancy service.

use std::time::Duration;

use flowclik_tenancy::theme::{Layout, ThemeConfig};
use serde_json::Value;

mod common;

async fn resolve(server: &common::TestServer, host: &str, path: &str) -> Value {
    common::client()
        .get(server.url("/resolve"))
        .query(&[("host", host), ("path", path)])
        .send()
        .await
        .expect("service unreachable")
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_tenant_site_resolution() {
    let server = common::start_server(common::sample_config()).await;

    let body = resolve(&server, "studio.flowclik.com", "/").await;

    assert_eq!(body["classification"], "tenant_subdomain");
    assert_eq!(body["route_base"], "");
    assert_eq!(body["site"], "tenant_site");
    assert_eq!(body["tenant"], "studio");
    assert_eq!(body["attributes"]["data-layout"], "editorial");
    assert_eq!(body["attributes"]["data-theme-mode"], "dark");
    assert_eq!(body["attributes"]["data-accent-color"], "blue");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_excluded_and_fixed_palette_paths() {
    let server = common::start_server(common::sample_config()).await;

    let admin = resolve(&server, "studio.flowclik.com", "/admin/dashboard").await;
    assert_eq!(admin["theme"]["state"], "unthemed");
    assert_eq!(admin["attributes"], serde_json::json!({}));

    let films = resolve(&server, "films.flowclik.com", "/").await;
    assert_eq!(films["theme"]["state"], "fixed_palette");
    assert_eq!(films["attributes"], serde_json::json!({ "data-layout": "wedding-videos" }));

    // Exclusion wins over the fixed palette.
    let films_admin = resolve(&server, "films.flowclik.com", "/admin").await;
    assert_eq!(films_admin["attributes"], serde_json::json!({}));

    for path in ["admin/dashboard", "//admin/dashboard"] {
        let unrooted = resolve(&server, "studio.flowclik.com", path).await;
        assert_eq!(unrooted["theme"]["state"], "unthemed");
        assert_eq!(unrooted["attributes"], serde_json::json!({}));
        assert_eq!(unrooted["path"], "/admin/dashboard");
    }

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_local_development_routes_under_prefix() {
    let server = common::start_server(common::sample_config()).await;

    let landing = resolve(&server, "localhost:5173", "/").await;
    assert_eq!(landing["classification"], "local_development");
    assert_eq!(landing["route_base"], "/site");
    assert_eq!(landing["site"], "landing");

    let site = resolve(&server, "localhost:5173", "/site/services").await;
    assert_eq!(site["site"], "tenant_site");
    assert_eq!(site["tenant"], "studio");
    assert_eq!(site["attributes"]["data-layout"], "editorial");

    let url: Value = common::client()
        .get(server.url("/url"))
        .query(&[("host", "localhost"), ("path", "services")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(url["url"], "/site/services");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_host_header_is_used_without_query() {
    let server = common::start_server(common::sample_config()).await;

    let body: Value = common::client()
        .get(server.url("/resolve?path=/gallery"))
        .header("Host", "www.flowclik.com")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["classification"], "main_domain");
    assert_eq!(body["site"], "landing");
    assert_eq!(body["theme"]["state"], "unthemed");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_config_update_is_applied() {
    let server = common::start_server(common::sample_config()).await;

    let mut updated = common::sample_config();
    updated.tenants = vec![common::tenant("studio", ThemeConfig::with_layout(Layout::Cinematic))];
    server.config_updates.send(updated).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let body = resolve(&server, "studio.flowclik.com", "/").await;
    assert_eq!(body["attributes"]["data-layout"], "cinematic");
    assert_eq!(body["attributes"]["data-theme-mode"], "light");
    assert_eq!(body["attributes"]["data-accent-color"], "gold");

    let status: Value = common::client()
        .get(server.url("/admin/status"))
        .bearer_auth("test-key")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status["config_generation"], 1);
    assert_eq!(status["tenants"], 1);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_graceful_shutdown_stops_server() {
    let server = common::start_server(common::sample_config()).await;

    let res = common::client().get(server.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));

    server.shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), server.handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}
