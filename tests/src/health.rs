use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use launchpad_common::config::Config;
use launchpad_common::models::address::{NetworkAddressSet, NetworkProfile};
use launchpad_common::models::health::{HealthCheckResult, HealthStatus};
use launchpad_common::models::item::BookmarkItem;
use launchpad_core::network::ReqwestProber;
use launchpad_core::HealthChecker;

use crate::support::http_server;

fn bookmark(id: &str, addr: SocketAddr) -> BookmarkItem {
    BookmarkItem::new(id, id)
        .with_addresses(NetworkAddressSet::default().with_local(addr.ip().to_string()))
        .with_protocol("http")
        .with_port(addr.port())
        .with_path("/health")
}

fn checker() -> HealthChecker {
    let cfg: Config = Config {
        health_timeout: Duration::from_millis(500),
        health_delay: Duration::from_millis(10),
        ..Config::default()
    };
    HealthChecker::new(Arc::new(ReqwestProber::new(false).unwrap()), cfg)
}

#[tokio::test]
async fn status_codes_map_onto_health() {
    let ok: SocketAddr = http_server(200).await;
    let moved: SocketAddr = http_server(302).await;
    let missing: SocketAddr = http_server(404).await;

    let items: Vec<BookmarkItem> = vec![bookmark("ok", ok), bookmark("moved", moved), bookmark("missing", missing)];
    let results: Vec<HealthCheckResult> = checker().check_many(&items, NetworkProfile::Local).await;

    let statuses: Vec<(HealthStatus, Option<u16>)> =
        results.iter().map(|r| (r.status, r.status_code)).collect();
    assert_eq!(
        statuses,
        vec![
            (HealthStatus::Healthy, Some(200)),
            (HealthStatus::Warning, Some(302)),
            (HealthStatus::Error, Some(404)),
        ]
    );
    assert_eq!(results[2].error.as_deref(), Some("HTTP 404"));
    assert_eq!(results[0].url.as_deref(), Some(format!("http://{ok}/health").as_str()));
}

#[tokio::test]
async fn silent_server_times_out() {
    let silent: SocketAddr = http_server(0).await;
    let mut checker: HealthChecker = checker();

    let result: HealthCheckResult = checker.check_one(&bookmark("silent", silent), NetworkProfile::Local).await;

    assert_eq!(result.status, HealthStatus::Error);
    assert_eq!(result.status_code, None);
    assert_eq!(result.error.as_deref(), Some("Request timeout"));
    assert!(result.response_time.unwrap_or_default() >= 400);
}

#[tokio::test]
async fn refused_connection_is_an_error_result() {
    let listener: tokio::net::TcpListener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    drop(listener);

    let result: HealthCheckResult = checker().check_one(&bookmark("gone", addr), NetworkProfile::Local).await;

    assert_eq!(result.status, HealthStatus::Error);
    assert_eq!(result.status_code, None);
    assert!(result.error.is_some());
}

#[tokio::test]
async fn progress_is_reported_in_order_and_results_are_cached() {
    let ok: SocketAddr = http_server(200).await;
    let items: Vec<BookmarkItem> = vec![
        bookmark("first", ok),
        BookmarkItem::new("nowhere", "Nowhere"),
        bookmark("last", ok),
    ];
    let mut checker: HealthChecker = checker();
    let mut progress: Vec<(usize, usize, String)> = Vec::new();

    checker
        .check_many_with_progress(&items, NetworkProfile::Vpn, |current, total, result| {
            progress.push((current, total, result.item_id.clone()));
        })
        .await;

    assert_eq!(
        progress,
        vec![
            (1, 3, "first".to_string()),
            (2, 3, "nowhere".to_string()),
            (3, 3, "last".to_string()),
        ]
    );

    let nowhere: &HealthCheckResult = checker.get_result("nowhere").unwrap();
    assert_eq!(nowhere.url, None);
    assert_eq!(nowhere.error.as_deref(), Some(HealthCheckResult::NO_URL_MESSAGE));
    assert_eq!(checker.get_result("last").unwrap().status, HealthStatus::Healthy);
    assert_eq!(checker.get_all_results().len(), 3);

    checker.clear_results();
    assert!(checker.get_result("first").is_none());
}
