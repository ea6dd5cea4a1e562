use std::collections::BTreeSet;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::time::Instant;

use launchpad_common::config::Config;
use launchpad_common::models::share::{DiscoveredShare, ServiceAnnouncement, ShareKind};
use launchpad_core::network::{SystemHostResolver, TcpPortProber};
use launchpad_core::NetworkDiscoveryService;

use crate::support::ScriptedBrowser;

const LOOPBACK: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

fn announcement(instance: &str, kind: ShareKind, host: &str, port: u16, with_address: bool) -> ServiceAnnouncement {
    ServiceAnnouncement {
        instance: instance.to_string(),
        kind,
        host: host.to_string(),
        port,
        addresses: if with_address {
            BTreeSet::from([LOOPBACK])
        } else {
            BTreeSet::new()
        },
    }
}

async fn closed_port() -> u16 {
    let listener: TcpListener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

fn service(browser: ScriptedBrowser, probe_ports: Vec<u16>) -> NetworkDiscoveryService {
    let cfg: Config = Config {
        probe_ports,
        port_probe_timeout: Duration::from_millis(300),
        ..Config::default()
    };
    NetworkDiscoveryService::new(
        Arc::new(browser),
        Arc::new(TcpPortProber::new()),
        Arc::new(SystemHostResolver),
        cfg,
    )
}

#[tokio::test]
async fn loopback_share_is_enriched_with_open_ports() {
    let listener: TcpListener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let open: u16 = listener.local_addr().unwrap().port();
    let closed: u16 = closed_port().await;

    let browser: ScriptedBrowser = ScriptedBrowser {
        announcements: vec![announcement("Dev box", ShareKind::Http, "devbox.local.", open, true)],
        hang: false,
    };

    let shares: Vec<DiscoveredShare> = service(browser, vec![closed])
        .scan_for_shares(Duration::from_secs(3))
        .await;

    assert_eq!(shares.len(), 1);
    assert_eq!(shares[0].address, Some(LOOPBACK));
    assert_eq!(shares[0].open_ports, BTreeSet::from([open]));
}

#[tokio::test]
async fn system_resolver_fills_missing_addresses() {
    let listener: TcpListener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let open: u16 = listener.local_addr().unwrap().port();

    let browser: ScriptedBrowser = ScriptedBrowser {
        announcements: vec![announcement("Loopback", ShareKind::Ftp, "127.0.0.1", open, false)],
        hang: false,
    };

    let shares: Vec<DiscoveredShare> = service(browser, Vec::new())
        .scan_for_shares(Duration::from_secs(3))
        .await;

    assert_eq!(shares.len(), 1);
    assert_eq!(shares[0].address, Some(LOOPBACK));
    assert!(shares[0].open_ports.contains(&open));
}

#[tokio::test]
async fn same_host_and_kind_is_reported_once() {
    let listener: TcpListener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let open: u16 = listener.local_addr().unwrap().port();

    let browser: ScriptedBrowser = ScriptedBrowser {
        announcements: vec![
            announcement("NAS", ShareKind::Smb, "nas.local", open, true),
            announcement("NAS (again)", ShareKind::Smb, "NAS.local.", open, true),
            announcement("NAS", ShareKind::Afp, "nas.local", open, true),
        ],
        hang: false,
    };

    let shares: Vec<DiscoveredShare> = service(browser, Vec::new())
        .scan_for_shares(Duration::from_secs(3))
        .await;

    let kinds: Vec<ShareKind> = shares.iter().map(|share| share.kind).collect();
    assert_eq!(kinds, vec![ShareKind::Afp, ShareKind::Smb]);
}

#[tokio::test]
async fn browser_that_never_finishes_is_cut_off_at_the_deadline() {
    let browser: ScriptedBrowser = ScriptedBrowser {
        announcements: Vec::new(),
        hang: true,
    };
    let window: Duration = Duration::from_millis(400);

    let started: Instant = Instant::now();
    let shares: Vec<DiscoveredShare> = service(browser, Vec::new()).scan_for_shares(window).await;
    let elapsed: Duration = started.elapsed();

    assert!(shares.is_empty());
    assert!(elapsed >= window, "returned after {elapsed:?}");
    assert!(elapsed < window + Duration::from_secs(1), "returned after {elapsed:?}");
}
