use std::net::{IpAddr, Ipv6Addr};

use url::{Host, Url};

use launchpad_common::models::address::{NetworkAddressSet, NetworkProfile};
use launchpad_common::models::item::BookmarkItem;
use launchpad_common::resolve::{build_url, default_port, resolve, resolve_and_build_url};

struct Case {
    host: &'static str,
    protocol: &'static str,
    port: Option<u16>,
    path: &'static str,
    expected_path: &'static str,
}

const CASES: [Case; 6] = [
    Case { host: "10.0.0.5", protocol: "https", port: Some(443), path: "/", expected_path: "/" },
    Case { host: "nas.local", protocol: "http", port: Some(5000), path: "admin", expected_path: "/admin" },
    Case { host: "fe80::1", protocol: "http", port: Some(8080), path: "", expected_path: "/" },
    Case { host: "router.lan", protocol: "ftp", port: Some(21), path: "/pub/", expected_path: "/pub/" },
    Case { host: "100.64.0.2", protocol: "http", port: None, path: "/status", expected_path: "/status" },
    Case { host: "[fd00::2]", protocol: "https", port: Some(8443), path: "/ui", expected_path: "/ui" },
];

fn expected_host(host: &str) -> Host<String> {
    let bare: &str = host.trim_start_matches('[').trim_end_matches(']');
    match bare.parse::<IpAddr>() {
        Ok(IpAddr::V4(v4)) => Host::Ipv4(v4),
        Ok(IpAddr::V6(v6)) => Host::Ipv6(v6),
        Err(_) => Host::Domain(bare.to_string()),
    }
}

#[test]
fn built_urls_survive_a_standard_parser() {
    for case in CASES {
        let built: String = build_url(Some(case.host), case.protocol, case.port, Some(case.path)).unwrap();
        let parsed: Url = Url::parse(&built).unwrap_or_else(|e| panic!("{built}: {e}"));

        assert_eq!(parsed.scheme(), case.protocol, "{built}");
        assert_eq!(parsed.host().map(|h| h.to_owned()), Some(expected_host(case.host)), "{built}");
        assert_eq!(parsed.path(), case.expected_path, "{built}");

        let port: Option<u16> = parsed.port().or_else(|| default_port(parsed.scheme()));
        let expected_port: Option<u16> = case.port.or_else(|| default_port(case.protocol));
        assert_eq!(port, expected_port, "{built}");
    }
}

#[test]
fn ipv6_hosts_are_bracketed_once() {
    let built: String = build_url(Some("fe80::1"), "http", Some(8080), Some("")).unwrap();
    assert_eq!(built, "http://[fe80::1]:8080/");

    let parsed: Url = Url::parse(&built).unwrap();
    assert_eq!(parsed.host(), Some(Host::Ipv6("fe80::1".parse::<Ipv6Addr>().unwrap())));
}

#[test]
fn resolution_falls_back_and_is_repeatable() {
    let addresses: NetworkAddressSet = NetworkAddressSet::default().with_local("10.0.0.5");
    assert_eq!(resolve(&addresses, NetworkProfile::Tailscale), Some("10.0.0.5"));

    let item: BookmarkItem = BookmarkItem::new("nas", "NAS").with_addresses(addresses);
    let first: String = resolve_and_build_url(&item, NetworkProfile::Tailscale).unwrap();
    let second: String = resolve_and_build_url(&item, NetworkProfile::Tailscale).unwrap();
    assert_eq!(first, "https://10.0.0.5/");
    assert_eq!(first, second);
}
