use std::collections::BTreeSet;
use std::net::IpAddr;

use colored::*;

use launchpad_common::models::app::RunningApp;
use launchpad_common::models::health::{HealthCheckResult, HealthStatus};
use launchpad_common::models::share::DiscoveredShare;
use launchpad_common::models::tailscale::TailscaleStatus;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn status_color(status: HealthStatus) -> Color {
    match status {
        HealthStatus::Healthy => colors::HEALTHY,
        HealthStatus::Warning => colors::WARNING,
        HealthStatus::Error => colors::ERROR,
        HealthStatus::Unknown => colors::UNKNOWN,
    }
}

pub fn status_label(status: HealthStatus) -> ColoredString {
    let label: &str = match status {
        HealthStatus::Healthy => "healthy",
        HealthStatus::Warning => "warning",
        HealthStatus::Error => "error",
        HealthStatus::Unknown => "unknown",
    };
    label.color(status_color(status)).bold()
}

pub fn health_to_details(result: &HealthCheckResult) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![(
        "Status".to_string(),
        status_label(result.status),
    )];

    let url: ColoredString = match &result.url {
        Some(url) => url.color(colors::URL),
        None => "none".color(colors::UNKNOWN),
    };
    details.push(("URL".to_string(), url));

    if let Some(code) = result.status_code {
        details.push(("Code".to_string(), code.to_string().color(status_color(result.status))));
    }
    if let Some(ms) = result.response_time {
        details.push(("Time".to_string(), format!("{ms} ms").normal()));
    }
    if let Some(error) = &result.error {
        details.push(("Error".to_string(), error.color(colors::ERROR)));
    }

    details
}

pub fn address_color(ip: &IpAddr) -> Color {
    match ip {
        IpAddr::V4(_) => colors::IPV4_ADDR,
        IpAddr::V6(_) => colors::IPV6_ADDR,
    }
}

pub fn ports_to_string(ports: &BTreeSet<u16>) -> String {
    ports
        .iter()
        .map(u16::to_string)
        .collect::<Vec<String>>()
        .join(", ")
}

pub fn share_to_details(share: &DiscoveredShare) -> Vec<Detail> {
    let address: ColoredString = match &share.address {
        Some(ip) => ip.to_string().color(address_color(ip)),
        None => "unresolved".color(colors::UNKNOWN),
    };
    let open: ColoredString = if share.open_ports.is_empty() {
        "none confirmed".color(colors::UNKNOWN)
    } else {
        ports_to_string(&share.open_ports).color(colors::HEALTHY)
    };

    vec![
        ("Kind".to_string(), share.kind.label().color(colors::ACCENT)),
        ("Host".to_string(), share.host.normal()),
        ("Address".to_string(), address),
        ("Ports".to_string(), ports_to_string(&share.advertised_ports).normal()),
        ("Open".to_string(), open),
    ]
}

pub fn tailscale_to_details(status: &TailscaleStatus) -> Vec<Detail> {
    let connected: ColoredString = if status.connected {
        "connected".color(colors::HEALTHY).bold()
    } else {
        "disconnected".color(colors::ERROR).bold()
    };
    let mut details: Vec<Detail> = vec![("State".to_string(), connected)];

    let optional: [(&str, &Option<String>); 3] = [
        ("Tailnet", &status.tailnet_name),
        ("IP", &status.ip_address),
        ("Host", &status.hostname),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            details.push((key.to_string(), value.normal()));
        }
    }
    details
}

pub fn app_to_details(app: &RunningApp) -> Vec<Detail> {
    let bundle_id: ColoredString = match &app.bundle_id {
        Some(id) => id.color(colors::ACCENT),
        None => "unknown".color(colors::UNKNOWN),
    };
    vec![
        ("Path".to_string(), app.path.color(colors::URL)),
        ("Bundle".to_string(), bundle_id),
        ("PID".to_string(), app.pid.to_string().normal()),
    ]
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
