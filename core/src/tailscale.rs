//! # Tailscale Service
//!
//! Reads the local Tailscale client's state through its CLI and keeps the
//! answer for a short freshness window.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tokio::time::Instant;
use tracing::{debug, warn};

use launchpad_common::config::Config;
use launchpad_common::models::address::NetworkProfile;
use launchpad_common::models::tailscale::TailscaleStatus;
use launchpad_common::ports::{CommandOutput, CommandRunner};

const MACOS_APP_CLI: &str = "/Applications/Tailscale.app/Contents/MacOS/Tailscale";
const MACOS_BREW_CLI: &str = "/usr/local/bin/tailscale";
const TAILSCALE_CLI: &str = "tailscale";
const RUNNING: &str = "Running";

pub struct TailscaleService {
    runner: Arc<dyn CommandRunner>,
    cfg: Config,
    cached: Option<(Instant, TailscaleStatus)>,
}

impl TailscaleService {
    pub fn new(runner: Arc<dyn CommandRunner>, cfg: Config) -> Self {
        Self {
            runner,
            cfg,
            cached: None,
        }
    }

    /// Cached status, refreshed once it is older than the freshness window.
    ///
    /// Failures read as disconnected and are not cached.
    pub async fn get_status(&mut self) -> TailscaleStatus {
        if let Some((at, status)) = &self.cached
            && at.elapsed() < self.cfg.tailscale_ttl
        {
            return status.clone();
        }

        match self.fetch_status().await {
            Ok(status) => {
                self.cached = Some((Instant::now(), status.clone()));
                status
            }
            Err(e) => {
                warn!("Failed to get Tailscale status: {e:#}");
                TailscaleStatus::disconnected()
            }
        }
    }

    pub async fn is_connected(&mut self) -> bool {
        self.get_status().await.connected
    }

    /// One ICMP echo through the system `ping`.
    pub async fn can_reach(&self, address: &str) -> bool {
        let args: Vec<String> = ping_args(address);
        match self.runner.run("ping", &args, self.cfg.ping_timeout).await {
            Ok(output) => output.success,
            Err(e) => {
                debug!("ping {address} failed: {e:#}");
                false
            }
        }
    }

    /// Local when Tailscale is down or the local address answers, Tailscale
    /// when it is up and the item has a Tailscale address.
    pub async fn detect_best_profile(
        &mut self,
        local_address: Option<&str>,
        tailscale_address: Option<&str>,
    ) -> NetworkProfile {
        if !self.get_status().await.connected {
            return NetworkProfile::Local;
        }

        if let Some(local) = local_address.filter(|a| !a.is_empty())
            && self.can_reach(local).await
        {
            return NetworkProfile::Local;
        }

        match tailscale_address.filter(|a| !a.is_empty()) {
            Some(_) => NetworkProfile::Tailscale,
            None => NetworkProfile::Local,
        }
    }

    pub fn clear_cache(&mut self) {
        self.cached = None;
    }

    async fn fetch_status(&self) -> anyhow::Result<TailscaleStatus> {
        let args: Vec<String> = vec!["status".to_string(), "--json".to_string()];
        let mut last_error: Option<anyhow::Error> = None;

        for program in cli_candidates() {
            if Path::new(program).is_absolute() && !Path::new(program).exists() {
                continue;
            }

            match self.runner.run(program, &args, self.cfg.tailscale_command_timeout).await {
                Ok(CommandOutput { success: true, stdout, .. }) => return parse_status(&stdout),
                Ok(CommandOutput { stderr, .. }) => {
                    last_error = Some(anyhow::anyhow!("{program} status failed: {}", stderr.trim()));
                }
                Err(e) => last_error = Some(e),
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("tailscale CLI not found")))
    }
}

fn cli_candidates() -> &'static [&'static str] {
    if cfg!(target_os = "macos") {
        &[MACOS_APP_CLI, MACOS_BREW_CLI, TAILSCALE_CLI]
    } else {
        &[TAILSCALE_CLI]
    }
}

fn ping_args(address: &str) -> Vec<String> {
    let args: [&str; 4] = if cfg!(windows) {
        ["-n", "1", "-w", "1000"]
    } else {
        ["-c", "1", "-W", "1"]
    };
    args.iter()
        .map(|a| a.to_string())
        .chain(std::iter::once(address.to_string()))
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StatusReport {
    #[serde(default)]
    backend_state: String,
    #[serde(default)]
    current_tailnet: Option<Tailnet>,
    #[serde(default, rename = "MagicDNSSuffix")]
    magic_dns_suffix: Option<String>,
    #[serde(default, rename = "Self")]
    self_node: Option<SelfNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Tailnet {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SelfNode {
    #[serde(default, rename = "TailscaleIPs")]
    tailscale_ips: Vec<String>,
    #[serde(default)]
    host_name: Option<String>,
}

fn parse_status(json: &str) -> anyhow::Result<TailscaleStatus> {
    let report: StatusReport = serde_json::from_str(json)?;

    if report.backend_state != RUNNING {
        debug!("Tailscale backend is {:?}", report.backend_state);
        return Ok(TailscaleStatus::disconnected());
    }

    let tailnet_name: Option<String> = report
        .current_tailnet
        .and_then(|t| t.name)
        .filter(|n| !n.is_empty())
        .or(report.magic_dns_suffix.filter(|s| !s.is_empty()));
    let (ip_address, hostname): (Option<String>, Option<String>) = match report.self_node {
        Some(node) => (node.tailscale_ips.into_iter().next(), node.host_name),
        None => (None, None),
    };

    Ok(TailscaleStatus {
        connected: true,
        tailnet_name,
        ip_address,
        hostname,
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
