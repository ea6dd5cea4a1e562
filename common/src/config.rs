//! Runtime tunables shared by every layer.
//!
//! The CLI fills a [`Config`] from its flags; library code only reads it.

use std::time::Duration;

/// Upper bound for a single health probe.
pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(10);
/// Pause between two sequential health probes.
pub const HEALTH_CHECK_DELAY: Duration = Duration::from_millis(100);
pub const DISCOVERY_TIMEOUT: Duration = Duration::from_millis(5_000);
pub const PORT_PROBE_TIMEOUT: Duration = Duration::from_millis(400);
pub const TAILSCALE_STATUS_TTL: Duration = Duration::from_secs(30);
pub const TAILSCALE_COMMAND_TIMEOUT: Duration = Duration::from_secs(5);
pub const PING_TIMEOUT: Duration = Duration::from_secs(2);
/// Upper bound for `ps` and each bundle id lookup when listing running apps.
pub const APP_QUERY_TIMEOUT: Duration = Duration::from_secs(2);

/// Ports probed on every advertised share host to fill `open_ports`.
pub const DEFAULT_PROBE_PORTS: [u16; 6] = [445, 548, 80, 443, 21, 22];

#[derive(Debug, Clone)]
pub struct Config {
    pub health_timeout: Duration,
    pub health_delay: Duration,
    pub discovery_timeout: Duration,
    pub port_probe_timeout: Duration,
    pub probe_ports: Vec<u16>,
    pub tailscale_ttl: Duration,
    pub tailscale_command_timeout: Duration,
    pub ping_timeout: Duration,
    pub app_query_timeout: Duration,
    /// Accept self-signed certificates when probing `https` bookmarks.
    pub insecure_tls: bool,
    /// 0 prints everything, 1 drops decoration, 2 prints only results.
    pub quiet: u8,
    pub no_banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            health_timeout: HEALTH_CHECK_TIMEOUT,
            health_delay: HEALTH_CHECK_DELAY,
            discovery_timeout: DISCOVERY_TIMEOUT,
            port_probe_timeout: PORT_PROBE_TIMEOUT,
            probe_ports: DEFAULT_PROBE_PORTS.to_vec(),
            tailscale_ttl: TAILSCALE_STATUS_TTL,
            tailscale_command_timeout: TAILSCALE_COMMAND_TIMEOUT,
            ping_timeout: PING_TIMEOUT,
            app_query_timeout: APP_QUERY_TIMEOUT,
            insecure_tls: false,
            quiet: 0,
            no_banner: false,
        }
    }
}
