//! # Network Discovery Service
//!
//! Finds file shares advertised on the LAN within a fixed time window.
//!
//! Every announcement from the [`ServiceBrowser`] is recorded at once and
//! then enriched in the background: hosts without an address go through the
//! [`HostResolver`], and a handful of well-known ports are connect-probed to
//! fill `open_ports`. When the window closes, enrichment still in flight is
//! aborted and whatever was gathered is returned.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use launchpad_common::config::Config;
use launchpad_common::models::share::{DiscoveredShare, ServiceAnnouncement, ShareKey, ShareKind};
use launchpad_common::ports::{HostResolver, PortProber, ServiceBrowser};
use launchpad_protocols::SHARE_SERVICES;

pub struct NetworkDiscoveryService {
    browser: Arc<dyn ServiceBrowser>,
    prober: Arc<dyn PortProber>,
    resolver: Arc<dyn HostResolver>,
    cfg: Config,
}

impl NetworkDiscoveryService {
    pub fn new(
        browser: Arc<dyn ServiceBrowser>,
        prober: Arc<dyn PortProber>,
        resolver: Arc<dyn HostResolver>,
        cfg: Config,
    ) -> Self {
        Self {
            browser,
            prober,
            resolver,
            cfg,
        }
    }

    /// Scans for every known share type and returns once `timeout` has
    /// elapsed, or earlier if the browser finished and nothing is pending.
    ///
    /// Shares are deduplicated by host and kind. Never fails: a scan that
    /// found nothing returns an empty list.
    pub async fn scan_for_shares(&self, timeout: Duration) -> Vec<DiscoveredShare> {
        let deadline: Instant = Instant::now() + timeout;
        let kinds: Vec<ShareKind> = SHARE_SERVICES.iter().map(|service| service.kind).collect();

        let (tx, mut rx): (UnboundedSender<ServiceAnnouncement>, UnboundedReceiver<ServiceAnnouncement>) =
            mpsc::unbounded_channel();
        let browser: Arc<dyn ServiceBrowser> = self.browser.clone();
        let browse = async move { browser.browse(&kinds, tx).await };
        tokio::pin!(browse);

        let window = tokio::time::sleep_until(deadline);
        tokio::pin!(window);

        let mut shares: HashMap<ShareKey, DiscoveredShare> = HashMap::new();
        let mut enrichment: JoinSet<DiscoveredShare> = JoinSet::new();
        let mut browsing: bool = true;
        let mut receiving: bool = true;

        loop {
            if !receiving && enrichment.is_empty() {
                debug!("Discovery finished before the deadline");
                break;
            }

            tokio::select! {
                _ = &mut window => {
                    debug!("Discovery window closed with {} tasks pending", enrichment.len());
                    break;
                }

                outcome = &mut browse, if browsing => {
                    browsing = false;
                    if let Err(e) = outcome {
                        warn!("Service browsing stopped: {e:#}");
                    }
                }

                announcement = rx.recv(), if receiving => {
                    let Some(announcement) = announcement else {
                        receiving = false;
                        continue;
                    };
                    let share: DiscoveredShare = DiscoveredShare::from(&announcement);
                    trace!("Announced: {} ({}) on {}", share.name, share.kind, share.host);
                    record(&mut shares, share.clone());
                    enrichment.spawn(enrich(
                        share,
                        self.resolver.clone(),
                        self.prober.clone(),
                        self.cfg.probe_ports.clone(),
                        self.cfg.port_probe_timeout,
                    ));
                }

                Some(joined) = enrichment.join_next() => {
                    match joined {
                        Ok(share) => record(&mut shares, share),
                        Err(e) => debug!("Enrichment task failed: {e}"),
                    }
                }
            }
        }

        enrichment.abort_all();

        let mut found: Vec<DiscoveredShare> = shares.into_values().collect();
        found.sort_by(|a, b| a.host.cmp(&b.host).then(a.kind.label().cmp(b.kind.label())));
        found
    }
}

fn record(shares: &mut HashMap<ShareKey, DiscoveredShare>, share: DiscoveredShare) {
    match shares.get_mut(&share.key()) {
        Some(existing) => existing.merge(share),
        None => {
            shares.insert(share.key(), share);
        }
    }
}

async fn enrich(
    mut share: DiscoveredShare,
    resolver: Arc<dyn HostResolver>,
    prober: Arc<dyn PortProber>,
    probe_ports: Vec<u16>,
    probe_timeout: Duration,
) -> DiscoveredShare {
    if share.address.is_none() {
        match resolver.lookup(&share.host).await {
            Ok(addrs) => {
                share.address = addrs
                    .iter()
                    .find(|ip| ip.is_ipv4())
                    .or_else(|| addrs.first())
                    .copied();
            }
            Err(e) => debug!("Could not resolve {}: {e:#}", share.host),
        }
    }

    let Some(address) = share.address else {
        return share;
    };

    let mut ports: BTreeSet<u16> = probe_ports.into_iter().collect();
    ports.extend(share.advertised_ports.iter().copied());

    let mut probes: JoinSet<Option<u16>> = JoinSet::new();
    for port in ports {
        let prober: Arc<dyn PortProber> = prober.clone();
        probes.spawn(async move {
            prober
                .is_open(address, port, probe_timeout)
                .await
                .then_some(port)
        });
    }

    while let Some(joined) = probes.join_next().await {
        if let Ok(Some(port)) = joined {
            share.open_ports.insert(port);
        }
    }

    trace!("{} {address}: open {:?}", share.host, share.open_ports);
    share
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
