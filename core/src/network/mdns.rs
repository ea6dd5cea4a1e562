use std::collections::HashSet;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tokio::net::UdpSocket;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, trace};

use launchpad_common::models::share::{ServiceAnnouncement, ShareKind};
use launchpad_common::network::interface;
use launchpad_common::ports::ServiceBrowser;
use launchpad_protocols::mdns::{self, MDNS_ADDR, MDNS_PORT, MdnsRecords, ServiceCollector};

const RECV_BUFFER: usize = 9000;
/// Pause after a failed receive so a broken socket does not spin.
const RECV_RETRY_DELAY: Duration = Duration::from_millis(50);

/// DNS-SD browser speaking legacy unicast mDNS.
///
/// Queries go out from an ephemeral port, so responders reply straight to
/// this socket and nothing has to bind 5353 next to the system daemon.
#[derive(Debug, Clone)]
pub struct MdnsServiceBrowser {
    bind_addr: Ipv4Addr,
    requery_after: Duration,
}

impl MdnsServiceBrowser {
    /// Binds to the best LAN interface, or to all interfaces when none
    /// qualifies. The browse query is repeated once after `requery_after`.
    pub fn new(requery_after: Duration) -> Self {
        let bind_addr: Ipv4Addr = interface::lan_ipv4().unwrap_or(Ipv4Addr::UNSPECIFIED);
        Self::bound_to(bind_addr, requery_after)
    }

    pub fn bound_to(bind_addr: Ipv4Addr, requery_after: Duration) -> Self {
        Self {
            bind_addr,
            requery_after,
        }
    }
}

#[async_trait]
impl ServiceBrowser for MdnsServiceBrowser {
    async fn browse(
        &self,
        kinds: &[ShareKind],
        tx: UnboundedSender<ServiceAnnouncement>,
    ) -> anyhow::Result<()> {
        let socket: UdpSocket = UdpSocket::bind((self.bind_addr, 0))
            .await
            .with_context(|| format!("failed to bind mDNS socket on {}", self.bind_addr))?;
        let destination: SocketAddr = SocketAddr::from((MDNS_ADDR, MDNS_PORT));
        debug!("Browsing {} service types from {}", kinds.len(), socket.local_addr()?);

        let browse_query: Vec<u8> = mdns::create_browse_query(kinds, mdns::query_id())?;
        socket
            .send_to(&browse_query, destination)
            .await
            .context("failed to send mDNS browse query")?;

        let requery = tokio::time::sleep(self.requery_after);
        tokio::pin!(requery);
        let mut requeried: bool = false;

        let mut collector: ServiceCollector = ServiceCollector::new();
        let mut asked: HashSet<String> = HashSet::new();
        let mut buf: Vec<u8> = vec![0; RECV_BUFFER];

        loop {
            tokio::select! {
                _ = &mut requery, if !requeried => {
                    requeried = true;
                    trace!("Repeating mDNS browse query");
                    if let Err(e) = socket.send_to(&browse_query, destination).await {
                        debug!("mDNS re-query failed: {e}");
                    }
                }

                received = socket.recv_from(&mut buf) => {
                    let (len, from) = match received {
                        Ok(received) => received,
                        Err(e) => {
                            debug!("mDNS receive failed: {e}");
                            tokio::time::sleep(RECV_RETRY_DELAY).await;
                            continue;
                        }
                    };

                    let records: MdnsRecords = match mdns::extract_records(&buf[..len]) {
                        Ok(records) => records,
                        Err(e) => {
                            trace!("Ignoring packet from {from}: {e:#}");
                            continue;
                        }
                    };
                    if records.is_empty() {
                        continue;
                    }

                    for announcement in collector.ingest(records) {
                        trace!("{} {} at {}:{}", announcement.kind, announcement.instance, announcement.host, announcement.port);
                        if tx.send(announcement).is_err() {
                            return Ok(());
                        }
                    }

                    let instances: Vec<String> = fresh(collector.unresolved_instances(), &mut asked);
                    let hosts: Vec<String> = fresh(collector.hosts_without_addresses(), &mut asked);
                    if instances.is_empty() && hosts.is_empty() {
                        continue;
                    }

                    for follow_up in mdns::create_resolve_queries(&instances, &hosts) {
                        if let Err(e) = socket.send_to(&follow_up, destination).await {
                            debug!("mDNS follow-up query failed: {e}");
                        }
                    }
                }
            }
        }
    }
}

/// Names not asked about yet; marks them as asked.
fn fresh(names: Vec<String>, asked: &mut HashSet<String>) -> Vec<String> {
    names
        .into_iter()
        .filter(|name| asked.insert(name.to_ascii_lowercase()))
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
