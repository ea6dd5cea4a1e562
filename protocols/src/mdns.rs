//! mDNS / DNS-SD wire handling.
//!
//! Query construction goes through `dns_parser::Builder`; responses are
//! flattened into [`MdnsRecords`] and stitched together across packets by
//! [`ServiceCollector`], since responders often split PTR, SRV and address
//! records over several datagrams.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::net::{IpAddr, Ipv4Addr};

use anyhow::{Context, Result};
use dns_parser::{Builder, Packet, QueryClass, QueryType, RData};
use tracing::trace;

use launchpad_common::models::share::{ServiceAnnouncement, ShareKind};

use crate::services::{self, kind_for_service};

pub const MDNS_ADDR: Ipv4Addr = Ipv4Addr::new(224, 0, 0, 251);
pub const MDNS_PORT: u16 = 5353;

/// Largest query sent; the classic DNS-over-UDP limit.
pub const MAX_QUERY_LEN: usize = 512;
const HEADER_LEN: usize = 12;
/// QTYPE and QCLASS after each question name.
const QUESTION_TAIL_LEN: usize = 4;
/// `dns_parser` rejects labels of this length and above.
const MAX_LABEL_LEN: usize = 63;

/// Random transaction id for a query.
pub fn query_id() -> u16 {
    rand::random::<u16>()
}

/// PTR questions for every service type in `kinds`.
///
/// Sent from an ephemeral port these are legacy unicast queries, so
/// responders answer directly to the sender.
pub fn create_browse_query(kinds: &[ShareKind], id: u16) -> Result<Vec<u8>> {
    let names: Vec<String> = kinds
        .iter()
        .map(|kind| services::service_type(*kind).fqdn())
        .collect();

    let mut builder: Builder = Builder::new_query(id, false);
    for name in &names {
        builder.add_question(name, true, QueryType::PTR, QueryClass::IN);
    }
    finish(builder)
}

/// SRV questions for instances whose PTR arrived without one, plus A
/// questions for targets that came without addresses.
///
/// Questions are spread over as many packets as needed to keep each one
/// within [`MAX_QUERY_LEN`]. Names the encoder cannot represent are skipped.
pub fn create_resolve_queries(instances: &[String], hosts: &[String]) -> Vec<Vec<u8>> {
    let questions = instances
        .iter()
        .map(|name| (name.as_str(), QueryType::SRV))
        .chain(hosts.iter().map(|name| (name.as_str(), QueryType::A)));

    let mut batches: Vec<Vec<(&str, QueryType)>> = Vec::new();
    let mut current: Vec<(&str, QueryType)> = Vec::new();
    let mut current_len: usize = HEADER_LEN;

    for (name, qtype) in questions {
        let Some(question_len) = encoded_name_len(name).map(|len| len + QUESTION_TAIL_LEN) else {
            trace!("Not asking for {name}: label too long");
            continue;
        };
        if HEADER_LEN + question_len > MAX_QUERY_LEN {
            trace!("Not asking for {name}: name too long");
            continue;
        }
        if current_len + question_len > MAX_QUERY_LEN {
            batches.push(std::mem::take(&mut current));
            current_len = HEADER_LEN;
        }
        current.push((name, qtype));
        current_len += question_len;
    }
    if !current.is_empty() {
        batches.push(current);
    }

    batches
        .into_iter()
        .filter_map(|batch| {
            let mut builder: Builder = Builder::new_query(query_id(), false);
            for (name, qtype) in batch {
                builder.add_question(name, true, qtype, QueryClass::IN);
            }
            finish(builder)
                .inspect_err(|e| trace!("Dropping follow-up query: {e:#}"))
                .ok()
        })
        .collect()
}

/// Bytes `name` occupies in a question, or `None` when one of its labels is
/// longer than the encoder accepts.
fn encoded_name_len(name: &str) -> Option<usize> {
    name.split('.').try_fold(1, |len: usize, label: &str| {
        (label.len() < MAX_LABEL_LEN).then_some(len + label.len() + 1)
    })
}

fn finish(builder: Builder) -> Result<Vec<u8>> {
    builder
        .build()
        .map_err(|_| anyhow::anyhow!("mDNS query does not fit in a single packet"))
}

/// Records of interest from one response, keyed by lowercase owner name.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MdnsRecords {
    /// `(service type, instance fqdn)` pairs from PTR answers.
    pub pointers: Vec<(ShareKind, String)>,
    /// Instance fqdn to `(target host, port)` from SRV answers.
    pub services: HashMap<String, (String, u16)>,
    pub addresses: HashMap<String, HashSet<IpAddr>>,
}

impl MdnsRecords {
    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty() && self.services.is_empty() && self.addresses.is_empty()
    }
}

pub fn extract_records(data: &[u8]) -> Result<MdnsRecords> {
    let packet = Packet::parse(data).context("failed to parse mDNS packet")?;
    let mut records: MdnsRecords = MdnsRecords::default();

    if packet.header.query {
        return Ok(records);
    }

    for record in packet.answers.iter().chain(packet.additional.iter()) {
        let owner: String = normalize(&record.name.to_string());

        match &record.data {
            RData::PTR(ptr) => {
                if let Some(kind) = kind_for_service(&owner) {
                    records.pointers.push((kind, ptr.0.to_string()));
                }
            }

            RData::SRV(srv) => {
                let target: String = srv.target.to_string();
                records.services.insert(owner, (target, srv.port));
            }

            RData::A(a) => {
                records.addresses.entry(owner).or_default().insert(IpAddr::V4(a.0));
            }

            RData::AAAA(aaaa) => {
                records.addresses.entry(owner).or_default().insert(IpAddr::V6(aaaa.0));
            }

            _ => {}
        }
    }

    Ok(records)
}

fn normalize(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}

#[derive(Debug)]
struct PendingInstance {
    fqdn: String,
    kind: ShareKind,
    target: Option<(String, u16)>,
    /// Number of addresses carried by the last emitted announcement.
    emitted: Option<usize>,
}

/// Accumulates records across responses and yields announcements once an
/// instance's SRV target is known.
#[derive(Debug, Default)]
pub struct ServiceCollector {
    instances: HashMap<String, PendingInstance>,
    addresses: HashMap<String, BTreeSet<IpAddr>>,
}

impl ServiceCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `records` and returns announcements that are new or gained
    /// addresses since they were last returned.
    pub fn ingest(&mut self, records: MdnsRecords) -> Vec<ServiceAnnouncement> {
        for (kind, fqdn) in records.pointers {
            self.instances
                .entry(normalize(&fqdn))
                .or_insert_with(|| PendingInstance {
                    fqdn,
                    kind,
                    target: None,
                    emitted: None,
                });
        }

        for (owner, addrs) in records.addresses {
            self.addresses.entry(owner).or_default().extend(addrs);
        }

        for (owner, target) in records.services {
            if let Some(instance) = self.instances.get_mut(&owner) {
                instance.target = Some(target);
            } else {
                trace!("SRV for unknown instance {owner}");
            }
        }

        let mut ready: Vec<ServiceAnnouncement> = Vec::new();
        for instance in self.instances.values_mut() {
            let Some((host, port)) = &instance.target else {
                continue;
            };
            let addresses: BTreeSet<IpAddr> = self
                .addresses
                .get(&normalize(host))
                .cloned()
                .unwrap_or_default();

            if instance.emitted.is_some_and(|count| count >= addresses.len()) {
                continue;
            }
            instance.emitted = Some(addresses.len());

            ready.push(ServiceAnnouncement {
                instance: instance_label(&instance.fqdn, instance.kind),
                kind: instance.kind,
                host: host.trim_end_matches('.').to_string(),
                port: *port,
                addresses,
            });
        }
        ready
    }

    /// Instance names still waiting for an SRV record.
    pub fn unresolved_instances(&self) -> Vec<String> {
        self.instances
            .values()
            .filter(|instance| instance.target.is_none())
            .map(|instance| instance.fqdn.clone())
            .collect()
    }

    /// SRV targets no address record has been seen for.
    pub fn hosts_without_addresses(&self) -> Vec<String> {
        let mut hosts: Vec<String> = self
            .instances
            .values()
            .filter_map(|instance| instance.target.as_ref())
            .map(|(host, _)| normalize(host))
            .filter(|host| !self.addresses.contains_key(host))
            .collect();
        hosts.sort();
        hosts.dedup();
        hosts
    }
}

/// `NAS (Time Machine)._smb._tcp.local` becomes `NAS (Time Machine)`.
fn instance_label(fqdn: &str, kind: ShareKind) -> String {
    let suffix: String = format!(".{}", services::service_type(kind).fqdn());
    let trimmed: &str = fqdn.trim_end_matches('.');
    let lower: String = trimmed.to_ascii_lowercase();
    if lower.ends_with(&suffix) {
        trimmed[..trimmed.len() - suffix.len()].to_string()
    } else {
        trimmed.to_string()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
