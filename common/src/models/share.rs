use std::collections::BTreeSet;
use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// Kind of service a discovered share speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareKind {
    Smb,
    Afp,
    Http,
    WebDav,
    Ftp,
    Nfs,
    Sftp,
}

impl ShareKind {
    pub fn label(&self) -> &'static str {
        match self {
            ShareKind::Smb => "SMB",
            ShareKind::Afp => "AFP",
            ShareKind::Http => "HTTP",
            ShareKind::WebDav => "WebDAV",
            ShareKind::Ftp => "FTP",
            ShareKind::Nfs => "NFS",
            ShareKind::Sftp => "SFTP",
        }
    }

    /// URL scheme a bookmark for this share would use.
    pub fn scheme(&self) -> &'static str {
        match self {
            ShareKind::Smb => "smb",
            ShareKind::Afp => "afp",
            ShareKind::Http | ShareKind::WebDav => "http",
            ShareKind::Ftp => "ftp",
            ShareKind::Nfs => "nfs",
            ShareKind::Sftp => "sftp",
        }
    }
}

impl fmt::Display for ShareKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One advertised service instance as reported by a service browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceAnnouncement {
    /// Instance name, e.g. `NAS (Time Machine)`.
    pub instance: String,
    pub kind: ShareKind,
    /// SRV target host, e.g. `nas.local`.
    pub host: String,
    pub port: u16,
    /// Addresses carried in the same response. May be empty.
    pub addresses: BTreeSet<IpAddr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredShare {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ShareKind,
    pub host: String,
    pub address: Option<IpAddr>,
    /// Port of the first advertisement seen.
    pub port: u16,
    /// Every port advertised for this host and kind, confirmed or not.
    #[serde(default)]
    pub advertised_ports: BTreeSet<u16>,
    /// Ports confirmed listening by a TCP connect.
    pub open_ports: BTreeSet<u16>,
}

/// Shares are merged when they agree on host and kind.
pub type ShareKey = (String, ShareKind);

impl DiscoveredShare {
    pub fn key(&self) -> ShareKey {
        share_key(&self.host, self.kind)
    }

    /// Folds a duplicate advertisement into this share.
    pub fn merge(&mut self, other: DiscoveredShare) {
        if self.address.is_none() {
            self.address = other.address;
        }
        self.advertised_ports.extend(other.advertised_ports);
        self.open_ports.extend(other.open_ports);
    }
}

impl From<&ServiceAnnouncement> for DiscoveredShare {
    fn from(announcement: &ServiceAnnouncement) -> Self {
        let address: Option<IpAddr> = announcement
            .addresses
            .iter()
            .find(|ip| ip.is_ipv4())
            .or_else(|| announcement.addresses.iter().next())
            .copied();

        Self {
            name: announcement.instance.clone(),
            kind: announcement.kind,
            host: announcement.host.clone(),
            address,
            port: announcement.port,
            advertised_ports: BTreeSet::from([announcement.port]),
            open_ports: BTreeSet::new(),
        }
    }
}

pub fn share_key(host: &str, kind: ShareKind) -> ShareKey {
    (host.trim_end_matches('.').to_ascii_lowercase(), kind)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
