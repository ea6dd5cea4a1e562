use serde::{Deserialize, Serialize};

use super::address::NetworkAddressSet;

pub const DEFAULT_PROTOCOL: &str = "https";
pub const DEFAULT_SSH_PORT: u16 = 22;
pub const DEFAULT_SSH_USER: &str = "root";

/// Something the dashboard can open. Items are owned by the caller; the
/// services only ever borrow them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LaunchableItem {
    Bookmark(BookmarkItem),
    Ssh(SshItem),
    App(AppItem),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub network_addresses: NetworkAddressSet,
    /// URL scheme, `https` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SshItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub network_addresses: NetworkAddressSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppItem {
    pub id: String,
    pub name: String,
    pub app_path: String,
    #[serde(default)]
    pub arguments: Vec<String>,
}

impl LaunchableItem {
    pub fn id(&self) -> &str {
        match self {
            LaunchableItem::Bookmark(b) => &b.id,
            LaunchableItem::Ssh(s) => &s.id,
            LaunchableItem::App(a) => &a.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            LaunchableItem::Bookmark(b) => &b.name,
            LaunchableItem::Ssh(s) => &s.name,
            LaunchableItem::App(a) => &a.name,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            LaunchableItem::Bookmark(_) => "bookmark",
            LaunchableItem::Ssh(_) => "ssh",
            LaunchableItem::App(_) => "app",
        }
    }

    /// Apps run locally and have no addresses.
    pub fn network_addresses(&self) -> Option<&NetworkAddressSet> {
        match self {
            LaunchableItem::Bookmark(b) => Some(&b.network_addresses),
            LaunchableItem::Ssh(s) => Some(&s.network_addresses),
            LaunchableItem::App(_) => None,
        }
    }

    pub fn as_bookmark(&self) -> Option<&BookmarkItem> {
        match self {
            LaunchableItem::Bookmark(b) => Some(b),
            _ => None,
        }
    }
}

impl BookmarkItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            network_addresses: NetworkAddressSet::default(),
            protocol: None,
            port: None,
            path: None,
        }
    }

    pub fn with_addresses(mut self, addresses: NetworkAddressSet) -> Self {
        self.network_addresses = addresses;
        self
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn protocol(&self) -> &str {
        self.protocol
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PROTOCOL)
    }
}

impl SshItem {
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_SSH_PORT)
    }

    pub fn username(&self) -> &str {
        self.username
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_SSH_USER)
    }
}
