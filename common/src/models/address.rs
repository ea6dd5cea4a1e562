use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which network context the user is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkProfile {
    #[default]
    Local,
    Tailscale,
    Vpn,
    Custom,
}

impl NetworkProfile {
    pub const ALL: [NetworkProfile; 4] = [
        NetworkProfile::Local,
        NetworkProfile::Tailscale,
        NetworkProfile::Vpn,
        NetworkProfile::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkProfile::Local => "local",
            NetworkProfile::Tailscale => "tailscale",
            NetworkProfile::Vpn => "vpn",
            NetworkProfile::Custom => "custom",
        }
    }
}

impl fmt::Display for NetworkProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" | "lan" => Ok(NetworkProfile::Local),
            "tailscale" | "ts" => Ok(NetworkProfile::Tailscale),
            "vpn" => Ok(NetworkProfile::Vpn),
            "custom" => Ok(NetworkProfile::Custom),
            other => Err(format!("invalid network profile: {other}")),
        }
    }
}

/// Host strings an item can be reached at, one slot per profile.
///
/// Every slot is optional and an empty string counts as unset. A set with no
/// slots filled is valid and simply never resolves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkAddressSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tailscale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
}

impl NetworkAddressSet {
    pub fn with_local(mut self, host: impl Into<String>) -> Self {
        self.local = Some(host.into());
        self
    }

    pub fn with_tailscale(mut self, host: impl Into<String>) -> Self {
        self.tailscale = Some(host.into());
        self
    }

    pub fn with_vpn(mut self, host: impl Into<String>) -> Self {
        self.vpn = Some(host.into());
        self
    }

    pub fn with_custom(mut self, host: impl Into<String>) -> Self {
        self.custom = Some(host.into());
        self
    }

    /// The address stored for exactly `profile`, ignoring fallbacks.
    pub fn get(&self, profile: NetworkProfile) -> Option<&str> {
        let slot: &Option<String> = match profile {
            NetworkProfile::Local => &self.local,
            NetworkProfile::Tailscale => &self.tailscale,
            NetworkProfile::Vpn => &self.vpn,
            NetworkProfile::Custom => &self.custom,
        };
        slot.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        NetworkProfile::ALL.iter().all(|p| self.get(*p).is_none())
    }
}
