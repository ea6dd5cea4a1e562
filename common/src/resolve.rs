//! Address resolution and URL construction.
//!
//! Both halves are pure: the same inputs always give the same output and the
//! address set is only ever borrowed.

use crate::error::ResolutionError;
use crate::models::address::{NetworkAddressSet, NetworkProfile};
use crate::models::item::BookmarkItem;

use NetworkProfile::{Custom, Local, Tailscale, Vpn};

const LOCAL_CHAIN: [NetworkProfile; 4] = [Local, Tailscale, Vpn, Custom];
const TAILSCALE_CHAIN: [NetworkProfile; 2] = [Tailscale, Local];
const VPN_CHAIN: [NetworkProfile; 2] = [Vpn, Local];
const CUSTOM_CHAIN: [NetworkProfile; 2] = [Custom, Local];

/// Order in which address slots are consulted for `profile`.
pub fn fallback_chain(profile: NetworkProfile) -> &'static [NetworkProfile] {
    match profile {
        Local => &LOCAL_CHAIN,
        Tailscale => &TAILSCALE_CHAIN,
        Vpn => &VPN_CHAIN,
        Custom => &CUSTOM_CHAIN,
    }
}

/// First address set along the profile's fallback chain.
///
/// `None` means "unreachable under this profile" and is not an error.
pub fn resolve(addresses: &NetworkAddressSet, profile: NetworkProfile) -> Option<&str> {
    fallback_chain(profile)
        .iter()
        .find_map(|candidate| addresses.get(*candidate))
}

/// Like [`resolve`], for callers that cannot continue without a host.
pub fn resolve_host(
    addresses: &NetworkAddressSet,
    profile: NetworkProfile,
) -> Result<&str, ResolutionError> {
    resolve(addresses, profile).ok_or(ResolutionError::NoAddress(profile))
}

/// Well-known port for `scheme`, omitted from built URLs.
pub fn default_port(scheme: &str) -> Option<u16> {
    match scheme.to_ascii_lowercase().as_str() {
        "http" => Some(80),
        "https" => Some(443),
        "ftp" => Some(21),
        "ssh" => Some(22),
        _ => None,
    }
}

/// Builds `scheme://host[:port]/path` from an already resolved host.
///
/// IPv6 literals get bracketed, default ports are dropped and the path always
/// starts with `/`. Nothing is percent-encoded.
pub fn build_url(
    resolved_host: Option<&str>,
    protocol: &str,
    port: Option<u16>,
    path: Option<&str>,
) -> Result<String, ResolutionError> {
    let host: &str = resolved_host
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or(ResolutionError::MissingHost)?;
    let scheme: String = normalize_scheme(protocol);

    let mut url: String = format!("{scheme}://");

    if host.contains(':') && !host.starts_with('[') {
        url.push('[');
        url.push_str(host);
        url.push(']');
    } else {
        url.push_str(host);
    }

    if let Some(port) = port.filter(|p| *p != 0)
        && default_port(&scheme) != Some(port)
    {
        url.push(':');
        url.push_str(&port.to_string());
    }

    let path: &str = path.unwrap_or_default();
    if !path.starts_with('/') {
        url.push('/');
    }
    url.push_str(path);

    Ok(url)
}

/// Resolves a bookmark's address for `profile` and builds its URL.
pub fn resolve_and_build_url(
    item: &BookmarkItem,
    profile: NetworkProfile,
) -> Result<String, ResolutionError> {
    let host: &str = resolve_host(&item.network_addresses, profile)?;
    build_url(
        Some(host),
        item.protocol(),
        item.port,
        item.path.as_deref(),
    )
}

fn normalize_scheme(protocol: &str) -> String {
    let trimmed: &str = protocol.trim();
    let trimmed: &str = trimmed
        .strip_suffix("://")
        .or_else(|| trimmed.strip_suffix(':'))
        .unwrap_or(trimmed);
    trimmed.to_ascii_lowercase()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
