//! Picks the interface multicast discovery should be sent from.
//!
//! Multicast queries leave through whichever interface the socket is bound
//! to, so binding to the LAN address keeps them off VPN and overlay links.

use std::net::Ipv4Addr;

use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::IpNetwork;
use tracing::debug;

#[cfg(target_os = "linux")]
use linux_impl::{is_physical, is_wireless};
#[cfg(target_os = "macos")]
use macos_impl::{is_physical, is_wireless};
#[cfg(not(any(target_os = "linux", target_os = "macos")))]
use fallback_impl::{is_physical, is_wireless};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ViabilityError {
    /// The interface is operationally down.
    IsDown,
    /// Loopback, virtual bridge or anything the platform check rejects.
    NotPhysical,
    /// The interface cannot send multicast (required for mDNS).
    NotMulticast,
    /// The interface is a point-to-point link (e.g., a VPN or Tailscale).
    IsPointToPoint,
    /// The interface has no private IPv4 address to bind to.
    NoPrivateIpv4,
}

/// Private IPv4 address of the best LAN interface, if there is one.
pub fn lan_ipv4() -> Option<Ipv4Addr> {
    let interfaces: Vec<NetworkInterface> = pnet::datalink::interfaces()
        .into_iter()
        .filter(|interface| match is_viable_discovery_interface(interface, is_physical) {
            Ok(()) => true,
            Err(reason) => {
                debug!("Skipping interface {}: {reason:?}", interface.name);
                false
            }
        })
        .collect();

    let interface: NetworkInterface = select_best_lan_interface(interfaces, is_wired)?;
    debug!("Using interface {} for discovery", interface.name);
    private_ipv4(&interface)
}

fn private_ipv4(interface: &NetworkInterface) -> Option<Ipv4Addr> {
    interface.ips.iter().find_map(|net| match net {
        IpNetwork::V4(v4) if v4.ip().is_private() => Some(v4.ip()),
        _ => None,
    })
}

fn is_viable_discovery_interface(
    interface: &NetworkInterface,
    is_physical: impl Fn(&NetworkInterface) -> bool,
) -> Result<(), ViabilityError> {
    if !interface.is_up() {
        return Err(ViabilityError::IsDown);
    }
    if interface.is_loopback() || !is_physical(interface) {
        return Err(ViabilityError::NotPhysical);
    }
    if interface.is_point_to_point() {
        return Err(ViabilityError::IsPointToPoint);
    }
    if !interface.is_multicast() {
        return Err(ViabilityError::NotMulticast);
    }
    if private_ipv4(interface).is_none() {
        return Err(ViabilityError::NoPrivateIpv4);
    }
    Ok(())
}

fn select_best_lan_interface(
    interfaces: Vec<NetworkInterface>,
    is_wired: impl Fn(&NetworkInterface) -> bool,
) -> Option<NetworkInterface> {
    match interfaces.len() {
        0 => None,
        1 => interfaces.into_iter().next(),
        _ => {
            let wired: Option<usize> = interfaces.iter().position(|interface| is_wired(interface));
            interfaces.into_iter().nth(wired.unwrap_or(0))
        }
    }
}

fn is_wired(interface: &NetworkInterface) -> bool {
    is_physical(interface) && !is_wireless(interface)
}

#[cfg(target_os = "linux")]
mod linux_impl {
    use super::*;
    use std::path::Path;

    pub fn is_physical(interface: &NetworkInterface) -> bool {
        Path::new(&format!("/sys/class/net/{}/device", interface.name)).exists()
    }

    pub fn is_wireless(interface: &NetworkInterface) -> bool {
        Path::new(&format!("/sys/class/net/{}/wireless", interface.name)).exists()
    }
}

#[cfg(target_os = "macos")]
mod macos_impl {
    use super::*;
    use std::collections::HashSet;
    use std::process::Command;
    use std::sync::OnceLock;

    struct HardwareInfo {
        physical_devices: HashSet<String>,
        wireless_devices: HashSet<String>,
    }

    /// Runs `networksetup` once on first access.
    fn get_hardware_info() -> &'static HardwareInfo {
        static HARDWARE_INFO: OnceLock<HardwareInfo> = OnceLock::new();

        HARDWARE_INFO.get_or_init(|| {
            let mut physical: HashSet<String> = HashSet::new();
            let mut wireless: HashSet<String> = HashSet::new();

            if let Ok(output) = Command::new("networksetup").arg("-listallhardwareports").output() {
                let stdout = String::from_utf8_lossy(&output.stdout);
                for line in stdout.lines() {
                    if let Some(device) = line.strip_prefix("Device: ") {
                        physical.insert(device.trim().to_string());
                    }
                }
            }

            for device in &physical {
                let is_wifi: bool = Command::new("networksetup")
                    .arg("-getairportnetwork")
                    .arg(device)
                    .output()
                    .map(|out| out.status.success())
                    .unwrap_or(false);

                if is_wifi {
                    wireless.insert(device.clone());
                }
            }

            HardwareInfo {
                physical_devices: physical,
                wireless_devices: wireless,
            }
        })
    }

    pub fn is_physical(interface: &NetworkInterface) -> bool {
        get_hardware_info().physical_devices.contains(&interface.name)
    }

    pub fn is_wireless(interface: &NetworkInterface) -> bool {
        get_hardware_info().wireless_devices.contains(&interface.name)
    }
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
mod fallback_impl {
    use super::*;

    pub fn is_physical(interface: &NetworkInterface) -> bool {
        interface.mac.is_some()
    }

    pub fn is_wireless(interface: &NetworkInterface) -> bool {
        let name: String = interface.description.to_ascii_lowercase();
        name.contains("wi-fi") || name.contains("wireless")
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

#[cfg(test)]
mod tests {
    use super::*;
    use pnet::util::MacAddr;

    const IFF_UP: u32 = 1;
    const IFF_BROADCAST: u32 = 1 << 1;
    const IFF_LOOPBACK: u32 = 1 << 3;
    const IFF_POINTTOPOINT: u32 = 1 << 4;
    #[cfg(target_os = "macos")]
    const IFF_MULTICAST: u32 = 0x8000;
    #[cfg(not(target_os = "macos"))]
    const IFF_MULTICAST: u32 = 0x1000;

    const LAN_FLAGS: u32 = IFF_UP | IFF_BROADCAST | IFF_MULTICAST;

    fn create_mock_interface(name: &str, ips: Vec<IpNetwork>, flags: u32) -> NetworkInterface {
        NetworkInterface {
            name: name.to_string(),
            description: "An interface".to_string(),
            index: 0,
            mac: Some(MacAddr(0x1, 0x2, 0x3, 0x4, 0x5, 0x6)),
            ips,
            flags,
        }
    }

    fn default_ips() -> Vec<IpNetwork> {
        vec![IpNetwork::V4("192.168.1.100/24".parse().unwrap())]
    }

    fn always_physical(_: &NetworkInterface) -> bool {
        true
    }

    #[test]
    fn viable_lan_interface_passes() {
        let interface = create_mock_interface("eth0", default_ips(), LAN_FLAGS);
        assert_eq!(is_viable_discovery_interface(&interface, always_physical), Ok(()));
    }

    #[test]
    fn down_interface_is_rejected() {
        let interface = create_mock_interface("wlan0", default_ips(), IFF_BROADCAST | IFF_MULTICAST);
        assert_eq!(
            is_viable_discovery_interface(&interface, always_physical),
            Err(ViabilityError::IsDown)
        );
    }

    #[test]
    fn loopback_is_rejected() {
        let interface = create_mock_interface("lo", default_ips(), LAN_FLAGS | IFF_LOOPBACK);
        assert_eq!(
            is_viable_discovery_interface(&interface, always_physical),
            Err(ViabilityError::NotPhysical)
        );
    }

    #[test]
    fn tailscale_tunnel_is_rejected() {
        let ips = vec![IpNetwork::V4("100.101.102.103/32".parse().unwrap())];
        let interface = create_mock_interface("tailscale0", ips, LAN_FLAGS | IFF_POINTTOPOINT);
        assert_eq!(
            is_viable_discovery_interface(&interface, always_physical),
            Err(ViabilityError::IsPointToPoint)
        );
    }

    #[test]
    fn interface_without_multicast_is_rejected() {
        let interface = create_mock_interface("eth0", default_ips(), IFF_UP | IFF_BROADCAST);
        assert_eq!(
            is_viable_discovery_interface(&interface, always_physical),
            Err(ViabilityError::NotMulticast)
        );
    }

    #[test]
    fn public_only_interface_is_rejected() {
        let ips = vec![
            IpNetwork::V4("203.0.113.7/24".parse().unwrap()),
            IpNetwork::V6("fe80::1/64".parse().unwrap()),
        ];
        let interface = create_mock_interface("eth0", ips, LAN_FLAGS);
        assert_eq!(
            is_viable_discovery_interface(&interface, always_physical),
            Err(ViabilityError::NoPrivateIpv4)
        );
    }

    #[test]
    fn wired_interface_wins_over_wireless() {
        let wireless = create_mock_interface("wlan0", default_ips(), LAN_FLAGS);
        let wired = create_mock_interface("eth0", default_ips(), LAN_FLAGS);
        let is_wired = |interface: &NetworkInterface| interface.name == "eth0";
        let selected = select_best_lan_interface(vec![wireless, wired], is_wired);
        assert_eq!(selected.map(|i| i.name), Some("eth0".to_string()));
    }

    #[test]
    fn first_interface_wins_without_wired_candidate() {
        let a = create_mock_interface("wlan0", default_ips(), LAN_FLAGS);
        let b = create_mock_interface("wlan1", default_ips(), LAN_FLAGS);
        let selected = select_best_lan_interface(vec![a, b], |_| false);
        assert_eq!(selected.map(|i| i.name), Some("wlan0".to_string()));
    }

    #[test]
    fn no_candidates_selects_nothing() {
        assert!(select_best_lan_interface(vec![], |_| true).is_none());
    }

    #[test]
    fn private_ipv4_skips_ipv6_and_public() {
        let ips = vec![
            IpNetwork::V6("fe80::1/64".parse().unwrap()),
            IpNetwork::V4("203.0.113.7/24".parse().unwrap()),
            IpNetwork::V4("10.0.0.15/24".parse().unwrap()),
        ];
        let interface = create_mock_interface("eth0", ips, LAN_FLAGS);
        assert_eq!(private_ipv4(&interface), Some(Ipv4Addr::new(10, 0, 0, 15)));
    }
}
