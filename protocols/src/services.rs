//! DNS-SD service types that advertise file shares and web front-ends.

use launchpad_common::models::share::ShareKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceType {
    pub kind: ShareKind,
    /// Service name without the `.local` domain, e.g. `_smb._tcp`.
    pub name: &'static str,
    pub default_port: u16,
}

pub const SHARE_SERVICES: [ServiceType; 7] = [
    ServiceType { kind: ShareKind::Smb, name: "_smb._tcp", default_port: 445 },
    ServiceType { kind: ShareKind::Afp, name: "_afpovertcp._tcp", default_port: 548 },
    ServiceType { kind: ShareKind::Http, name: "_http._tcp", default_port: 80 },
    ServiceType { kind: ShareKind::WebDav, name: "_webdav._tcp", default_port: 80 },
    ServiceType { kind: ShareKind::Ftp, name: "_ftp._tcp", default_port: 21 },
    ServiceType { kind: ShareKind::Nfs, name: "_nfs._tcp", default_port: 2049 },
    ServiceType { kind: ShareKind::Sftp, name: "_sftp-ssh._tcp", default_port: 22 },
];

pub const LOCAL_DOMAIN: &str = "local";

pub fn service_type(kind: ShareKind) -> &'static ServiceType {
    SHARE_SERVICES
        .iter()
        .find(|service| service.kind == kind)
        .unwrap_or(&SHARE_SERVICES[0])
}

impl ServiceType {
    /// Fully qualified query name, e.g. `_smb._tcp.local`.
    pub fn fqdn(&self) -> String {
        format!("{}.{LOCAL_DOMAIN}", self.name)
    }
}

/// Matches `_smb._tcp.local` (any case, optional trailing dot).
pub fn kind_for_service(name: &str) -> Option<ShareKind> {
    let normalized: String = name.trim_end_matches('.').to_ascii_lowercase();
    SHARE_SERVICES
        .iter()
        .find(|service| normalized == service.fqdn())
        .map(|service| service.kind)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
