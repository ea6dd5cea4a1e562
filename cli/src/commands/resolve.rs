use colored::*;

use launchpad_common::config::Config;
use launchpad_common::models::address::NetworkProfile;
use launchpad_common::models::item::LaunchableItem;
use launchpad_common::resolve;

use crate::terminal::{colors, print};

pub fn resolve(item: &LaunchableItem, profile: NetworkProfile, cfg: &Config) -> anyhow::Result<()> {
    print::header(&format!("resolving {}", item.name()), cfg.quiet);

    let target: String = match item {
        LaunchableItem::Bookmark(bookmark) => resolve::resolve_and_build_url(bookmark, profile)?,
        LaunchableItem::Ssh(ssh) => {
            let host: &str = resolve::resolve_host(&ssh.network_addresses, profile)?;
            format!("{}@{}:{}", ssh.username(), host, ssh.port())
        }
        LaunchableItem::App(app) => app.app_path.clone(),
    };

    if cfg.quiet > 1 {
        print::print(&target);
        return Ok(());
    }

    print::set_key_width(["Item", "Profile", "Target", "Port"]);
    print::aligned_line("Item", item.name());
    print::aligned_line("Profile", profile.as_str());
    print::aligned_line("Target", target.color(colors::URL).bold());
    if let Some(port) = effective_port(item) {
        print::aligned_line("Port", port.to_string());
    }
    Ok(())
}

/// Port the launch will actually connect to, with scheme defaults filled in.
fn effective_port(item: &LaunchableItem) -> Option<u16> {
    match item {
        LaunchableItem::Bookmark(bookmark) => bookmark
            .port
            .filter(|p| *p != 0)
            .or_else(|| resolve::default_port(bookmark.protocol())),
        LaunchableItem::Ssh(ssh) => Some(ssh.port()),
        LaunchableItem::App(_) => None,
    }
}
