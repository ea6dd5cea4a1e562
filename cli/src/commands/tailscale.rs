use std::sync::Arc;

use colored::*;

use launchpad_common::config::Config;
use launchpad_common::models::address::NetworkProfile;
use launchpad_common::models::item::LaunchableItem;
use launchpad_common::models::tailscale::TailscaleStatus;
use launchpad_core::TailscaleService;
use launchpad_core::network::TokioCommandRunner;

use crate::terminal::{colors, format, print};

pub async fn tailscale(suggest_for: Option<&LaunchableItem>, cfg: &Config) -> anyhow::Result<()> {
    let mut service: TailscaleService = TailscaleService::new(Arc::new(TokioCommandRunner), cfg.clone());
    let status: TailscaleStatus = service.get_status().await;

    print::header("tailscale", cfg.quiet);
    print::as_tree_one_level(format::tailscale_to_details(&status));

    let Some(item) = suggest_for else {
        return Ok(());
    };
    let Some(addresses) = item.network_addresses() else {
        anyhow::bail!("{} has no network addresses", item.name());
    };

    let profile: NetworkProfile = service
        .detect_best_profile(addresses.local.as_deref(), addresses.tailscale.as_deref())
        .await;
    print::print_status(format!(
        "Suggested profile for {}: {}",
        item.name(),
        profile.as_str().color(colors::PRIMARY).bold()
    ));
    Ok(())
}
