use std::sync::Arc;
use std::time::{Duration, Instant};

use colored::*;
use tracing::{Instrument, info_span};

use launchpad_common::config::Config;
use launchpad_common::models::share::DiscoveredShare;
use launchpad_core::NetworkDiscoveryService;
use launchpad_core::network::{MdnsServiceBrowser, SystemHostResolver, TcpPortProber};

use crate::lprint;
use crate::terminal::{colors, format, print, spinner};

pub async fn discover(timeout: Duration, cfg: &Config) -> anyhow::Result<()> {
    let service: NetworkDiscoveryService = NetworkDiscoveryService::new(
        Arc::new(MdnsServiceBrowser::new(timeout / 2)),
        Arc::new(TcpPortProber::new()),
        Arc::new(SystemHostResolver),
        cfg.clone(),
    );

    let span = info_span!("discovery", indicatif.pb_show = true);
    let start_time: Instant = Instant::now();
    let shares: Vec<DiscoveredShare> = async {
        spinner::set_message("Listening for share announcements...");
        service.scan_for_shares(timeout).await
    }
    .instrument(span)
    .await;

    discovery_ends(&shares, start_time.elapsed(), cfg);
    Ok(())
}

fn discovery_ends(shares: &[DiscoveredShare], total_time: Duration, cfg: &Config) {
    if shares.is_empty() {
        print::no_results("shares", cfg.quiet);
        return;
    }

    if cfg.quiet > 0 {
        lprint!();
    }

    print::header("Network Shares", cfg.quiet);
    for (idx, share) in shares.iter().enumerate() {
        match cfg.quiet {
            2 => print::print(&format!("{}://{}", share.kind.scheme(), share.host)),
            _ => {
                print::tree_head(idx, &share.name);
                print::as_tree_one_level(format::share_to_details(share));
                if idx + 1 != shares.len() {
                    lprint!();
                }
            }
        }
    }
    print_summary(shares.len(), total_time, cfg);
}

fn print_summary(count: usize, total_time: Duration, cfg: &Config) {
    let found: ColoredString = format!("{count} shares").bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString = format!("Discovery Complete: {found} found in {total_time}").color(colors::TEXT_DEFAULT);

    print::summary(&output.to_string(), cfg.quiet);
}
