use std::sync::Arc;
use std::time::{Duration, Instant};

use colored::*;
use tracing::{Instrument, info_span};

use launchpad_common::config::Config;
use launchpad_common::models::address::NetworkProfile;
use launchpad_common::models::health::{HealthCheckResult, HealthStatus};
use launchpad_common::models::item::{BookmarkItem, LaunchableItem};
use launchpad_core::HealthChecker;
use launchpad_core::network::ReqwestProber;

use crate::lprint;
use crate::terminal::{colors, format, print, spinner};

pub async fn check(
    items: &[LaunchableItem],
    ids: &[String],
    profile: NetworkProfile,
    cfg: &Config,
) -> anyhow::Result<()> {
    let bookmarks: Vec<BookmarkItem> = select_bookmarks(items, ids)?;
    if bookmarks.is_empty() {
        print::no_results("bookmarks", cfg.quiet);
        return Ok(());
    }

    let prober: ReqwestProber = ReqwestProber::new(cfg.insecure_tls)?;
    let mut checker: HealthChecker = HealthChecker::new(Arc::new(prober), cfg.clone());

    let span = info_span!("check", indicatif.pb_show = true);
    let start_time: Instant = Instant::now();
    let results: Vec<HealthCheckResult> = checker
        .check_many_with_progress(&bookmarks, profile, |current, total, result| {
            spinner::report_progress(current, total, &result.item_id);
        })
        .instrument(span)
        .await;

    print::header(&format!("health on {profile}"), cfg.quiet);
    for (idx, (item, result)) in bookmarks.iter().zip(&results).enumerate() {
        match cfg.quiet {
            2 => print::print(&format!(
                "{} {}",
                format::status_label(result.status),
                result.url.as_deref().unwrap_or(&item.id)
            )),
            _ => {
                print::tree_head(idx, &item.name);
                print::as_tree_one_level(format::health_to_details(result));
                if idx + 1 != results.len() {
                    lprint!();
                }
            }
        }
    }

    print_summary(&results, start_time.elapsed(), cfg);
    Ok(())
}

fn select_bookmarks(items: &[LaunchableItem], ids: &[String]) -> anyhow::Result<Vec<BookmarkItem>> {
    if ids.is_empty() {
        return Ok(items.iter().filter_map(LaunchableItem::as_bookmark).cloned().collect());
    }

    ids.iter()
        .map(|id| {
            let item: &LaunchableItem = super::find_item(items, id)?;
            item.as_bookmark()
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("{id} is a {} item, only bookmarks can be checked", item.kind()))
        })
        .collect()
}

fn print_summary(results: &[HealthCheckResult], total_time: Duration, cfg: &Config) {
    let healthy: usize = results.iter().filter(|r| r.status == HealthStatus::Healthy).count();
    let healthy: ColoredString = format!("{healthy}/{} healthy", results.len()).bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString = format!("Health Check Complete: {healthy} in {total_time}").color(colors::TEXT_DEFAULT);

    print::summary(&output.to_string(), cfg.quiet);
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
