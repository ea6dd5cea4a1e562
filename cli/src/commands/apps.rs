use std::sync::Arc;

use anyhow::Context;

use launchpad_common::config::Config;
use launchpad_common::models::app::RunningApp;
use launchpad_common::models::item::LaunchableItem;
use launchpad_core::RunningApps;
use launchpad_core::network::TokioCommandRunner;

use crate::lprint;
use crate::terminal::{format, print};

pub async fn apps(as_items: bool, cfg: &Config) -> anyhow::Result<()> {
    let service: RunningApps = RunningApps::new(Arc::new(TokioCommandRunner), cfg.clone());
    let apps: Vec<RunningApp> = service.list().await;

    if as_items {
        let items: Vec<LaunchableItem> = apps.iter().map(RunningApp::to_item).collect();
        let json: String = serde_json::to_string_pretty(&items).context("failed to serialize app items")?;
        print::print(&json);
        return Ok(());
    }

    if apps.is_empty() {
        print::no_results("running apps", cfg.quiet);
        return Ok(());
    }

    print::header("running applications", cfg.quiet);
    for (idx, app) in apps.iter().enumerate() {
        match cfg.quiet {
            2 => print::print(&app.path),
            _ => {
                print::tree_head(idx, &app.name);
                print::as_tree_one_level(format::app_to_details(app));
                if idx + 1 != apps.len() {
                    lprint!();
                }
            }
        }
    }
    Ok(())
}
