use std::sync::Arc;

use anyhow::Context;
use colored::*;
use tracing::{error, info};

use launchpad_common::config::Config;
use launchpad_common::models::address::NetworkProfile;
use launchpad_common::models::item::LaunchableItem;
use launchpad_core::launcher::LaunchOutcome;
use launchpad_core::{InstalledBrowsers, LaunchDispatcher};

use crate::terminal::{colors, print};

pub struct LaunchRequest<'a> {
    pub ids: &'a [String],
    pub profile: NetworkProfile,
    pub browser: Option<&'a str>,
    pub password_env: Option<&'a str>,
}

pub async fn launch(items: &[LaunchableItem], request: LaunchRequest<'_>, cfg: &Config) -> anyhow::Result<()> {
    let selected: Vec<LaunchableItem> = request
        .ids
        .iter()
        .map(|id| super::find_item(items, id).cloned())
        .collect::<anyhow::Result<Vec<LaunchableItem>>>()?;

    let dispatcher: LaunchDispatcher = LaunchDispatcher::native(Arc::new(InstalledBrowsers::detect()));
    print::header(&format!("launching on {}", request.profile), cfg.quiet);

    if let [item] = selected.as_slice() {
        let password: Option<String> = match request.password_env {
            Some(var) => Some(std::env::var(var).with_context(|| format!("{var} is not set"))?),
            None => None,
        };

        dispatcher
            .launch(item, request.profile, request.browser, password.as_deref())
            .await
            .with_context(|| format!("failed to launch {}", item.name()))?;
        info!("Launched {}", item.name().color(colors::PRIMARY));
        return Ok(());
    }

    let outcomes: Vec<LaunchOutcome> = dispatcher
        .launch_all(&selected, request.profile, request.browser)
        .await;
    let failed: usize = outcomes.iter().filter(|o| o.result.is_err()).count();

    for outcome in &outcomes {
        match &outcome.result {
            Ok(()) => info!("Launched {}", outcome.item_id.color(colors::PRIMARY)),
            Err(e) => error!("{}: {e}", outcome.item_id),
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} items failed to launch", outcomes.len());
    }
    Ok(())
}
