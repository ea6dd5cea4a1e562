use colored::*;

use launchpad_common::config::Config;
use launchpad_common::models::browser::Browser;
use launchpad_core::InstalledBrowsers;

use crate::terminal::{colors, print};

pub fn browsers(cfg: &Config) -> anyhow::Result<()> {
    let registry: InstalledBrowsers = InstalledBrowsers::detect();
    let installed: &[Browser] = registry.installed();

    print::header("installed browsers", cfg.quiet);
    print::set_key_width(installed.iter().map(|b| b.id.as_str()));
    for browser in installed {
        let detail: ColoredString = if browser.path.as_os_str().is_empty() {
            browser.name.color(colors::TEXT_DEFAULT)
        } else {
            format!("{} ({})", browser.name, browser.path.display()).color(colors::TEXT_DEFAULT)
        };
        print::aligned_line(&browser.id, detail);
    }
    Ok(())
}
