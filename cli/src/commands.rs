pub mod apps;
pub mod browsers;
pub mod check;
pub mod discover;
pub mod launch;
pub mod resolve;
pub mod tailscale;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};

use launchpad_common::config::Config;
use launchpad_common::models::address::NetworkProfile;
use launchpad_common::models::item::LaunchableItem;

#[derive(Parser)]
#[command(name = "launchpad")]
#[command(about = "Open your self-hosted services from any network.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Item catalog (JSON array of bookmark, ssh and app items)
    #[arg(long, global = true, default_value = "launchpad.json")]
    pub items: PathBuf,

    /// Network profile used to pick addresses
    #[arg(short, long, global = true, default_value_t = NetworkProfile::Local)]
    pub profile: NetworkProfile,

    /// Less output; repeat for results only
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// More log output; repeat for trace
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Accept invalid TLS certificates when probing
    #[arg(long, global = true)]
    pub insecure: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the URL or host an item resolves to
    #[command(alias = "r")]
    Resolve { id: String },
    /// Probe bookmarks and report their health
    #[command(alias = "c")]
    Check {
        /// Bookmark ids; every bookmark when omitted
        ids: Vec<String>,
        /// Per-request timeout in milliseconds
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Open one or more items
    #[command(alias = "l")]
    Launch {
        #[arg(required = true)]
        ids: Vec<String>,
        /// Browser id for bookmarks (see `browsers`)
        #[arg(short, long)]
        browser: Option<String>,
        /// Environment variable holding the SSH password
        #[arg(long)]
        password_env: Option<String>,
    },
    /// Find file shares advertised on the local network
    #[command(alias = "d")]
    Discover {
        /// Scan window in milliseconds
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Show the Tailscale client status
    #[command(alias = "t")]
    Tailscale {
        /// Suggest a profile for this item
        #[arg(long)]
        suggest: Option<String>,
    },
    /// List the browsers detected on this machine
    #[command(alias = "b")]
    Browsers,
    /// List running GUI applications (macOS)
    #[command(alias = "a")]
    Apps {
        /// Print them as app items for the catalog
        #[arg(long)]
        as_items: bool,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            insecure_tls: self.insecure,
            quiet: self.quiet,
            no_banner: self.no_banner,
            ..Config::default()
        }
    }
}

pub fn load_items(path: &Path) -> anyhow::Result<Vec<LaunchableItem>> {
    let raw: String = fs::read_to_string(path)
        .with_context(|| format!("failed to read item catalog {}", path.display()))?;
    let items: Vec<LaunchableItem> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid item catalog", path.display()))?;
    Ok(items)
}

pub fn find_item<'a>(items: &'a [LaunchableItem], id: &str) -> anyhow::Result<&'a LaunchableItem> {
    items
        .iter()
        .find(|item| item.id() == id)
        .with_context(|| format!("no item with id {id}"))
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
    use clap::CommandFactory;

    #[test]
    fn command_line_is_well_formed() {
        CommandLine::command().debug_assert();
    }

    #[test]
    fn global_flags_reach_the_config() {
        let cli: CommandLine =
            CommandLine::try_parse_from(["launchpad", "check", "-qq", "--insecure", "--profile", "ts"]).unwrap();
        let cfg: Config = cli.config();
        assert_eq!(cfg.quiet, 2);
        assert!(cfg.insecure_tls);
        assert_eq!(cli.profile, NetworkProfile::Tailscale);
    }

    #[test]
    fn apps_can_be_printed_as_items() {
        let cli: CommandLine = CommandLine::try_parse_from(["launchpad", "apps", "--as-items"]).unwrap();
        assert!(matches!(cli.command, Commands::Apps { as_items: true }));
    }

    #[test]
    fn launch_requires_an_id() {
        assert!(CommandLine::try_parse_from(["launchpad", "launch"]).is_err());
    }
}
