mod commands;
mod terminal;

use std::time::Duration;

use commands::{CommandLine, Commands, apps, browsers, check, discover, launch, resolve, tailscale};
use launchpad_common::config::Config;
use launchpad_common::models::item::LaunchableItem;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands: CommandLine = CommandLine::parse_args();

    logging::init(commands.verbose);
    let cfg: Config = commands.config();
    print::banner(cfg.no_banner, cfg.quiet);

    match &commands.command {
        Commands::Resolve { id } => {
            let items: Vec<LaunchableItem> = commands::load_items(&commands.items)?;
            let item: &LaunchableItem = commands::find_item(&items, id)?;
            resolve::resolve(item, commands.profile, &cfg)
        }
        Commands::Check { ids, timeout } => {
            let items: Vec<LaunchableItem> = commands::load_items(&commands.items)?;
            let cfg: Config = Config {
                health_timeout: timeout.map(Duration::from_millis).unwrap_or(cfg.health_timeout),
                ..cfg
            };
            check::check(&items, ids, commands.profile, &cfg).await
        }
        Commands::Launch { ids, browser, password_env } => {
            let items: Vec<LaunchableItem> = commands::load_items(&commands.items)?;
            let request: launch::LaunchRequest = launch::LaunchRequest {
                ids,
                profile: commands.profile,
                browser: browser.as_deref(),
                password_env: password_env.as_deref(),
            };
            launch::launch(&items, request, &cfg).await
        }
        Commands::Discover { timeout } => {
            let window: Duration = timeout.map(Duration::from_millis).unwrap_or(cfg.discovery_timeout);
            discover::discover(window, &cfg).await
        }
        Commands::Tailscale { suggest } => match suggest {
            Some(id) => {
                let items: Vec<LaunchableItem> = commands::load_items(&commands.items)?;
                tailscale::tailscale(Some(commands::find_item(&items, id)?), &cfg).await
            }
            None => tailscale::tailscale(None, &cfg).await,
        },
        Commands::Browsers => browsers::browsers(&cfg),
        Commands::Apps { as_items } => apps::apps(*as_items, &cfg).await,
    }
}
