use std::path::PathBuf;
use std::sync::Arc;

use airdash::{Dashboard, DashboardConfig, DashboardError, Session, logging, web};
use anyhow::{Context, Result};
use argh::FromArgs;

/// Live air quality and weather dashboard for any city.
#[derive(FromArgs)]
struct Cli {
    /// path to a TOML config file
    #[argh(option)]
    config: Option<PathBuf>,

    /// log at debug level
    #[argh(switch, short = 'v')]
    verbose: bool,

    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Serve(ServeArgs),
    Show(ShowArgs),
}

/// Serve the dashboard page.
#[derive(FromArgs)]
#[argh(subcommand, name = "serve")]
struct ServeArgs {
    /// port to listen on, overrides the config file
    #[argh(option, short = 'p')]
    port: Option<u16>,
}

/// Print the dashboard for one city.
#[derive(FromArgs)]
#[argh(subcommand, name = "show")]
struct ShowArgs {
    /// city to look up
    #[argh(positional, greedy)]
    city: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli: Cli = argh::from_env();

    let config = DashboardConfig::load_from_path(cli.config)
        .context("Failed to load configuration")?;
    logging::init(&config.logging, cli.verbose)?;
    config.warn_missing_credentials();

    let dashboard = Dashboard::from_config(&config)?;

    match cli.command {
        Command::Serve(args) => {
            let session = Arc::new(Session::new(dashboard, &config.ui));
            let port = args.port.unwrap_or(config.server.port);
            web::run(
                session,
                port,
                &config.server.static_dir,
                config.request_timeout(),
            )
            .await
        }
        Command::Show(args) => {
            let city = args.city.join(" ");
            let city = city.trim();
            if city.is_empty() {
                return Err(DashboardError::validation("city cannot be empty").into());
            }

            tracing::debug!("Fetching dashboard for: {}", city);
            let record = dashboard
                .load_city(city)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("{record}");
            Ok(())
        }
    }
}
