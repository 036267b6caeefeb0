//! deck-scout server
//!
//! Serves the decklist scraper, the rangers GraphQL proxy and a health check.

use std::path::PathBuf;

use clap::Parser;
use deck_scout::{error::Result, models::Config, server};

/// deck-scout - Decklist scraper and GraphQL proxy for browser clients
#[derive(Parser, Debug)]
#[command(
    name = "deck-scout",
    version,
    about = "Decklist scraper and GraphQL proxy for browser clients"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Listen port (overrides config file and HTTP_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Validate configuration and exit
    #[arg(long)]
    check: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the server.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("deck-scout starting...");

    let mut config = Config::load_or_default(&cli.config);
    config.apply_env()?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    if cli.check {
        log::info!("Configuration OK");
        return Ok(());
    }

    server::serve(config).await
}
