//! Operator CLI for Meteoprog informers.
//!
//! Works directly on the configured store. Logs go to stderr as plain text.

use anyhow::{Context as _, Result};
use clap::Parser;
use informers_client::{InformerService, LoaderSettings};
use informers_core::{AppConfig, ConfigHooks, StoreDb};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{Commands, Context, Outcome};

/// Manage Meteoprog weather informers
#[derive(Parser)]
#[command(name = "informers")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load()?;
    let hooks = ConfigHooks::from_config(&config);
    let store = StoreDb::open(&config.db_path)
        .await
        .with_context(|| format!("opening store at {}", config.db_path.display()))?;

    let ctx = Context {
        service: InformerService::from_config(&config, &hooks, store).await?,
        loader: LoaderSettings::resolve(&config, &hooks),
        site_host: config.site_host(),
        features: config.features,
    };

    match commands::execute(&ctx, cli.command).await? {
        outcome @ Outcome::Warning(_) => eprintln!("{outcome}"),
        outcome => println!("{outcome}"),
    }

    Ok(())
}
