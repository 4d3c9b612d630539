//! # Sitekit API Main Entry Point
//!
//! Loads configuration, runs migrations and seeds, then serves the API.
//! `migrate` runs migrations and exits without starting the server.

use clap::{Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use sitekit::{config::ConfigLoader, db, seeds, server::run_server, telemetry};

#[derive(Parser)]
#[command(name = "sitekit", version, about = "Sitekit content and site configuration API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run migrations and seeds, then start the API server (default)
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration from layered env files and variables
    let config_loader = ConfigLoader::new();
    let config = config_loader.load()?;

    telemetry::init_tracing(&config)?;

    tracing::info!(profile = %config.profile, "Loaded configuration");
    if let Ok(redacted_json) = config.redacted_json() {
        tracing::debug!(configuration = %redacted_json, "Effective configuration");
    }

    let db = db::init_pool(&config).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Migrate => {
            Migrator::up(&db, None).await?;
            tracing::info!("Migrations applied");
            Ok(())
        }
        Command::Serve => {
            Migrator::up(&db, None).await?;
            seeds::seed_feature_flags(&db).await?;
            run_server(config, db).await
        }
    }
}
