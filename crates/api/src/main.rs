//! StudyTwin Server - Main Entry Point

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use api::{init_logging, run_server, AppState, Settings};
use storage::Repository;

#[derive(Parser)]
#[command(name = "studytwin-server")]
#[command(about = "Student analytics backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server (default)
    Serve,
    /// Create the schema and load demo data
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let settings = Settings::load().context("failed to load configuration")?;

    let repository = Repository::connect(&settings.database.url)
        .await
        .context("failed to connect to database")?;
    repository
        .init_schema()
        .await
        .context("failed to initialize schema")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            info!("=== StudyTwin API v{} ===", env!("CARGO_PKG_VERSION"));
            let state = Arc::new(AppState::new(&settings, repository)?);
            run_server(state, &settings.bind_addr()).await?;
        }
        Commands::Seed => {
            let password_hash = student_auth::hash_password("password123")?;
            storage::seed::run(&repository, &password_hash).await?;
            println!("Seed data ready.");
        }
    }

    Ok(())
}
