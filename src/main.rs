use std::sync::Arc;

use clap::{Parser, Subcommand};

mod app;
mod auth;
mod categories;
mod config;
mod db;
mod dto;
mod error;
mod exercises;
mod records;
mod seed;
mod state;
mod store;
mod validate;

use crate::{config::AppConfig, db::PgStore, state::AppState};

/// Workout log backend.
#[derive(Parser)]
#[command(name = "shinpo", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply pending migrations, then serve HTTP
    Serve,
    /// Apply pending migrations and exit
    Migrate,
    /// Insert the default user, categories and exercises
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "shinpo=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    let store = PgStore::connect(&config).await?;

    match cli.command {
        Command::Migrate => {
            store.migrate().await?;
            tracing::info!("migrations applied");
        }
        Command::Seed => {
            seed::run(&store).await?;
        }
        Command::Serve => {
            if let Err(e) = store.migrate().await {
                tracing::warn!(error = %e, "migration failed; continuing");
            }
            let state = AppState::from_parts(Arc::new(store), &config);
            app::serve(app::build_app(state), &config).await?;
        }
    }

    Ok(())
}
