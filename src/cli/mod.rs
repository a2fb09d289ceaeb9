use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::{MemoryStore, PgStore, Store, UserStore};
use crate::routes;
use crate::state::AppState;
use crate::types::Role;

#[derive(Parser)]
#[command(name = "gherkin-tracker")]
#[command(about = "Tracking backend for Gherkin keywords, domains, templates and tags")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP API (default)")]
    Serve {
        #[arg(long, help = "Port to listen on, overriding PORT")]
        port: Option<u16>,
    },

    #[command(about = "Create or update the database schema")]
    Migrate,

    #[command(about = "Grant the admin role to an existing user")]
    Promote {
        #[arg(help = "Email address of the user")]
        email: String,
    },
}

pub async fn run(cli: Cli, mut config: AppConfig) -> anyhow::Result<()> {
    config.validate().context("invalid configuration")?;

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
        Commands::Migrate => {
            let store = PgStore::connect(&config.database).await?;
            store.migrate().await?;
            println!("Database schema is up to date");
            Ok(())
        }
        Commands::Promote { email } => {
            let store = PgStore::connect(&config.database).await?;
            let email = email.trim().to_lowercase();
            match store.set_user_role(&email, Role::Admin).await? {
                Some(user) => {
                    println!("{} ({}) is now an admin", user.email, user.id);
                    Ok(())
                }
                None => anyhow::bail!("no user registered with email {}", email),
            }
        }
    }
}

/// PostgreSQL when a URL is configured; otherwise an in-memory store, which
/// `AppConfig::validate` only permits in development.
async fn open_store(config: &AppConfig) -> anyhow::Result<Arc<dyn Store>> {
    if config.database.url.is_none() {
        tracing::warn!("DATABASE_URL not set; using the in-memory store, data will not persist");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store = PgStore::connect(&config.database).await?;
    if config.database.auto_migrate {
        store.migrate().await?;
    }
    Ok(Arc::new(store))
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Gherkin Tracker API in {:?} mode", config.environment);

    let store = open_store(&config).await?;
    let bind_addr = config.bind_address();
    let app = routes::app(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
