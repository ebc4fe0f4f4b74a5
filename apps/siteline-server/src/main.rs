//! Siteline server binary
//!
//! Wires the module crates to a shared database connection and serves
//! their REST APIs under `/api/v1`.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use asset_registry::AssetRegistryModule;
use axum::{routing::get, Router};
use clap::Parser;
use module_config::ModuleConfigModule;
use sea_orm::{ConnectOptions, Database};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{AppConfig, LoggingConfig};

#[derive(Debug, Parser)]
#[command(name = "siteline-server", version, about = "Siteline facility and asset tracking server")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config/siteline.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;
    init_tracing(&config.logging);

    let mut options = ConnectOptions::new(config.database.url.clone());
    options
        .max_connections(config.database.max_connections)
        .sqlx_logging(config.database.sqlx_logging);
    let db = Database::connect(options)
        .await
        .context("failed to connect to the database")?;

    ModuleConfigModule::migrate(&db).await?;
    AssetRegistryModule::migrate(&db).await?;

    let db = Arc::new(db);
    let module_config = ModuleConfigModule::new(db.clone(), config.module_config.clone());
    let asset_registry = AssetRegistryModule::new(db, config.asset_registry.clone());

    let api = asset_registry.router(module_config.router(Router::new()));
    let app = Router::new()
        .nest("/api/v1", api)
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!(addr = %config.server.bind_addr, "siteline-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated abnormally")?;
    tracing::info!("siteline-server stopped");
    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter.clone()));
    let registry = tracing_subscriber::registry().with(filter);
    if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to register SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
