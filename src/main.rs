use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use authz_lookup_api::config::AppConfig;
use authz_lookup_api::database::{ConnectionTarget, DatabaseManager, PgAppSupportStore, PgEmployeeStore};
use authz_lookup_api::{app, AppState, AuthorizationResolver};

#[derive(Parser)]
#[command(name = "authz-lookup-api")]
#[command(about = "Authorization lookup service (admin membership, app and employee security levels)")]
#[command(version)]
struct Args {
    #[arg(long, help = "Address to bind (overrides HOST)")]
    host: Option<String>,

    #[arg(long, help = "Port to listen on (overrides PORT)")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DB_SERVER, DB_NAME, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = AppConfig::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    info!("Starting authorization lookup API in {:?} mode", config.environment);

    let manager = DatabaseManager::new(config.environment, config.database.clone());
    info!(
        "Databases: {} -> {}, {} -> {} on {}:{}",
        ConnectionTarget::AppSupport,
        manager.database_name(ConnectionTarget::AppSupport),
        ConnectionTarget::Employee,
        manager.database_name(ConnectionTarget::Employee),
        config.database.host,
        config.database.port,
    );

    let resolver = AuthorizationResolver::new(
        Arc::new(PgAppSupportStore::new(manager.clone())),
        Arc::new(PgEmployeeStore::new(manager)),
    );
    let app = app(AppState::new(resolver));

    let bind_addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
