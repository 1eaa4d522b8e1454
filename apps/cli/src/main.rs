mod args;
mod config;

use std::io;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use app_api::AppContext;
use http_api::HttpState;
use telemetry_app::{AppConfig, AppPaths, AppState, ensure_app_data_dir};

const DEFAULT_LOG_FILTER: &str = "info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = args::CliArgs::parse();
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let load = config::load(&args).map_err(io::Error::other)?;
    let config = load.config;
    match &load.source {
        Some(path) => info!(path = %path.display(), "loaded config"),
        None => info!("no config file; using defaults"),
    }

    let paths = AppPaths::new(config.data_dir.clone());
    ensure_app_data_dir(&paths).map_err(|err| io::Error::other(err.to_string()))?;
    info!(data_dir = %paths.data_dir.display(), "using data dir");

    let app_state =
        AppState::new(AppConfig::new(paths.db_path.clone()).with_busy_timeout(config.busy_timeout()));
    if app_state.is_fresh_db() {
        info!(db_path = %paths.db_path.display(), "creating database");
    }
    let applied = app_state.setup_db().map_err(|err| {
        io::Error::other(format!("failed to initialize database: {}", err))
    })?;
    for name in &applied {
        info!(migration = *name, "applied migration");
    }
    let schema_version = app_state
        .config
        .open_db()
        .and_then(|db| Ok(db.schema_version()?))
        .map_err(|err| io::Error::other(err.to_string()))?;
    info!(schema_version, "database ready");

    if !config.static_dir.join("index.html").exists() {
        warn!(static_dir = %config.static_dir.display(), "dashboard index.html not found");
    }

    let context = AppContext { app_state };
    let state = HttpState::new(context, config.static_dir.clone())
        .with_request_timeout(config.request_timeout());
    let router = http_api::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "telemetry server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("telemetry server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
    }
}
