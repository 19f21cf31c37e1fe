use rnf_config::{Config, ConfigWatcher, HostEnvironment};
use rnf_log::shipping::LogShipper;
use rnf_log::{CsvFormatterOptions, CsvLogFormatter, OptionsMonitor, console, structured};
use rnf_server::{AppState, build_router, error::ServerError};

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::{error, info, warn};
use tokio::net::TcpListener;

#[derive(Debug, Parser)]
#[command(name = "rnf-server", version, about = "ReturnNotFound web application")]
struct Cli {
    /// Hosting environment, e.g. Development or Production
    #[arg(long, env = "RNF_ENVIRONMENT", default_value = "Production")]
    environment: String,

    /// Directory holding the appsettings files and the static content
    #[arg(long, env = "RNF_CONTENT_ROOT")]
    content_root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load .env before clap reads RNF_* variables
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    let content_root = match cli.content_root {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    let environment = HostEnvironment::new(cli.environment, content_root);

    // Load and validate configuration
    let config = Config::load(&environment)?;
    config.validate()?;

    // Console pipeline (before any other logging)
    let options = Arc::new(OptionsMonitor::new(CsvFormatterOptions::from(
        &config.logging.console,
    )));
    let formatter = Arc::new(CsvLogFormatter::new(&options));
    console::initialize(
        &config.logging,
        Arc::clone(&formatter),
        config.log_shipping.is_enabled(),
    )?;

    info!("Starting rnf-server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Hosting environment: {} (content root {})",
        environment.name,
        environment.content_root.display()
    );
    match dotenv {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Failed to load .env: {e}"),
    }
    config.log_summary();

    // Structured pipeline; the guard flushes pending events on drop
    let _structured_guard =
        structured::initialize(&config.structured_logging, &environment.content_root)?;

    // Follow settings changes
    let reload_target = Arc::clone(&options);
    let watcher = match ConfigWatcher::start(environment.clone(), move |reloaded: Config| {
        reload_target.update(CsvFormatterOptions::from(&reloaded.logging.console));
    }) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            warn!("Settings reload disabled: {e}");
            None
        }
    };

    let shipper = LogShipper::start(&config.log_shipping);

    // Database
    let connection = config.default_connection()?;
    info!("Connecting to database");
    let pool = rnf_db::connect(connection).await?;
    info!("Database connection established");

    info!("Running database migrations...");
    rnf_db::run_migrations(&pool).await?;
    info!("Migrations complete");

    // Router
    let state = AppState::new(pool, &config, environment, shipper.clone());
    let app = build_router(state);

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| ServerError::Bind {
            addr: bind_addr.clone(),
            source: e,
        })?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::from)?;

    info!("Shutting down");
    if let Some(shipper) = shipper {
        shipper.flush().await;
    }
    drop(watcher);
    formatter.dispose();
    info!("Graceful shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => error!("Failed to listen for SIGINT: {e}"),
    }
}
