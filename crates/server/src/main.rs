use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ticketdesk_core::{
    load_config, load_config_from_env, validate_config, Config, LogFormat, PriorityAdvisor,
    SqliteTicketStore, TicketStore,
};
use ticketdesk_server::{api::create_router, state::AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

/// Read the config file if present, otherwise defaults plus environment.
fn resolve_config() -> Result<(Config, Option<PathBuf>)> {
    let explicit = std::env::var("TICKETDESK_CONFIG").ok().map(PathBuf::from);
    let config_path = explicit
        .clone()
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    if config_path.exists() || explicit.is_some() {
        let config = load_config(&config_path)
            .with_context(|| format!("Failed to load config from {:?}", config_path))?;
        Ok((config, Some(config_path)))
    } else {
        let config = load_config_from_env().context("Failed to load config from environment")?;
        Ok((config, None))
    }
}

fn init_logging(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());

    match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

async fn run() -> Result<()> {
    // Config comes first so the log format can be chosen from it
    let resolved = resolve_config();
    let format = resolved
        .as_ref()
        .map(|(config, _)| config.logging.format)
        .unwrap_or_default();
    init_logging(format);

    let (config, config_path) = resolved?;
    match config_path {
        Some(path) => info!("Loaded configuration from {:?}", path),
        None => info!("No config file found, using defaults and environment"),
    }

    validate_config(&config).context("Configuration validation failed")?;
    info!("Database path: {:?}", config.database.path);

    let ticket_store: Arc<dyn TicketStore> = Arc::new(
        SqliteTicketStore::new(&config.database.path).context("Failed to create ticket store")?,
    );
    info!("Ticket store initialized");

    let advisor = PriorityAdvisor::from_config(&config.advisor.llm)
        .context("Failed to create priority advisor")?;

    let addr = SocketAddr::new(config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config, ticket_store, advisor));
    let app = create_router(state);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
