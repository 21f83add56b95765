//! Mock SOAP host binary.
//!
//! Run with: `mocksoap --config config.yaml`

use anyhow::{Context, Result};
use clap::Parser;
use mocksoap::dispatcher::Dispatcher;
use mocksoap::server::{router, AppState};
use mocksoap::services::build_registry;
use mocksoap::MockSoapConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Mock multi-service SOAP host.
///
/// Hosts several mock SOAP services behind one raw-XML dispatch engine,
/// serving SOAP endpoints under /soap/{service} and WSDL documents under
/// /{service}/{file}.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML)
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Listen address override (host:port)
    #[arg(long)]
    listen: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = args.log_level.parse().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Starting mock SOAP host v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config = if args.config.exists() {
        let content = tokio::fs::read_to_string(&args.config)
            .await
            .context("Failed to read config file")?;
        serde_yaml::from_str::<MockSoapConfig>(&content)
            .context("Failed to parse config file")?
    } else {
        info!("Config file not found, using defaults");
        MockSoapConfig::default()
    };

    if let Some(listen) = args.listen {
        config.server.listen_addr = listen;
    }

    // Build the registry; duplicate or unknown service names abort here.
    let registry = build_registry(&config.services.enabled)
        .context("Failed to build service registry")?;

    for handler in registry.services() {
        let descriptor = handler.descriptor();
        info!(
            service = descriptor.name,
            wsdl = descriptor.wsdl_file,
            operations = ?descriptor.operations,
            "Registered service"
        );
    }

    let state = AppState {
        dispatcher: Arc::new(Dispatcher::new(registry)),
        settings: Arc::new(config.settings.clone()),
        artifact_dir: config.server.artifact_dir.clone(),
    };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.listen_addr))?;
    info!("Listening on {}", config.server.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Mock SOAP host stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
