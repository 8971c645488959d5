//! Proxy Picker - Entry Point
//!
//! Starts the selection API with graceful shutdown support.

use std::sync::Arc;

use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use proxy_picker::api::ApiServer;
use proxy_picker::config::{Config, LogConfig};
use proxy_picker::proxy::FailureAwareSelector;

#[tokio::main]
async fn main() {
    init_tracing(&LogConfig::from_env());

    if let Err(e) = run().await {
        error!("Proxy picker failed: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> proxy_picker::Result<()> {
    info!("Starting proxy picker");

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: {} proxies, failure TTL {}s",
        config.pool.proxies.len(),
        config.pool.failure_ttl.as_secs()
    );

    let selector = Arc::new(FailureAwareSelector::new(
        config.pool.proxies.clone(),
        config.pool.failure_ttl,
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    let server = ApiServer::new(config.server.clone(), selector);
    server.run(shutdown_rx).await?;

    info!("Proxy picker stopped");
    Ok(())
}

fn init_tracing(log: &LogConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("proxy_picker={},tower_http=debug", log.level).into());
    let registry = tracing_subscriber::registry().with(filter);

    if log.format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
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
            Ok(mut sig) => {
                sig.recv().await;
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
