//! API server using Axum
//!
//! Serves proxy selection and failure reporting over HTTP.

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use crate::config::ServerConfig;
use crate::error::{PickerError, Result};
use crate::proxy::rotation::ProxySelector;

use super::middleware::cors_layer;
use super::routes;

/// Shared state for API handlers
#[derive(Clone)]
pub struct AppState {
    pub started_at: Instant,
    pub selector: Arc<dyn ProxySelector>,
}

impl AppState {
    pub fn new(selector: Arc<dyn ProxySelector>) -> Self {
        Self {
            started_at: Instant::now(),
            selector,
        }
    }
}

/// API server
pub struct ApiServer {
    config: ServerConfig,
    state: AppState,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(config: ServerConfig, selector: Arc<dyn ProxySelector>) -> Self {
        Self {
            config,
            state: AppState::new(selector),
        }
    }

    /// Build the router
    pub fn build_router(&self) -> Router {
        let cors = cors_layer(&self.config.cors_origins);

        routes::create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Bind the listener and serve until `shutdown` flips
    ///
    /// A bind failure is returned to the caller, which treats it as fatal.
    #[instrument(skip(self, shutdown))]
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(self.config.addr()).await?;

        info!(
            "Proxy picker listening on {} (strategy: {})",
            listener.local_addr()?,
            self.state.selector.strategy_name()
        );

        axum::serve(listener, self.build_router())
            .with_graceful_shutdown(async move {
                let _ = shutdown.changed().await;
            })
            .await
            .map_err(|e| PickerError::Internal(e.to_string()))?;

        info!("Proxy picker shut down");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::FailureAwareSelector;
    use std::time::Duration;

    fn create_test_server(port: u16) -> ApiServer {
        let selector = Arc::new(FailureAwareSelector::new(
            vec!["http://proxy1.example.com:8080".to_string()],
            Duration::from_secs(300),
        ));
        ApiServer::new(
            ServerConfig {
                port,
                host: "127.0.0.1".to_string(),
                cors_origins: vec![],
            },
            selector,
        )
    }

    #[tokio::test]
    async fn test_run_fails_when_port_taken() {
        let occupied = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = occupied.local_addr().unwrap().port();

        let (_tx, rx) = watch::channel(false);
        let err = create_test_server(port).run(rx).await.unwrap_err();
        assert!(matches!(err, PickerError::Io(_)));
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown_signal() {
        let (tx, rx) = watch::channel(false);
        let server = create_test_server(0);

        let task = tokio::spawn(async move { server.run(rx).await });
        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(true).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
    }
}
