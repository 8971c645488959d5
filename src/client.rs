//! HTTP client for the proxy picker
//!
//! Callers ask for a proxy before each outbound request and report the
//! proxy back when the request fails. The lenient methods never surface
//! errors: an unreachable picker means "no proxy" and a lost failure report
//! only delays exclusion.

use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::error::{PickerError, Result};
use crate::models::{FailureReport, ProxyResponse, Selection};

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct SelectorClient {
    base_url: String,
    http: reqwest::Client,
}

impl SelectorClient {
    /// Create a client for the picker at `base_url` (e.g. `http://localhost:8080`)
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let url = Url::parse(base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(PickerError::InvalidProxyUrl(format!(
                "picker URL must be http or https, got {}",
                url.scheme()
            )));
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch a proxy selection, surfacing transport and decode errors
    pub async fn try_get_proxy(&self) -> Result<Selection> {
        let response = self
            .http
            .get(self.endpoint("/proxy"))
            .send()
            .await?
            .error_for_status()?;

        let body: ProxyResponse = response.json().await?;
        Ok(Selection::from(body))
    }

    /// Fetch a proxy selection, or `None` if the picker could not be reached
    pub async fn get_proxy(&self) -> Option<Selection> {
        match self.try_get_proxy().await {
            Ok(selection) => {
                debug!(url = %selection, "Received proxy selection");
                Some(selection)
            }
            Err(e) => {
                warn!("Failed to fetch proxy selection: {}", e);
                None
            }
        }
    }

    /// Report `proxy_url` as failed, surfacing errors
    pub async fn try_mark_failed(&self, proxy_url: &str) -> Result<()> {
        let report = FailureReport {
            proxy_url: proxy_url.to_string(),
        };

        self.http
            .post(self.endpoint("/proxy/failed"))
            .json(&report)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    /// Report `proxy_url` as failed; errors are logged and dropped
    pub async fn mark_failed(&self, proxy_url: &str) {
        if let Err(e) = self.try_mark_failed(proxy_url).await {
            warn!(proxy_url = %proxy_url, "Failed to report proxy failure: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::api::routes::create_router;
    use crate::api::AppState;
    use crate::proxy::FailureAwareSelector;

    const A: &str = "http://proxy1.example.com:8080";

    async fn spawn_picker(pool: &[&str]) -> String {
        let selector = Arc::new(FailureAwareSelector::new(
            pool.iter().map(|s| s.to_string()).collect(),
            Duration::from_secs(300),
        ));
        let app = create_router(AppState::new(selector));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_client_round_trip_against_picker() {
        let base_url = spawn_picker(&[A]).await;
        let client = SelectorClient::new(&base_url).unwrap();

        assert_eq!(client.get_proxy().await, Some(Selection::Proxy(A.to_string())));

        client.try_mark_failed(A).await.unwrap();

        assert_eq!(client.get_proxy().await, Some(Selection::Direct));
    }

    #[tokio::test]
    async fn test_client_trailing_slash_base_url() {
        let base_url = spawn_picker(&[A]).await;
        let client = SelectorClient::new(&format!("{}/", base_url)).unwrap();

        assert_eq!(client.try_get_proxy().await.unwrap(), Selection::Proxy(A.to_string()));
    }

    #[tokio::test]
    async fn test_client_unreachable_picker_is_lenient() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client =
            SelectorClient::with_timeout(&format!("http://{}", addr), Duration::from_secs(1)).unwrap();

        assert!(client.get_proxy().await.is_none());
        assert!(matches!(client.try_get_proxy().await, Err(PickerError::Http(_))));
        client.mark_failed(A).await;
    }

    #[test]
    fn test_client_rejects_invalid_base_url() {
        assert!(matches!(
            SelectorClient::new("not a url"),
            Err(PickerError::InvalidProxyUrl(_))
        ));
        assert!(matches!(
            SelectorClient::new("ftp://localhost:8080"),
            Err(PickerError::InvalidProxyUrl(_))
        ));
    }
}
