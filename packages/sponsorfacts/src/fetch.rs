//! HTTP fetch seam.
//!
//! Providers talk to the network through the [`Fetcher`] trait so their
//! extraction logic is testable without real HTTP. The one production
//! implementation wraps a shared `reqwest` client.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};

/// Minimal HTTP GET capability: text or JSON, redirects followed.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET a URL and return the response body as text.
    async fn get_text(&self, url: &str) -> ProviderResult<String>;

    /// GET a URL and parse the response body as JSON.
    async fn get_json(&self, url: &str) -> ProviderResult<serde_json::Value> {
        let body = self.get_text(url).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// `reqwest`-backed fetcher.
///
/// Redirects are followed (client default policy). Timeouts and
/// non-success statuses surface as provider errors, which the
/// aggregator absorbs per provider.
pub struct HttpFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    /// Create a fetcher with a 10-second timeout and default user agent.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("default reqwest client options are valid"),
            user_agent: "SponsorFactsBot/1.0".to_string(),
        }
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a custom HTTP client (timeout, proxy, etc.).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get_text(&self, url: &str) -> ProviderResult<String> {
        debug!(url = %url, "HTTP fetch starting");
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| ProviderError::Http(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| ProviderError::Http(Box::new(e)))
    }
}
