//! HTTP client for auction page requests using wreq.

use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use wreq::Client;

/// Client identity sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Trait for page fetching - enables mocking for tests.
#[async_trait]
pub trait AuctionFetch: Send + Sync {
    /// Fetches a page and returns its body. Non-2xx statuses are errors.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Auction HTTP client. Performs exactly one GET per call, without retries.
pub struct AuctionClient {
    client: Client,
}

impl AuctionClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl AuctionFetch for AuctionClient {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "ja-JP,ja;q=0.9,en;q=0.8")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            warn!("Request to {} failed with status {}", url, status);
            anyhow::bail!("Request failed with status: {}", status);
        }

        response.text().await.context("Failed to read response body")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_test_config() -> Config {
        Config { timeout_secs: 5, connect_timeout_secs: 2, ..Config::default() }
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/search"))
            .and(query_param("p", "camera"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"<div class="Product">Camera</div>"#),
            )
            .mount(&mock_server)
            .await;

        let client = AuctionClient::new(&make_test_config()).unwrap();
        let url = format!("{}/search/search?p=camera&va=camera", mock_server.uri());

        let body = client.fetch(&url).await.unwrap();
        assert!(body.contains("Camera"));
    }

    #[tokio::test]
    async fn test_fetch_sends_user_agent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(header("user-agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = AuctionClient::new(&make_test_config()).unwrap();
        let body = client.fetch(&format!("{}/category/1?p=1", mock_server.uri())).await.unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_fetch_http_error_404() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = AuctionClient::new(&make_test_config()).unwrap();
        let err = client.fetch(&format!("{}/category/1", mock_server.uri())).await.unwrap_err();
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_fetch_does_not_retry() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = AuctionClient::new(&make_test_config()).unwrap();
        let result = client.fetch(&format!("{}/search/search", mock_server.uri())).await;
        assert!(result.unwrap_err().to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_fetch_empty_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&mock_server)
            .await;

        let client = AuctionClient::new(&make_test_config()).unwrap();
        let body = client.fetch(&mock_server.uri()).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let client = AuctionClient::new(&make_test_config()).unwrap();
        let err = client.fetch("http://127.0.0.1:9/search/search").await.unwrap_err();
        assert!(err.to_string().contains("Failed to send request"));
    }
}
