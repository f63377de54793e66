use crate::parser::FeedParser;
use crate::traits::FeedFetcher;
use crate::types::{AggregatorError, FetchConfig, RawFeed, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// HTTP feed fetcher: one GET per call, bounded timeout and redirect chain.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let accept = HeaderValue::from_str(&config.accept)
            .map_err(|e| AggregatorError::General(format!("Invalid Accept header: {}", e)))?;
        headers.insert(ACCEPT, accept);

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait]
impl FeedFetcher for Fetcher {
    async fn fetch(&self, url: &str) -> Result<RawFeed> {
        let start_time = Instant::now();
        debug!("Fetching feed: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AggregatorError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        info!(
            "Fetched feed: {} ({} bytes in {}ms)",
            url,
            body.len(),
            start_time.elapsed().as_millis()
        );

        FeedParser::parse_feed(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_a_client() {
        let fetcher = Fetcher::new(FetchConfig::default()).unwrap();
        assert_eq!(fetcher.config().timeout_seconds, 10);
        assert_eq!(fetcher.config().max_redirects, 5);
        assert!(fetcher.config().user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn bad_accept_header_is_rejected() {
        let config = FetchConfig {
            accept: "bad\nheader".to_string(),
            ..FetchConfig::default()
        };
        assert!(matches!(Fetcher::new(config), Err(AggregatorError::General(_))));
    }
}
