use crate::types::{RawFeed, Result};
use async_trait::async_trait;

/// Retrieves and parses a single syndication feed.
///
/// Implementations report every failure (network, status, body) as `Err`;
/// containing that failure to its own source is the caller's job.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<RawFeed>;
}
