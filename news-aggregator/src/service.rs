use crate::aggregator::{validate_feeds, RssAggregator};
use crate::aggregators::shuffled_copy;
use crate::fetcher::Fetcher;
use crate::state::ArticleCache;
use crate::types::{
    AggregatorConfig, ArticleRecord, CacheConfig, FeedResponse, FetchConfig, Result,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info};

/// `error` field of the failure envelope.
pub const FETCH_FAILED: &str = "Failed to fetch RSS feeds";

/// The retrieval operation: cache lookup, aggregation pass on a miss.
///
/// Constructed once per process and shared by every request.
pub struct NewsService {
    aggregator: RssAggregator,
    cache: ArticleCache,
}

impl NewsService {
    pub fn new(aggregator: RssAggregator, cache: ArticleCache) -> Self {
        Self { aggregator, cache }
    }

    /// Wires the HTTP fetcher, the pipeline and the cache from their configs.
    pub fn from_config(
        fetch_config: FetchConfig,
        aggregator_config: AggregatorConfig,
        cache_config: CacheConfig,
    ) -> Result<Self> {
        validate_feeds(&aggregator_config.feeds)?;
        let fetcher = Arc::new(Fetcher::new(fetch_config)?);
        Ok(Self::new(
            RssAggregator::new(fetcher, aggregator_config),
            ArticleCache::new(cache_config),
        ))
    }

    pub fn cache(&self) -> &ArticleCache {
        &self.cache
    }

    pub async fn get_articles(&self) -> FeedResponse {
        self.get_articles_at(Utc::now()).await
    }

    /// Same as [`get_articles`](Self::get_articles) with an explicit request time.
    pub async fn get_articles_at(&self, now: DateTime<Utc>) -> FeedResponse {
        match self.load(now).await {
            Ok(articles) => FeedResponse::articles(articles),
            Err(e) => {
                error!("Error fetching RSS feeds: {}", e);
                FeedResponse::error(FETCH_FAILED, e.to_string())
            }
        }
    }

    async fn load(&self, now: DateTime<Utc>) -> Result<Vec<ArticleRecord>> {
        if let Some(cached) = self.cache.lookup(now).await {
            info!("Serving {} cached articles", cached.len());
            return Ok(cached);
        }

        info!("Article cache miss, running aggregation pass");
        let articles = self.aggregator.run_pass().await?;
        let served = shuffled_copy(&articles, &mut rand::thread_rng());
        self.cache.store(articles, now).await;
        Ok(served)
    }
}

/// Serializes a response envelope, as printed by the `fetch` command.
pub fn render_json(response: &FeedResponse, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(response)?
    } else {
        serde_json::to_string(response)?
    };
    Ok(json)
}
