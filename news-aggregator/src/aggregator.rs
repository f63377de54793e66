use crate::aggregators::{order_by_day, shuffled_copy};
use crate::processing::{normalize_item, Deduplicator, RelevanceFilter};
use crate::rss_utils::url::{is_valid_rss_url, source_name_from_url};
use crate::traits::FeedFetcher;
use crate::types::{AggregatorConfig, AggregatorError, ArticleRecord, RawFeed, Result, SourceOutcome};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Counters for one aggregation pass, logged at the end of the pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassStats {
    pub sources_ok: usize,
    pub sources_failed: usize,
    pub items_seen: usize,
    pub irrelevant: usize,
    pub duplicates: usize,
    pub admitted: usize,
}

/// Runs one fetch → normalize → filter → dedupe pass over every configured feed.
pub struct RssAggregator {
    fetcher: Arc<dyn FeedFetcher>,
    config: AggregatorConfig,
    relevance: RelevanceFilter,
}

impl RssAggregator {
    pub fn new(fetcher: Arc<dyn FeedFetcher>, config: AggregatorConfig) -> Self {
        let relevance = RelevanceFilter::new(&config.keywords);
        Self {
            fetcher,
            config,
            relevance,
        }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Fetches all sources concurrently and waits for every one of them.
    ///
    /// A failing source contributes nothing; only a fan-out task that panics
    /// or is cancelled fails the pass.
    pub async fn run_pass(&self) -> Result<Vec<ArticleRecord>> {
        info!("Fetching {} feeds", self.config.feeds.len());

        let mut tasks = JoinSet::new();
        for url in &self.config.feeds {
            let fetcher = Arc::clone(&self.fetcher);
            let url = url.clone();
            tasks.spawn(async move { fetch_source(fetcher.as_ref(), url).await });
        }

        // Owned by this pass only; concurrent passes never share it.
        let mut dedup = Deduplicator::new();
        let mut admitted = Vec::new();
        let mut stats = PassStats::default();

        while let Some(joined) = tasks.join_next().await {
            match joined? {
                SourceOutcome::Fetched { url, feed } => {
                    stats.sources_ok += 1;
                    self.admit_feed(&url, feed, &mut dedup, &mut admitted, &mut stats);
                }
                SourceOutcome::Failed { url, reason } => {
                    stats.sources_failed += 1;
                    warn!("Error fetching feed {}: {}", url, reason);
                }
            }
        }

        info!(
            sources_ok = stats.sources_ok,
            sources_failed = stats.sources_failed,
            items_seen = stats.items_seen,
            irrelevant = stats.irrelevant,
            duplicates = stats.duplicates,
            admitted = stats.admitted,
            "Aggregation pass finished"
        );

        Ok(finalize(admitted, self.config.max_articles))
    }

    fn admit_feed(
        &self,
        url: &str,
        feed: RawFeed,
        dedup: &mut Deduplicator,
        admitted: &mut Vec<ArticleRecord>,
        stats: &mut PassStats,
    ) {
        let source = feed
            .title
            .clone()
            .unwrap_or_else(|| source_name_from_url(url));
        let before = admitted.len();

        for item in &feed.items {
            stats.items_seen += 1;
            let record = normalize_item(item, &source);

            if !self.relevance.is_relevant(&record) {
                stats.irrelevant += 1;
                debug!("Dropping off-topic item: {}", record.title);
                continue;
            }
            if !dedup.admit(&record) {
                stats.duplicates += 1;
                debug!("Dropping duplicate item: {}", record.link);
                continue;
            }
            stats.admitted += 1;
            admitted.push(record);
        }

        info!(
            "Feed {} ({}): {} items, {} admitted",
            source,
            url,
            feed.items.len(),
            admitted.len() - before
        );
    }
}

/// Rejects any feed that is not an absolute http(s) URL.
pub fn validate_feeds(feeds: &[String]) -> Result<()> {
    match feeds.iter().find(|url| !is_valid_rss_url(url)) {
        Some(bad) => Err(AggregatorError::InvalidUrl(bad.clone())),
        None => Ok(()),
    }
}

async fn fetch_source(fetcher: &dyn FeedFetcher, url: String) -> SourceOutcome {
    match fetcher.fetch(&url).await {
        Ok(feed) => SourceOutcome::Fetched { url, feed },
        Err(e) => SourceOutcome::Failed {
            url,
            reason: e.to_string(),
        },
    }
}

/// Day-ordered, capped at `max_articles`, then shuffled as a whole.
fn finalize(mut records: Vec<ArticleRecord>, max_articles: usize) -> Vec<ArticleRecord> {
    let mut rng = rand::thread_rng();
    order_by_day(&mut records, &mut rng);
    records.truncate(max_articles);
    shuffled_copy(&records, &mut rng)
}
