use crate::aggregators::shuffled_copy;
use crate::types::{ArticleRecord, CacheConfig};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone)]
struct CacheEntry {
    articles: Arc<Vec<ArticleRecord>>,
    fetched_at: DateTime<Utc>,
}

/// Last aggregation result and when it was fetched.
///
/// The entry is replaced as a whole on every store; readers only ever see a
/// complete result. Served copies are shuffled, the stored sequence is not.
pub struct ArticleCache {
    window: Duration,
    entry: RwLock<Option<CacheEntry>>,
}

impl ArticleCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            window: config.window,
            entry: RwLock::new(None),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Shuffled copy of the cached articles if they were fetched less than one
    /// window before `now` and are non-empty.
    pub async fn lookup(&self, now: DateTime<Utc>) -> Option<Vec<ArticleRecord>> {
        let articles = {
            let guard = self.entry.read().await;
            let entry = guard.as_ref()?;
            let age = now.signed_duration_since(entry.fetched_at);
            if age >= self.window || entry.articles.is_empty() {
                debug!("Cache stale or empty (age {}s)", age.num_seconds());
                return None;
            }
            Arc::clone(&entry.articles)
        };
        Some(shuffled_copy(&articles, &mut rand::thread_rng()))
    }

    /// Replaces the cached result; the last writer wins.
    pub async fn store(&self, articles: Vec<ArticleRecord>, fetched_at: DateTime<Utc>) {
        let mut guard = self.entry.write().await;
        *guard = Some(CacheEntry {
            articles: Arc::new(articles),
            fetched_at,
        });
    }

    pub async fn last_fetched_at(&self) -> Option<DateTime<Utc>> {
        self.entry.read().await.as_ref().map(|e| e.fetched_at)
    }
}

impl Default for ArticleCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
