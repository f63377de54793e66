use chrono::{DateTime, Duration, Utc};
// Wire-level records live in the interfaces crate
pub use interfaces::defs::{ArticleRecord, FeedResponse, UNKNOWN_DATE};

use crate::sources;

/// Desktop browser signature sent with every feed request.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const FEED_ACCEPT: &str = "application/rss+xml,application/xml;q=0.9,*/*;q=0.8";

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub accept: String,
    pub timeout_seconds: u64,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: BROWSER_USER_AGENT.to_string(),
            accept: FEED_ACCEPT.to_string(),
            timeout_seconds: 10,
            max_redirects: 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub feeds: Vec<String>,
    pub keywords: Vec<String>,
    pub max_articles: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            feeds: sources::ai_feed_urls(),
            keywords: sources::ai_keywords(),
            max_articles: 50,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub window: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            window: Duration::minutes(30),
        }
    }
}

/// One retrieved and parsed feed, before any normalization.
#[derive(Debug, Clone, Default)]
pub struct RawFeed {
    pub title: Option<String>,
    pub items: Vec<RawItem>,
}

/// Source-native item. Every field is optional because feed dialects disagree
/// on which of them exist; see `processing::normalize_item` for how they are
/// resolved.
#[derive(Debug, Clone, Default)]
pub struct RawItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub pub_date: Option<DateTime<Utc>>,
    pub iso_date: Option<DateTime<Utc>>,
    pub content_encoded: Option<String>,
    pub content: Option<String>,
    pub description: Option<String>,
    pub media_url: Option<String>,
    pub enclosure_url: Option<String>,
}

/// Result of one source's retrieval within a pass.
#[derive(Debug)]
pub enum SourceOutcome {
    Fetched { url: String, feed: RawFeed },
    Failed { url: String, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),

    #[error("Fetch task failed: {0}")]
    Task(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("General error: {0}")]
    General(String),
}

impl From<tokio::task::JoinError> for AggregatorError {
    fn from(err: tokio::task::JoinError) -> Self {
        AggregatorError::Task(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
