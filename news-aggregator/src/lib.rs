pub mod types;
pub mod traits;
pub mod sources;
pub mod rss_utils;
pub mod fetcher;
pub mod parser;
pub mod processing;
pub mod aggregators;
pub mod aggregator;
pub mod state;
pub mod service;
pub mod api;

pub use types::*;
pub use traits::FeedFetcher;
pub use fetcher::Fetcher;
pub use parser::FeedParser;
pub use processing::{normalize_item, Deduplicator, RelevanceFilter};
pub use aggregator::{PassStats, RssAggregator};
pub use state::ArticleCache;
pub use service::NewsService;
