pub mod defs;

pub use defs::{ArticleRecord, FeedResponse, UNKNOWN_DATE};
