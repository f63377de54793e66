use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Value of `pubDate` when an item carries no readable publish date.
pub const UNKNOWN_DATE: &str = "Unknown date";

/// Canonical article as served to clients.
///
/// `link` is the identity used for de-duplication within one aggregation pass.
/// Records are built once by the normalizer and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    pub title: String,
    pub link: String,
    pub pub_date: String,
    pub description: String,
    pub source: String,
    pub image_url: String,
    /// Calendar day `pub_date` was rendered from; `None` for [`UNKNOWN_DATE`].
    #[serde(skip)]
    pub published_on: Option<NaiveDate>,
}

impl ArticleRecord {
    pub fn has_known_date(&self) -> bool {
        self.published_on.is_some()
    }
}

/// Body of the retrieval operation: either the article list or a failure envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeedResponse {
    Articles { articles: Vec<ArticleRecord> },
    Error { error: String, details: String },
}

impl FeedResponse {
    pub fn articles(articles: Vec<ArticleRecord>) -> Self {
        Self::Articles { articles }
    }

    pub fn error(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Error {
            error: error.into(),
            details: details.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}
