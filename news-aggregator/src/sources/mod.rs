pub mod ai_feeds;

pub use ai_feeds::{AI_FEEDS, AI_KEYWORDS};

pub fn ai_feed_urls() -> Vec<String> {
    AI_FEEDS.iter().map(|s| s.to_string()).collect()
}

pub fn ai_keywords() -> Vec<String> {
    AI_KEYWORDS.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rss_utils::url::is_valid_rss_url;

    #[test]
    fn every_feed_is_an_http_url() {
        assert!(!AI_FEEDS.is_empty());
        for feed in AI_FEEDS {
            assert!(is_valid_rss_url(feed), "bad feed url: {feed}");
        }
    }

    #[test]
    fn keywords_are_lower_case() {
        for kw in AI_KEYWORDS {
            assert_eq!(*kw, kw.to_lowercase());
        }
    }
}
