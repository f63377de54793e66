// Shared fixtures for the integration tests: a canned-feed fetcher and RSS builders.
#![allow(dead_code)]

use async_trait::async_trait;
use news_aggregator::{AggregatorConfig, AggregatorError, FeedFetcher, FeedParser, RawFeed, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once};

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// What a stubbed source does when fetched.
#[derive(Clone)]
pub enum StubSource {
    Xml(String),
    Unreachable,
    Panic,
}

/// Serves fixed documents per URL and counts every fetch.
#[derive(Default)]
pub struct StubFetcher {
    sources: HashMap<String, StubSource>,
    calls: Mutex<HashMap<String, usize>>,
    total: AtomicUsize,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, source: StubSource) -> Self {
        self.sources.insert(url.to_string(), source);
        self
    }

    pub fn urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.sources.keys().cloned().collect();
        urls.sort();
        urls
    }

    pub fn calls_for(&self, url: &str) -> usize {
        self.calls.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<RawFeed> {
        self.total.fetch_add(1, Ordering::SeqCst);
        *self.calls.lock().unwrap().entry(url.to_string()).or_insert(0) += 1;

        match self.sources.get(url) {
            Some(StubSource::Xml(xml)) => FeedParser::parse_feed(xml.as_bytes()),
            Some(StubSource::Panic) => panic!("stub source {url} blew up"),
            Some(StubSource::Unreachable) | None => {
                Err(AggregatorError::General(format!("connection refused: {url}")))
            }
        }
    }
}

pub fn config_for(fetcher: &StubFetcher) -> AggregatorConfig {
    AggregatorConfig {
        feeds: fetcher.urls(),
        ..AggregatorConfig::default()
    }
}

pub struct Item<'a> {
    pub title: &'a str,
    pub link: &'a str,
    pub pub_date: Option<&'a str>,
    pub description: &'a str,
}

pub fn item<'a>(title: &'a str, link: &'a str, pub_date: &'a str, description: &'a str) -> Item<'a> {
    Item {
        title,
        link,
        pub_date: Some(pub_date),
        description,
    }
}

/// Minimal RSS 2.0 document; `channel_title` may be empty.
pub fn rss(channel_title: &str, items: &[Item<'_>]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/">
<channel>
"#,
    );
    xml.push_str(&format!("<title>{}</title>\n", channel_title));
    xml.push_str("<link>https://feeds.example.com</link>\n<description>fixture</description>\n");
    for it in items {
        xml.push_str("<item>\n");
        xml.push_str(&format!("<title>{}</title>\n", it.title));
        if !it.link.is_empty() {
            xml.push_str(&format!("<link>{}</link>\n", it.link));
        }
        if let Some(date) = it.pub_date {
            xml.push_str(&format!("<pubDate>{}</pubDate>\n", date));
        }
        xml.push_str(&format!("<description><![CDATA[{}]]></description>\n", it.description));
        xml.push_str("</item>\n");
    }
    xml.push_str("</channel>\n</rss>\n");
    xml
}
