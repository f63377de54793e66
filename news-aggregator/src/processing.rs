use crate::rss_utils::html::{extract_first_image, strip_to_plain_text};
use crate::sources::AI_KEYWORDS;
use crate::types::{ArticleRecord, RawItem, UNKNOWN_DATE};
use std::collections::HashSet;
use tracing::debug;

/// Text-valued slots of a [`RawItem`] that the normalizer looks up by priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    ContentEncoded,
    Content,
    Description,
    MediaContent,
    Enclosure,
}

impl ItemField {
    fn get(self, item: &RawItem) -> Option<&str> {
        match self {
            ItemField::ContentEncoded => item.content_encoded.as_deref(),
            ItemField::Content => item.content.as_deref(),
            ItemField::Description => item.description.as_deref(),
            ItemField::MediaContent => item.media_url.as_deref(),
            ItemField::Enclosure => item.enclosure_url.as_deref(),
        }
    }
}

/// Where the full item body comes from, best first.
pub const CONTENT_PRIORITY: &[ItemField] = &[
    ItemField::ContentEncoded,
    ItemField::Content,
    ItemField::Description,
];

/// Structured image attachments, best first. Markup is scanned only when all are empty.
pub const IMAGE_PRIORITY: &[ItemField] = &[ItemField::MediaContent, ItemField::Enclosure];

/// Long-form date, e.g. `March 5, 2024`.
pub const DATE_FORMAT: &str = "%B %-d, %Y";

fn first_non_empty<'a>(item: &'a RawItem, fields: &[ItemField]) -> Option<&'a str> {
    fields
        .iter()
        .filter_map(|field| field.get(item))
        .find(|value| !value.is_empty())
}

/// Builds the canonical record for one raw item of a feed named `source`.
pub fn normalize_item(item: &RawItem, source: &str) -> ArticleRecord {
    let full_content = first_non_empty(item, CONTENT_PRIORITY).unwrap_or_default();

    let image_url = match first_non_empty(item, IMAGE_PRIORITY) {
        Some(url) => url.to_string(),
        None => extract_first_image(full_content),
    };

    // pubDate first, then the ISO/updated timestamp
    let published = item.pub_date.or(item.iso_date);
    let (pub_date, published_on) = match published {
        Some(ts) => (ts.format(DATE_FORMAT).to_string(), Some(ts.date_naive())),
        None => {
            debug!(
                "No readable publish date for {:?}, using sentinel",
                item.link.as_deref().unwrap_or_default()
            );
            (UNKNOWN_DATE.to_string(), None)
        }
    };

    ArticleRecord {
        title: item.title.clone().unwrap_or_default(),
        link: item.link.clone().unwrap_or_default(),
        pub_date,
        description: strip_to_plain_text(full_content),
        source: source.to_string(),
        image_url,
        published_on,
    }
}

/// Keyword gate: a record is in-domain when its lower-cased title and
/// description contain any keyword as a plain substring.
#[derive(Debug, Clone)]
pub struct RelevanceFilter {
    keywords: Vec<String>,
}

impl RelevanceFilter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn is_relevant(&self, record: &ArticleRecord) -> bool {
        let text = format!("{} {}", record.title, record.description).to_lowercase();
        self.keywords.iter().any(|keyword| text.contains(keyword.as_str()))
    }
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::new(AI_KEYWORDS)
    }
}

/// Per-pass set of links already admitted. Records with an empty link are
/// always admitted and never recorded.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen_links: HashSet<String>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` and remembers the link if the record has not been seen yet.
    pub fn admit(&mut self, record: &ArticleRecord) -> bool {
        if record.link.is_empty() {
            return true;
        }
        self.seen_links.insert(record.link.clone())
    }

    pub fn seen_count(&self) -> usize {
        self.seen_links.len()
    }
}
