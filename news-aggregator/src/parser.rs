use crate::types::{AggregatorError, RawFeed, RawItem, Result};
use feed_rs::model::{Entry, FeedType};
use feed_rs::parser;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;
use url::Url;

static RE_ENCLOSURE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<enclosure\b[^>]*?\burl\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("static enclosure regex")
});

/// Turns a feed document (RSS 0.9x/1.0/2.0, Atom, JSON Feed) into a [`RawFeed`].
pub struct FeedParser;

impl FeedParser {
    pub fn parse_feed(content: &[u8]) -> Result<RawFeed> {
        debug!("Parsing feed content ({} bytes)", content.len());

        let feed = parser::parse(content)
            .map_err(|e| AggregatorError::Parse(format!("Failed to parse feed: {}", e)))?;

        let title = feed
            .title
            .map(|t| t.content.trim().to_string())
            .filter(|t| !t.is_empty());
        let dialect = feed.feed_type;
        let enclosures = match dialect {
            FeedType::Atom | FeedType::JSON => HashSet::new(),
            _ => rss_enclosure_urls(content),
        };

        let items: Vec<RawItem> = feed
            .entries
            .into_iter()
            .map(|entry| Self::raw_item(&dialect, &enclosures, entry))
            .collect();

        debug!("Parsed {:?} feed with {} items", dialect, items.len());

        Ok(RawFeed { title, items })
    }

    fn raw_item(dialect: &FeedType, enclosures: &HashSet<String>, entry: Entry) -> RawItem {
        let link = select_entry_link(&entry);
        let (media_url, enclosure_url) = match dialect {
            FeedType::Atom | FeedType::JSON => select_media_by_type(&entry),
            _ => select_rss_media(&entry, enclosures),
        };

        // RSS carries full bodies in content:encoded; Atom and JSON Feed in a plain content field.
        let body = entry.content.and_then(|c| c.body).filter(|b| !b.is_empty());
        let (content_encoded, content) = match dialect {
            FeedType::Atom | FeedType::JSON => (None, body),
            _ => (body, None),
        };

        RawItem {
            title: entry.title.map(|t| t.content),
            link,
            pub_date: entry.published,
            iso_date: entry.updated,
            content_encoded,
            content,
            description: entry.summary.map(|s| s.content),
            media_url,
            enclosure_url,
        }
    }
}

fn select_entry_link(entry: &Entry) -> Option<String> {
    let usable = |href: &str| !href.trim().is_empty();

    entry
        .links
        .iter()
        .find(|l| {
            usable(&l.href)
                && l.rel
                    .as_deref()
                    .map_or(true, |rel| rel.eq_ignore_ascii_case("alternate"))
        })
        .or_else(|| {
            entry
                .links
                .iter()
                .find(|l| usable(&l.href) && !is_enclosure_rel(l.rel.as_deref()))
        })
        .map(|l| l.href.trim().to_string())
}

/// URLs of every RSS `<enclosure>` element in the document, normalized the
/// way feed-rs normalizes media URLs.
///
/// feed-rs merges `<enclosure>` and ungrouped `media:content` into one list of
/// media objects in document order, so the raw document is the only place the
/// two can still be told apart.
fn rss_enclosure_urls(content: &[u8]) -> HashSet<String> {
    let text = String::from_utf8_lossy(content);
    RE_ENCLOSURE_URL
        .captures_iter(&text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| html_escape::decode_html_entities(m.as_str().trim()).into_owned())
        .filter_map(|raw| Url::parse(&raw).ok())
        .map(|url| url.to_string())
        .collect()
}

/// RSS items: `<enclosure>` URLs fill the enclosure slot whatever their MIME
/// type, every other media object is `media:content`.
fn select_rss_media(entry: &Entry, enclosures: &HashSet<String>) -> (Option<String>, Option<String>) {
    let mut media_url = None;
    let mut enclosure_url = None;

    for url in media_content_urls(entry) {
        if enclosures.contains(&url) {
            enclosure_url.get_or_insert(url);
        } else {
            media_url.get_or_insert(url);
        }
    }

    finish_media(entry, media_url, enclosure_url)
}

/// Atom and JSON Feed: typed non-image attachments are enclosures, untyped or
/// `image/*` ones are media content.
fn select_media_by_type(entry: &Entry) -> (Option<String>, Option<String>) {
    let mut media_url = None;
    let mut enclosure_url = None;

    for media in &entry.media {
        for content in &media.content {
            let Some(url) = content.url.as_ref().map(|u| u.to_string()) else {
                continue;
            };
            let is_image_or_untyped = content
                .content_type
                .as_ref()
                .map_or(true, |mime| mime.type_() == "image");
            if is_image_or_untyped {
                media_url.get_or_insert(url);
            } else {
                enclosure_url.get_or_insert(url);
            }
        }
    }

    finish_media(entry, media_url, enclosure_url)
}

fn media_content_urls(entry: &Entry) -> impl Iterator<Item = String> + '_ {
    entry
        .media
        .iter()
        .flat_map(|m| m.content.iter())
        .filter_map(|c| c.url.as_ref().map(|u| u.to_string()))
}

/// Thumbnails back up the media slot, `rel="enclosure"` links the enclosure slot.
fn finish_media(
    entry: &Entry,
    mut media_url: Option<String>,
    mut enclosure_url: Option<String>,
) -> (Option<String>, Option<String>) {
    if media_url.is_none() {
        media_url = entry
            .media
            .iter()
            .flat_map(|m| m.thumbnails.iter())
            .map(|t| t.image.uri.trim().to_string())
            .find(|uri| !uri.is_empty());
    }

    if enclosure_url.is_none() {
        enclosure_url = entry
            .links
            .iter()
            .find(|l| is_enclosure_rel(l.rel.as_deref()) && !l.href.trim().is_empty())
            .map(|l| l.href.trim().to_string());
    }

    (media_url, enclosure_url)
}

fn is_enclosure_rel(rel: Option<&str>) -> bool {
    rel.is_some_and(|r| r.eq_ignore_ascii_case("enclosure"))
}
