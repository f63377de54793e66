/// Markup helpers used by the item normalizer.
///
/// Neither function ever fails: markup the DOM parser yields no text for
/// degrades to a regex strip, a missing image to an empty string.
pub mod html {
    use once_cell::sync::Lazy;
    use regex::Regex;
    use scraper::{Html, Selector};
    use tracing::debug;

    pub const MAX_DESCRIPTION_CHARS: usize = 300;
    pub const TRUNCATION_MARKER: &str = "...";

    static IMG_SELECTOR: Lazy<Selector> =
        Lazy::new(|| Selector::parse("img").expect("static img selector"));
    static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("static tag regex"));

    /// Visible text of `markup` with entities decoded, cut to
    /// [`MAX_DESCRIPTION_CHARS`] characters plus [`TRUNCATION_MARKER`].
    pub fn strip_to_plain_text(markup: &str) -> String {
        if markup.is_empty() {
            return String::new();
        }
        let text = match parse_visible_text(markup) {
            Some(text) => text,
            None => {
                debug!("Markup produced no DOM text, falling back to tag strip");
                regex_strip(markup)
            }
        };
        truncate_description(&text)
    }

    /// `src` of the first `<img>` in `markup`, if it is an absolute http(s) URL.
    pub fn extract_first_image(markup: &str) -> String {
        if markup.is_empty() {
            return String::new();
        }
        let fragment = Html::parse_fragment(markup);
        fragment
            .select(&IMG_SELECTOR)
            .next()
            .and_then(|img| img.value().attr("src"))
            .filter(|src| is_absolute_http(src))
            .map(str::to_string)
            .unwrap_or_default()
    }

    pub fn is_absolute_http(src: &str) -> bool {
        src.starts_with("http://") || src.starts_with("https://")
    }

    /// Text nodes of the parsed fragment. html5ever recovers from most errors
    /// (unterminated entities, misnested tags), so parse errors alone are not a
    /// reason to drop its output.
    fn parse_visible_text(markup: &str) -> Option<String> {
        let fragment = Html::parse_fragment(markup);
        if !fragment.errors.is_empty() {
            debug!("Recovered from {} markup errors", fragment.errors.len());
        }
        let text: String = fragment.root_element().text().collect();
        if text.trim().is_empty() && !regex_strip(markup).trim().is_empty() {
            return None;
        }
        Some(text)
    }

    pub(crate) fn regex_strip(markup: &str) -> String {
        let stripped = RE_TAGS.replace_all(markup, "");
        html_escape::decode_html_entities(&stripped).into_owned()
    }

    pub(crate) fn truncate_description(text: &str) -> String {
        match text.char_indices().nth(MAX_DESCRIPTION_CHARS) {
            Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
            None => text.to_string(),
        }
    }

}

/// URL helpers for source descriptors.
pub mod url {
    use url::Url;

    /// Host of `url_str`, if it parses.
    pub fn extract_host(url_str: &str) -> Option<String> {
        Url::parse(url_str)
            .ok()
            .and_then(|url| url.host_str().map(|h| h.to_string()))
    }

    pub fn is_valid_rss_url(url_str: &str) -> bool {
        if let Ok(url) = Url::parse(url_str) {
            url.scheme() == "http" || url.scheme() == "https"
        } else {
            false
        }
    }

    /// Display name for a feed that has no title of its own: its host without `www.`.
    pub fn source_name_from_url(url_str: &str) -> String {
        match extract_host(url_str) {
            Some(host) => host.strip_prefix("www.").unwrap_or(&host).to_string(),
            None => url_str.to_string(),
        }
    }

}
