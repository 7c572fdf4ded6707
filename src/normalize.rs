//! Turn raw aggregator hits into canonical [`Article`] records.
//!
//! Normalization trims every field, absolutizes aggregator-relative links,
//! strips the outlet-name prefix that aggregators glue onto snippets, and
//! converts the display date to `YYYY-MM-DDTHH:MM:SS` on a best-effort
//! basis. Records whose title is empty after trimming are skipped.

use crate::dates::{to_published_at, DateParser};
use crate::models::{Article, RawArticle};

/// Default base for links the aggregator hands out as `/articles/...`.
pub const DEFAULT_AGGREGATOR_BASE_URL: &str = "https://news.google.com";

/// Normalizes raw records against one aggregator base URL and date parser.
pub struct Normalizer<'a> {
    base_url: &'a str,
    dates: &'a dyn DateParser,
}

impl<'a> Normalizer<'a> {
    pub fn new(base_url: &'a str, dates: &'a dyn DateParser) -> Self {
        Self { base_url, dates }
    }

    /// Normalize one raw record, or `None` if its title is empty.
    pub fn normalize(&self, raw: &RawArticle) -> Option<Article> {
        let title = trimmed(&raw.title);
        if title.is_empty() {
            return None;
        }
        let source = trimmed(&raw.media);
        let date = trimmed(&raw.date);
        let description = strip_source_prefix(&trimmed(&raw.desc), &source);
        let url = absolutize_url(&trimmed(&raw.link), self.base_url);
        let published_at = if date.is_empty() {
            String::new()
        } else {
            to_published_at(self.dates, &date)
        };

        Some(Article {
            title,
            source,
            date,
            published_at,
            description,
            url,
            image_url: trimmed(&raw.img),
            also_reported_by: Vec::new(),
        })
    }
}

fn trimmed(field: &Option<String>) -> String {
    field.as_deref().unwrap_or_default().trim().to_string()
}

/// Make an aggregator link absolute.
///
/// `/path` is resolved against `base_url`, anything else lacking an `http`
/// prefix gets `https://`.
pub fn absolutize_url(url: &str, base_url: &str) -> String {
    if url.is_empty() || url.starts_with("http") {
        url.to_string()
    } else if url.starts_with('/') {
        format!("{}{}", base_url.trim_end_matches('/'), url)
    } else {
        format!("https://{}", url)
    }
}

/// Remove a leading outlet name (case-insensitive) and the separator after it.
///
/// ```ignore
/// assert_eq!(strip_source_prefix("Reuters - The Fed said", "Reuters"), "The Fed said");
/// ```
pub fn strip_source_prefix(description: &str, source: &str) -> String {
    if description.is_empty() || source.is_empty() {
        return description.to_string();
    }
    // Compare char-by-char so multi-byte case folding can't split a code point.
    let mut rest = description;
    for expected in source.chars() {
        let mut chars = rest.chars();
        match chars.next() {
            Some(c) if c.to_lowercase().eq(expected.to_lowercase()) => rest = chars.as_str(),
            _ => return description.to_string(),
        }
    }
    rest.trim_start_matches([' ', '-', ':']).trim().to_string()
}
