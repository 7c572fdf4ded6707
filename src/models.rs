//! Data models for aggregator hits, consolidated stories and the digest.
//!
//! This module defines the core data structures used throughout the application:
//! - [`RawArticle`]: One unprocessed hit as returned by the news aggregator
//! - [`Article`]: The canonical record flowing through the consolidation pipeline
//! - [`Digest`]: The ranked, truncated result handed to the presentation layer
//! - [`DigestMeta`]: Observability counters describing one consolidation run
//!
//! The raw record keeps the aggregator's native key names (`media`, `desc`,
//! `link`, `img`) and accepts the canonical names as aliases.

use serde::{Deserialize, Serialize};

/// A raw aggregator hit, before normalization.
///
/// No field is guaranteed to be present, and duplicates are routine: the same
/// story usually shows up several times under different aggregator paths.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawArticle {
    /// Headline as displayed by the aggregator.
    #[serde(default)]
    pub title: Option<String>,
    /// Outlet name (e.g. "Reuters").
    #[serde(default, alias = "source")]
    pub media: Option<String>,
    /// Human-readable date ("3 hours ago", "Jan 5, 2024", ...).
    #[serde(default)]
    pub date: Option<String>,
    /// Snippet, often prefixed with the outlet name.
    #[serde(default, alias = "description")]
    pub desc: Option<String>,
    /// Article link, possibly relative to the aggregator.
    #[serde(default, alias = "url")]
    pub link: Option<String>,
    /// Thumbnail URL.
    #[serde(default, alias = "image_url")]
    pub img: Option<String>,
}

/// A canonical article record.
///
/// Every stage of the pipeline consumes and produces these. After title
/// deduplication one `Article` stands for one story, and
/// [`also_reported_by`](Article::also_reported_by) is the only trace of the
/// duplicates it absorbed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Article {
    /// Trimmed, never empty.
    pub title: String,
    /// Outlet name, may be empty.
    pub source: String,
    /// The original date string, kept as a display fallback.
    pub date: String,
    /// `YYYY-MM-DDTHH:MM:SS`, or empty when the date could not be parsed.
    pub published_at: String,
    pub description: String,
    /// Absolute URL, may be empty.
    pub url: String,
    pub image_url: String,
    /// Other outlets that covered the same story, in encounter order.
    pub also_reported_by: Vec<String>,
}

impl Article {
    /// Whether the article carries a thumbnail.
    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }

    /// Number of other outlets merged into this story.
    pub fn source_count(&self) -> usize {
        self.also_reported_by.len()
    }
}

/// Input document accepted on the command line.
///
/// Either a bare array of raw records or an object carrying the query the
/// records were fetched for.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DigestInput {
    Bare(Vec<RawArticle>),
    Query {
        #[serde(default)]
        query: Option<String>,
        #[serde(default)]
        articles: Vec<RawArticle>,
    },
}

impl DigestInput {
    /// Split the document into its query (if any) and raw records.
    pub fn into_parts(self) -> (Option<String>, Vec<RawArticle>) {
        match self {
            DigestInput::Bare(articles) => (None, articles),
            DigestInput::Query { query, articles } => (query, articles),
        }
    }
}

/// Observability counters for one consolidation run.
///
/// All ratios are rounded to two decimals and are `0.0` when their
/// denominator is zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DigestMeta {
    /// Articles entering the pipeline (non-empty titles only).
    pub article_count_raw: usize,
    /// Stories left after both deduplication passes.
    pub article_count_deduped: usize,
    /// `article_count_raw - article_count_deduped`.
    pub dedup_removed: usize,
    pub dedup_ratio: f64,
    /// Share of returned results that carry a thumbnail.
    pub image_availability_rate: f64,
    /// Distinct non-empty outlets among returned results.
    pub source_diversity: usize,
}

/// The ranked, truncated digest handed to the caller.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Digest {
    pub results: Vec<Article>,
    pub count: usize,
    pub query: String,
    /// Plain-text rendition for language-model synthesis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "_meta")]
    pub meta: DigestMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_article_native_keys() {
        let json = r#"{
            "title": "Fed raises rates",
            "media": "Reuters",
            "date": "2 hours ago",
            "desc": "Reuters - The Fed...",
            "link": "/articles/abc",
            "img": "https://img.example.com/a.jpg"
        }"#;

        let raw: RawArticle = serde_json::from_str(json).unwrap();
        assert_eq!(raw.title.as_deref(), Some("Fed raises rates"));
        assert_eq!(raw.media.as_deref(), Some("Reuters"));
        assert_eq!(raw.link.as_deref(), Some("/articles/abc"));
        assert_eq!(raw.img.as_deref(), Some("https://img.example.com/a.jpg"));
    }

    #[test]
    fn test_raw_article_canonical_aliases() {
        let json = r#"{"title": "T", "source": "AP", "url": "https://apnews.com/x", "description": "d"}"#;

        let raw: RawArticle = serde_json::from_str(json).unwrap();
        assert_eq!(raw.media.as_deref(), Some("AP"));
        assert_eq!(raw.link.as_deref(), Some("https://apnews.com/x"));
        assert_eq!(raw.desc.as_deref(), Some("d"));
        assert!(raw.img.is_none());
    }

    #[test]
    fn test_digest_input_bare_array() {
        let input: DigestInput = serde_json::from_str(r#"[{"title": "A"}, {"title": "B"}]"#).unwrap();
        let (query, articles) = input.into_parts();
        assert!(query.is_none());
        assert_eq!(articles.len(), 2);
    }

    #[test]
    fn test_digest_input_with_query() {
        let input: DigestInput =
            serde_json::from_str(r#"{"query": "rates", "articles": [{"title": "A"}]}"#).unwrap();
        let (query, articles) = input.into_parts();
        assert_eq!(query.as_deref(), Some("rates"));
        assert_eq!(articles.len(), 1);
    }

    #[test]
    fn test_digest_serializes_meta_key() {
        let digest = Digest {
            query: "rates".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_string(&digest).unwrap();
        assert!(json.contains("\"_meta\""));
        assert!(json.contains("\"article_count_raw\":0"));
        assert!(!json.contains("\"text\""));
    }

    #[test]
    fn test_article_helpers() {
        let article = Article {
            title: "T".to_string(),
            image_url: "https://img.example.com/a.jpg".to_string(),
            also_reported_by: vec!["AP".to_string(), "BBC".to_string()],
            ..Default::default()
        };
        assert!(article.has_image());
        assert_eq!(article.source_count(), 2);
        assert!(!Article::default().has_image());
    }
}
