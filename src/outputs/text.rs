//! Plain-text digest for language-model synthesis.
//!
//! Each story carries its outlet, timestamp, snippet, link and the other
//! outlets that covered it, so a model can write a balanced, multi-source
//! summary with citations.

use crate::models::Article;
use itertools::Itertools;
use std::fmt::Write;

/// Cross-references listed per story.
const MAX_CROSS_REFERENCES: usize = 4;

/// Render ranked results as numbered plain text.
///
/// ```text
/// News results for "rates":
///
/// 1. Fed raises interest rates
///    Source: AP (2024-06-15T09:00:00)
///    The Federal Reserve raised...
///    https://apnews.com/fed
///    Also reported by: Reuters, BBC
/// ```
pub fn format_text(results: &[Article], query: &str) -> String {
    if results.is_empty() {
        return format!("No news articles found for \"{}\".", query);
    }

    let mut out = format!("News results for \"{}\":", query);
    for (i, article) in results.iter().enumerate() {
        write!(out, "\n\n{}. {}", i + 1, article.title).unwrap();

        if !article.source.is_empty() {
            let when = if article.published_at.is_empty() {
                &article.date
            } else {
                &article.published_at
            };
            write!(out, "\n   Source: {}", article.source).unwrap();
            if !when.is_empty() {
                write!(out, " ({})", when).unwrap();
            }
        }
        if !article.description.is_empty() {
            write!(out, "\n   {}", article.description).unwrap();
        }
        if !article.url.is_empty() {
            write!(out, "\n   {}", article.url).unwrap();
        }
        if !article.also_reported_by.is_empty() {
            let also = article
                .also_reported_by
                .iter()
                .take(MAX_CROSS_REFERENCES)
                .join(", ");
            write!(out, "\n   Also reported by: {}", also).unwrap();
        }
    }
    out
}
