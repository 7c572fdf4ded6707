//! Importance reranking of consolidated stories.
//!
//! Stories are ordered by how many other outlets covered them, then by
//! recency. Recency is a weak tie-breaker only: a story carried by three
//! outlets always outranks a fresher single-source one.

use crate::models::Article;
use tracing::{debug, instrument};

/// Stable sort, descending by `(also_reported_by.len(), published_at)`.
///
/// `published_at` is compared as a plain string; ISO-8601 makes that
/// chronological and an empty timestamp sorts lowest. Equal keys keep their
/// incoming order.
#[instrument(level = "info", skip_all, fields(count = articles.len()))]
pub fn rerank(mut articles: Vec<Article>) -> Vec<Article> {
    articles.sort_by(|a, b| {
        (b.source_count(), &b.published_at).cmp(&(a.source_count(), &a.published_at))
    });
    debug!(
        top = articles.first().map(|a| a.title.as_str()).unwrap_or_default(),
        "Reranked stories"
    );
    articles
}
