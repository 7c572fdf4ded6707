//! Two-layer deduplication of normalized articles.
//!
//! 1. **URL**: collapse articles whose links agree on scheme, host and path.
//!    The first occurrence wins and input order is kept.
//! 2. **Title**: cluster articles whose significant-word sets overlap by
//!    more than the similarity threshold, keep the best representative per
//!    cluster and record the other outlets in `also_reported_by`.
//!
//! Title clustering is a single left-to-right pass. Each unconsumed article
//! opens a [`Cluster`] and absorbs every later unconsumed article that is
//! similar to the cluster's *current* representative. A representative swap
//! changes the word set used for the remaining comparisons but never revisits
//! articles that were already skipped.

use crate::models::Article;
use crate::similarity::{jaccard, significant_words, StopWords, WordSet};
use std::collections::HashSet;
use tracing::{debug, info, instrument};
use url::Url;

/// Default Jaccard threshold; pairs must score strictly above it to merge.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.5;

/// Reduce a URL to `scheme://host/path`, dropping query string and fragment.
///
/// Unparsable input is returned unchanged so it still works as a dedup key.
pub fn normalize_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            parsed.set_query(None);
            parsed.set_fragment(None);
            parsed.to_string()
        }
        Err(_) => url.to_string(),
    }
}

/// Drop articles whose normalized URL was already seen.
///
/// Articles with an empty key are never considered duplicates of each other.
///
/// # Arguments
///
/// * `articles` - Normalized articles in aggregator order
///
/// # Returns
///
/// The first article per normalized URL, in input order.
#[instrument(level = "info", skip_all, fields(input = articles.len()))]
pub fn dedup_by_url(articles: Vec<Article>) -> Vec<Article> {
    let input = articles.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(input);
    let kept: Vec<Article> = articles
        .into_iter()
        .filter(|article| {
            let key = normalize_url(&article.url);
            key.is_empty() || seen.insert(key)
        })
        .collect();

    info!(input, kept = kept.len(), removed = input - kept.len(), "URL dedup complete");
    kept
}

/// Ranking key for choosing a cluster representative: image first, then
/// description length.
fn representative_score(article: &Article) -> (bool, usize) {
    (article.has_image(), article.description.chars().count())
}

/// One story under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// The article currently standing for the story.
    pub representative: Article,
    /// Significant words of the representative's title.
    pub words: WordSet,
    /// Other outlets absorbed so far, in encounter order.
    pub also_reported_by: Vec<String>,
}

impl Cluster {
    /// Open a cluster around one article.
    pub fn open(article: Article, words: WordSet) -> Self {
        let also_reported_by = article.also_reported_by.clone();
        Self {
            representative: article,
            words,
            also_reported_by,
        }
    }

    /// Absorb a duplicate, returning the updated cluster.
    ///
    /// The duplicate's outlet is recorded when it differs from the current
    /// representative's. If the duplicate scores strictly higher it becomes
    /// the representative, its own outlet is removed from the accumulator and
    /// the previous representative's outlet is recorded instead. Empty outlet
    /// names are never recorded.
    pub fn absorb(self, other: Article, other_words: WordSet) -> Self {
        let Cluster {
            representative,
            words,
            mut also_reported_by,
        } = self;

        if !other.source.is_empty() && other.source != representative.source {
            also_reported_by.push(other.source.clone());
        }

        if representative_score(&other) <= representative_score(&representative) {
            return Cluster {
                representative,
                words,
                also_reported_by,
            };
        }

        debug!(
            previous = %representative.title,
            next = %other.title,
            "Swapping cluster representative"
        );
        also_reported_by.retain(|source| *source != other.source);
        if !representative.source.is_empty() && representative.source != other.source {
            also_reported_by.push(representative.source);
        }
        Cluster {
            representative: Article {
                also_reported_by: Vec::new(),
                ..other
            },
            words: other_words,
            also_reported_by,
        }
    }

    /// Finish the cluster as a single story article.
    pub fn into_article(self) -> Article {
        Article {
            also_reported_by: self.also_reported_by,
            ..self.representative
        }
    }
}

/// Merge near-duplicate titles into one story per cluster.
///
/// Similarity is the Jaccard index of significant-word sets; a pair merges
/// only when it scores strictly above `threshold`. Output order follows the
/// index of each cluster's first article.
///
/// # Arguments
///
/// * `articles` - URL-deduplicated articles in aggregator order
/// * `stop_words` - Words ignored when building each title's word set
/// * `threshold` - Jaccard score a pair must exceed to merge
///
/// # Returns
///
/// One article per story, carrying the other outlets that covered it in
/// `also_reported_by`.
#[instrument(level = "info", skip_all, fields(input = articles.len(), threshold = threshold))]
pub fn dedup_by_title(articles: Vec<Article>, stop_words: &StopWords, threshold: f64) -> Vec<Article> {
    let input = articles.len();
    let mut pending: Vec<Option<(Article, WordSet)>> = articles
        .into_iter()
        .map(|article| {
            let words = significant_words(&article.title, stop_words);
            Some((article, words))
        })
        .collect();

    let mut stories = Vec::new();
    for i in 0..pending.len() {
        let Some((article, words)) = pending[i].take() else {
            continue;
        };
        let mut cluster = Cluster::open(article, words);

        for slot in pending.iter_mut().skip(i + 1) {
            let similar = match slot {
                Some((_, candidate_words)) => jaccard(&cluster.words, candidate_words) > threshold,
                None => false,
            };
            if similar {
                if let Some((other, other_words)) = slot.take() {
                    cluster = cluster.absorb(other, other_words);
                }
            }
        }

        stories.push(cluster.into_article());
    }

    info!(
        input,
        stories = stories.len(),
        removed = input - stories.len(),
        "Title dedup complete"
    );
    stories
}
