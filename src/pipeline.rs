//! The consolidation pipeline.
//!
//! ```text
//! raw hits ─► normalize ─► URL dedup ─► title dedup ─► rerank ─► (caller truncates)
//! ```
//!
//! Every stage consumes the full output of the previous one. The pipeline is
//! a pure function of its input, configuration and date parser: it performs
//! no I/O, holds no state between runs and never fails.

use crate::config::DigestConfig;
use crate::dates::DateParser;
use crate::dedup::{dedup_by_title, dedup_by_url};
use crate::models::{Article, Digest, DigestMeta, RawArticle};
use crate::normalize::Normalizer;
use crate::rank::rerank;
use crate::similarity::StopWords;
use crate::utils::round2;
use itertools::Itertools;
use tracing::{info, instrument};

/// Result of one consolidation run, before truncation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Consolidation {
    /// Ranked stories, most important first.
    pub articles: Vec<Article>,
    /// Articles that entered the pipeline (empty titles excluded).
    pub raw_count: usize,
    /// Stories left after both deduplication passes.
    pub deduped_count: usize,
}

impl Consolidation {
    /// Articles removed as duplicates.
    pub fn removed(&self) -> usize {
        self.raw_count - self.deduped_count
    }

    /// Take the first `limit` stories and compute the digest counters.
    pub fn into_digest(self, query: &str, limit: usize) -> Digest {
        let removed = self.removed();
        let raw_count = self.raw_count;
        let deduped_count = self.deduped_count;
        let results: Vec<Article> = self.articles.into_iter().take(limit).collect();

        let image_count = results.iter().filter(|a| a.has_image()).count();
        let meta = DigestMeta {
            article_count_raw: raw_count,
            article_count_deduped: deduped_count,
            dedup_removed: removed,
            dedup_ratio: ratio(removed, raw_count),
            image_availability_rate: ratio(image_count, results.len()),
            source_diversity: results
                .iter()
                .map(|a| a.source.as_str())
                .filter(|s| !s.is_empty())
                .unique()
                .count(),
        };

        info!(
            query,
            article_count = results.len(),
            image_count,
            dedup_removed = removed,
            "Digest complete"
        );

        Digest {
            count: results.len(),
            results,
            query: query.to_string(),
            text: None,
            meta,
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        round2(numerator as f64 / denominator as f64)
    }
}

/// A configured consolidation pipeline.
#[derive(Debug, Clone)]
pub struct Pipeline {
    stop_words: StopWords,
    similarity_threshold: f64,
    aggregator_base_url: String,
}

impl Pipeline {
    pub fn new(stop_words: StopWords, similarity_threshold: f64, aggregator_base_url: &str) -> Self {
        Self {
            stop_words,
            similarity_threshold,
            aggregator_base_url: aggregator_base_url.to_string(),
        }
    }

    pub fn from_config(config: &DigestConfig) -> Self {
        Self::new(
            config.stop_words(),
            config.similarity_threshold,
            &config.aggregator_base_url,
        )
    }

    /// Run every stage over `raw`.
    ///
    /// An empty input yields an empty consolidation with zero counts.
    ///
    /// # Arguments
    ///
    /// * `raw` - Pre-fetched aggregator hits, in aggregator order
    /// * `dates` - Parser used to fill `published_at`
    ///
    /// # Returns
    ///
    /// The ranked stories with raw and deduplicated counts. Never fails.
    #[instrument(level = "info", skip_all, fields(input = raw.len()))]
    pub fn consolidate(&self, raw: &[RawArticle], dates: &dyn DateParser) -> Consolidation {
        let normalizer = Normalizer::new(&self.aggregator_base_url, dates);
        let normalized: Vec<Article> = raw.iter().filter_map(|r| normalizer.normalize(r)).collect();
        let raw_count = normalized.len();
        if raw_count < raw.len() {
            info!(skipped = raw.len() - raw_count, "Skipped records with empty titles");
        }

        let url_deduped = dedup_by_url(normalized);
        let stories = dedup_by_title(url_deduped, &self.stop_words, self.similarity_threshold);
        let deduped_count = stories.len();
        let articles = rerank(stories);

        info!(raw_count, deduped_count, removed = raw_count - deduped_count, "Consolidation complete");
        Consolidation {
            articles,
            raw_count,
            deduped_count,
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::from_config(&DigestConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::ChronoDateParser;
    use chrono::NaiveDate;

    fn dates() -> ChronoDateParser {
        ChronoDateParser::at(
            NaiveDate::from_ymd_opt(2024, 6, 15)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        )
    }

    fn raw(title: &str, media: &str, date: &str, link: &str) -> RawArticle {
        RawArticle {
            title: Some(title.to_string()),
            media: Some(media.to_string()),
            date: Some(date.to_string()),
            desc: None,
            link: Some(link.to_string()),
            img: None,
        }
    }

    fn scenario() -> Vec<RawArticle> {
        vec![
            raw("Fed raises interest rates again", "Reuters", "2 hours ago", "https://reuters.com/fed"),
            raw("Oil prices slip as supply grows", "Bloomberg", "1 hour ago", "https://bloomberg.com/oil?utm_source=x"),
            raw("Fed raises interest rates", "AP", "3 hours ago", "https://apnews.com/fed"),
            // Same link as the second record; only URL dedup can remove it.
            raw("Crude slides on supply glut", "Bloomberg", "4 hours ago", "https://bloomberg.com/oil#top"),
            raw("Tech stocks rally on earnings", "CNBC", "5 hours ago", "https://cnbc.com/tech"),
        ]
    }

    #[test]
    fn test_concrete_scenario() {
        let result = Pipeline::default().consolidate(&scenario(), &dates());

        assert_eq!(result.raw_count, 5);
        assert_eq!(result.deduped_count, 3);
        assert_eq!(result.removed(), 2);

        let fed = &result.articles[0];
        assert_eq!(fed.title, "Fed raises interest rates again");
        assert_eq!(fed.also_reported_by, vec!["AP"]);

        let titles: Vec<&str> = result.articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Fed raises interest rates again",
                "Oil prices slip as supply grows",
                "Tech stocks rally on earnings",
            ]
        );

        let oil = &result.articles[1];
        assert_eq!(oil.url, "https://bloomberg.com/oil?utm_source=x");
        assert_eq!(oil.published_at, "2024-06-15T11:00:00");
        assert!(oil.also_reported_by.is_empty());
    }

    #[test]
    fn test_rerun_is_deterministic() {
        let pipeline = Pipeline::default();
        let parser = dates();
        let first = pipeline.consolidate(&scenario(), &parser);
        let second = pipeline.consolidate(&scenario(), &parser);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input() {
        let result = Pipeline::default().consolidate(&[], &dates());
        assert!(result.articles.is_empty());
        assert_eq!(result.raw_count, 0);
        assert_eq!(result.removed(), 0);

        let digest = result.into_digest("anything", 5);
        assert_eq!(digest.count, 0);
        assert_eq!(digest.meta, DigestMeta::default());
    }

    #[test]
    fn test_all_empty_titles() {
        let records = vec![raw("  ", "AP", "", ""), RawArticle::default()];
        let result = Pipeline::default().consolidate(&records, &dates());
        assert!(result.articles.is_empty());
        assert_eq!(result.raw_count, 0);
    }

    #[test]
    fn test_into_digest_meta() {
        let mut records = scenario();
        records[2].img = Some("https://img.example.com/fed.jpg".to_string());

        let digest = Pipeline::default()
            .consolidate(&records, &dates())
            .into_digest("markets", 2);

        assert_eq!(digest.count, 2);
        assert_eq!(digest.query, "markets");
        assert_eq!(digest.results[0].source, "AP");
        assert_eq!(digest.results[0].also_reported_by, vec!["Reuters"]);
        assert_eq!(digest.meta.article_count_raw, 5);
        assert_eq!(digest.meta.article_count_deduped, 3);
        assert_eq!(digest.meta.dedup_removed, 2);
        assert_eq!(digest.meta.dedup_ratio, 0.4);
        assert_eq!(digest.meta.image_availability_rate, 0.5);
        assert_eq!(digest.meta.source_diversity, 2);
    }
}
