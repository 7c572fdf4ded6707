//! Title similarity: significant-word extraction and Jaccard index.
//!
//! Titles are compared as bags of significant words. A significant word is a
//! lowercase, punctuation-stripped token longer than two characters that is
//! not in the configured [`StopWords`] set.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Built-in stop-word list: articles, conjunctions, prepositions and
/// common auxiliary verbs.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "in", "on", "at", "to", "for", "of", "is", "are", "was",
    "were", "and", "or", "but", "not", "with", "from", "by", "as", "it", "its",
    "this", "that", "has", "have", "had", "be", "been", "will", "would", "can",
    "could", "may", "might", "do", "does", "did", "up", "out", "over", "after",
    "into", "than", "how", "what", "when", "who", "all", "more", "about",
];

static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());

/// The set of significant words of one title.
pub type WordSet = HashSet<String>;

/// An immutable stop-word set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopWords(HashSet<String>);

impl StopWords {
    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }
}

impl Default for StopWords {
    fn default() -> Self {
        DEFAULT_STOP_WORDS.iter().copied().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for StopWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        StopWords(
            iter.into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        )
    }
}

/// Extract the significant words of a title.
///
/// # Examples
///
/// ```ignore
/// let words = significant_words("The Fed raises rates, again!", &StopWords::default());
/// // {"fed", "raises", "rates", "again"}
/// ```
pub fn significant_words(title: &str, stop_words: &StopWords) -> WordSet {
    let lowered = title.to_lowercase();
    PUNCTUATION
        .replace_all(&lowered, "")
        .split_whitespace()
        .filter(|w| w.chars().count() > 2 && !stop_words.contains(w))
        .map(str::to_string)
        .collect()
}

/// Jaccard index of two word sets: intersection over union, `0.0` when either
/// set is empty.
pub fn jaccard(a: &WordSet, b: &WordSet) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(items: &[&str]) -> WordSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_significant_words_drops_stop_words_and_short_tokens() {
        let set = significant_words("The Fed is up 2% on AI news", &StopWords::default());
        assert_eq!(set, words(&["fed", "news"]));
    }

    #[test]
    fn test_significant_words_strips_punctuation() {
        let set = significant_words("Biden's plan: \"tax-cuts\" now!", &StopWords::default());
        assert_eq!(set, words(&["bidens", "plan", "taxcuts", "now"]));
    }

    #[test]
    fn test_significant_words_custom_stop_words() {
        let stop: StopWords = ["fed", "rates"].into_iter().collect();
        let set = significant_words("The Fed raises rates", &stop);
        assert_eq!(set, words(&["the", "raises"]));
    }

    #[test]
    fn test_significant_words_counts_characters_not_bytes() {
        // "été" is three characters but six bytes
        let set = significant_words("été où", &StopWords::default());
        assert_eq!(set, words(&["été"]));
    }

    #[test]
    fn test_jaccard_basic() {
        let a = words(&["fed", "raises", "interest", "rates", "again"]);
        let b = words(&["fed", "raises", "interest", "rates"]);
        assert!((jaccard(&a, &b) - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_jaccard_empty_is_zero() {
        let a = words(&["fed"]);
        assert_eq!(jaccard(&a, &WordSet::new()), 0.0);
        assert_eq!(jaccard(&WordSet::new(), &WordSet::new()), 0.0);
    }

    #[test]
    fn test_jaccard_half_overlap() {
        let a = words(&["alpha", "beta"]);
        let b = words(&["beta", "gamma"]);
        assert!((jaccard(&a, &b) - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_stop_words() {
        let stop = StopWords::default();
        assert!(DEFAULT_STOP_WORDS.iter().all(|w| stop.contains(w)));
        assert!(!stop.contains("fed"));
    }
}
