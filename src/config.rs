//! YAML configuration for the digest.
//!
//! Every field is optional; a missing file section falls back to the
//! built-in defaults.
//!
//! ```yaml
//! default_limit: 5
//! max_limit: 8
//! similarity_threshold: 0.5
//! aggregator_base_url: https://news.google.com
//! stop_words: [the, a, an]
//! ```

use crate::dedup::DEFAULT_SIMILARITY_THRESHOLD;
use crate::normalize::DEFAULT_AGGREGATOR_BASE_URL;
use crate::similarity::StopWords;
use serde::{Deserialize, Serialize};
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Digest configuration as read from `config.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DigestConfig {
    /// Results returned when no limit is requested.
    pub default_limit: usize,
    /// Upper bound for a requested limit.
    pub max_limit: usize,
    /// Title pairs must score strictly above this to merge.
    pub similarity_threshold: f64,
    /// Base URL for aggregator-relative links.
    pub aggregator_base_url: String,
    /// Replaces the built-in stop-word list when set.
    pub stop_words: Option<Vec<String>>,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            default_limit: 5,
            max_limit: 8,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            aggregator_base_url: DEFAULT_AGGREGATOR_BASE_URL.to_string(),
            stop_words: None,
        }
    }
}

impl DigestConfig {
    /// Parse a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Stop words to use for title comparison.
    pub fn stop_words(&self) -> StopWords {
        match &self.stop_words {
            Some(words) => words.iter().collect(),
            None => StopWords::default(),
        }
    }

    /// Clamp a requested limit to `1..=max_limit`, defaulting when absent.
    pub fn resolve_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit.max(1))
    }
}

/// Load the configuration file, or the defaults when no path is given.
///
/// # Arguments
///
/// * `path` - Optional path to a YAML configuration file
///
/// # Returns
///
/// The parsed [`DigestConfig`], with defaults for any missing field.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid YAML for
/// [`DigestConfig`].
#[instrument(level = "info")]
pub async fn load_config(path: Option<&str>) -> Result<DigestConfig, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(DigestConfig::default());
    };
    let yaml = fs::read_to_string(path).await?;
    let config = DigestConfig::from_yaml(&yaml)?;
    info!(
        path,
        max_limit = config.max_limit,
        similarity_threshold = config.similarity_threshold,
        custom_stop_words = config.stop_words.is_some(),
        "Loaded configuration"
    );
    Ok(config)
}
