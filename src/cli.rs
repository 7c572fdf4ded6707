//! Command-line interface definitions for Awful News Digest.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Most options can also be provided through environment variables.

use clap::{Parser, ValueEnum};

/// Output format for the digest.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Full digest as JSON, including the text rendition.
    Json,
    /// Only the plain-text rendition.
    Text,
}

/// Command-line arguments for the Awful News Digest application.
///
/// # Examples
///
/// ```sh
/// # Consolidate aggregator hits from a file
/// awful_news_digest -i hits.json -q "federal reserve"
///
/// # Read from stdin, keep three stories, print plain text
/// cat hits.json | awful_news_digest -l 3 --format text
///
/// # Write the digest to ./digests/federal-reserve.json
/// awful_news_digest -i hits.json -q "federal reserve" -j ./digests
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// JSON file with raw aggregator hits ("-" reads stdin)
    #[arg(short, long, default_value = "-")]
    pub input: String,

    /// Query the hits were fetched for (overrides the one in the input file)
    #[arg(short, long)]
    pub query: Option<String>,

    /// Maximum number of stories to return
    #[arg(short, long, env = "NEWS_DIGEST_LIMIT")]
    pub limit: Option<usize>,

    /// Optional path to config.yaml file
    #[arg(short, long, env = "NEWS_DIGEST_CONFIG")]
    pub config: Option<String>,

    /// Output directory for the JSON digest file (prints to stdout when absent)
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Output format for stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["awful_news_digest"]);

        assert_eq!(cli.input, "-");
        assert!(cli.query.is_none());
        assert!(cli.json_output_dir.is_none());
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_long_flags() {
        let cli = Cli::parse_from([
            "awful_news_digest",
            "--input",
            "hits.json",
            "--query",
            "federal reserve",
            "--limit",
            "3",
            "--json-output-dir",
            "./digests",
            "--format",
            "text",
        ]);

        assert_eq!(cli.input, "hits.json");
        assert_eq!(cli.query.as_deref(), Some("federal reserve"));
        assert_eq!(cli.limit, Some(3));
        assert_eq!(cli.json_output_dir.as_deref(), Some("./digests"));
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "awful_news_digest",
            "-i",
            "/tmp/hits.json",
            "-q",
            "oil",
            "-c",
            "/tmp/config.yaml",
            "-j",
            "/tmp/json",
        ]);

        assert_eq!(cli.input, "/tmp/hits.json");
        assert_eq!(cli.query.as_deref(), Some("oil"));
        assert_eq!(cli.config.as_deref(), Some("/tmp/config.yaml"));
        assert_eq!(cli.json_output_dir.as_deref(), Some("/tmp/json"));
    }
}
