//! # Awful News Digest
//!
//! Consolidates the noisy, duplicate-heavy hit list returned by a news
//! aggregator into a short, deduplicated, importance-ranked digest suitable
//! for display and for language-model synthesis.
//!
//! ## Features
//!
//! - Normalizes raw hits (trimmed fields, absolute links, ISO-8601 timestamps)
//! - Removes exact duplicates by URL, ignoring query strings and fragments
//! - Merges near-duplicate headlines and records which outlets also covered them
//! - Ranks stories by cross-coverage first and recency second
//! - Emits JSON (stdout or file) and a plain-text rendition for LLM prompts
//!
//! ## Usage
//!
//! ```sh
//! awful_news_digest -i hits.json -q "federal reserve" -l 5
//! ```
//!
//! ## Architecture
//!
//! 1. **Input**: Read pre-fetched aggregator hits (file or stdin)
//! 2. **Consolidation**: normalize → URL dedup → title dedup → rerank
//! 3. **Truncation**: Keep the first `limit` stories and compute counters
//! 4. **Output**: Print or write the digest

use clap::Parser;
use std::error::Error;
use tokio::io::AsyncReadExt;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod dates;
mod dedup;
mod models;
mod normalize;
mod outputs;
mod pipeline;
mod rank;
mod similarity;
mod utils;

use cli::{Cli, OutputFormat};
use config::load_config;
use dates::ChronoDateParser;
use models::DigestInput;
use outputs::{json, text};
use pipeline::Pipeline;
use utils::{ensure_writable_dir, truncate_for_log};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_digest starting up");

    let args = Cli::parse();
    debug!(?args.input, ?args.query, ?args.limit, "Parsed CLI arguments");

    let config = load_config(args.config.as_deref()).await?;

    let raw_input = match read_input(&args.input).await {
        Ok(s) => s,
        Err(e) => {
            error!(input = %args.input, error = %e, "Failed to read input");
            return Err(e);
        }
    };
    let input: DigestInput = match serde_json::from_str(&raw_input) {
        Ok(parsed) => parsed,
        Err(e) => {
            error!(
                error = %e,
                input_preview = %truncate_for_log(&raw_input, 300),
                "Input is not a list of aggregator hits"
            );
            return Err(e.into());
        }
    };
    let (input_query, raw_articles) = input.into_parts();
    let query = args
        .query
        .or(input_query)
        .map(|q| q.trim().to_string())
        .unwrap_or_default();
    let limit = config.resolve_limit(args.limit);
    info!(%query, limit, raw = raw_articles.len(), "Loaded aggregator hits");

    // ---- Consolidate ----
    let pipeline = Pipeline::from_config(&config);
    let dates = ChronoDateParser::default();
    let consolidation = pipeline.consolidate(&raw_articles, &dates);

    let mut digest = consolidation.into_digest(&query, limit);
    digest.text = Some(text::format_text(&digest.results, &query));

    // ---- Output ----
    if let Some(dir) = args.json_output_dir.as_deref() {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir,
                error = %e,
                "JSON output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
        let path = json::write_digest(&digest, dir).await?;
        info!(%path, "Digest written");
    }

    match args.format {
        OutputFormat::Json => println!("{}", json::to_json(&digest)?),
        OutputFormat::Text => println!("{}", digest.text.as_deref().unwrap_or_default()),
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

/// Read the input document from a path, or stdin for `"-"`.
#[instrument(level = "info")]
async fn read_input(path: &str) -> Result<String, Box<dyn Error>> {
    if path == "-" {
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        Ok(buf)
    } else {
        Ok(tokio::fs::read_to_string(path).await?)
    }
}
