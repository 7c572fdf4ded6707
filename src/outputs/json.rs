//! JSON output for the digest.
//!
//! The digest is either printed to stdout or written to
//! `{json_output_dir}/{slug(query)}.json`, one file per query.

use crate::models::Digest;
use crate::utils::slugify;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// Serialize a [`Digest`] to a JSON string.
pub fn to_json(digest: &Digest) -> Result<String, serde_json::Error> {
    serde_json::to_string(digest)
}

/// Write a [`Digest`] into `json_output_dir`.
///
/// # Arguments
///
/// * `digest` - The digest to serialize
/// * `json_output_dir` - Directory for JSON output, created if missing
///
/// # Returns
///
/// The path of the written file.
///
/// # Errors
///
/// Returns an error if serialization, directory creation or the file write
/// fails.
///
/// # Output Path
///
/// The file is written to: `{json_output_dir}/{slug(query)}.json`
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_digest(digest: &Digest, json_output_dir: &str) -> Result<String, Box<dyn Error>> {
    let json = to_json(digest)?;

    if let Err(e) = fs::create_dir_all(json_output_dir).await {
        error!(%json_output_dir, error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let output_json_filename = format!(
        "{}/{}.json",
        json_output_dir.trim_end_matches('/'),
        slugify(&digest.query)
    );

    info!(path = %output_json_filename, "Writing JSON");
    fs::write(&output_json_filename, json).await?;
    info!(path = %output_json_filename, count = digest.count, "Wrote digest JSON");

    Ok(output_json_filename)
}
