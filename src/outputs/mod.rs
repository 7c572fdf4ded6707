//! Output generation for a consolidated digest.
//!
//! # Submodules
//!
//! - [`json`]: Serializes a [`Digest`](crate::models::Digest) to stdout or a file
//! - [`text`]: Plain-text rendition for language-model synthesis
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! ├── federal-reserve.json
//! └── oil-prices.json
//! ```

pub mod json;
pub mod text;
