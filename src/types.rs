//! Records describing what a build produced.
//!
//! Returned by the pipeline stages, rendered by [`crate::output`], and
//! serialized to JSON by `sitegen build --json`.

use serde::Serialize;
use std::path::PathBuf;

/// One markdown document turned into one HTML page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedPage {
    /// Markdown source file
    pub source: PathBuf,
    /// Written HTML file
    pub output: PathBuf,
    /// Title from the first `# heading` line
    pub title: String,
}

/// One static file copied into the destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CopiedAsset {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Number of bytes copied
    pub bytes: u64,
}

/// Outcome of mirroring the content tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TreeReport {
    /// Pages in traversal order (directory by directory, sorted by name)
    pub pages: Vec<GeneratedPage>,
    /// Destination directories created or reused, in traversal order
    pub directories: Vec<PathBuf>,
}

/// Outcome of a full build.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildReport {
    pub destination: PathBuf,
    pub pages: Vec<GeneratedPage>,
    pub directories: Vec<PathBuf>,
    pub assets: Vec<CopiedAsset>,
}

/// A markdown document that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckedPage {
    pub source: PathBuf,
    pub title: String,
}

/// Outcome of `sitegen check`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CheckReport {
    pub pages: Vec<CheckedPage>,
    /// Placeholders the template lacks (not an error, pages just omit them)
    pub missing_placeholders: Vec<String>,
}
