//! Centralized filename rules for source documents.
//!
//! A markdown source is any file whose name ends in `.md`. Its page is
//! written under the same stem with an `html` extension:
//! - `index.md` → `index.html`
//! - `release.notes.md` → `release.notes.html`
//! - `.md` → `.md.html` (a dotfile has no stem to keep, so the name is kept whole)
//! - `README.MD` → not markdown (the match is case-sensitive)
//!
//! Everything else keeps its name when mirrored.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Extension that marks a markdown source document.
pub const MARKDOWN_EXTENSION: &str = "md";

/// File name suffix that marks a markdown source document.
const MARKDOWN_SUFFIX: &[u8] = b".md";

/// Extension given to generated pages.
pub const HTML_EXTENSION: &str = "html";

/// Returns true when the file name of `path` ends in `.md`.
pub fn is_markdown(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.as_encoded_bytes().ends_with(MARKDOWN_SUFFIX))
}

/// Output filename for a markdown source: the `md` extension becomes `html`.
///
/// A dotfile such as `.md` has no extension of its own and keeps its full
/// name, giving `.md.html`.
///
/// Only the final path component is used, so callers can pass either a bare
/// file name or a full source path.
pub fn html_file_name(source: &Path) -> PathBuf {
    let name = source.file_name().unwrap_or(source.as_os_str());
    let name_path = Path::new(name);
    let mut output = if name_path.extension() == Some(OsStr::new(MARKDOWN_EXTENSION)) {
        name_path.file_stem().unwrap_or(name).to_os_string()
    } else {
        OsString::from(name)
    };
    output.push(".");
    output.push(HTML_EXTENSION);
    PathBuf::from(output)
}

/// Output path for a markdown source inside `destination_dir`.
pub fn output_path(source: &Path, destination_dir: &Path) -> PathBuf {
    destination_dir.join(html_file_name(source))
}
