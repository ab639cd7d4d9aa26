//! Shared test utilities for the sitegen test suite.
//!
//! Provides fixture setup, small filesystem writers, a tree listing helper
//! for asserting on whole output trees, and stub converters that stand in for
//! the markdown collaborator.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let site = setup_fixtures();
//! let config = fixture_config(site.path());
//! build(&config, &CommonMark::default()).unwrap();
//!
//! assert_tree(&config.destination_root(), &["index.html", "style.css"]);
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::BuildConfig;
use crate::markdown::{ConversionError, Converter, Fragment};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// A config whose every path lives under `root`.
pub fn fixture_config(root: &Path) -> BuildConfig {
    BuildConfig {
        content_dir: root.join("content"),
        static_dir: root.join("static"),
        template: root.join("template.html"),
        output_dir: root.join("docs"),
        ..BuildConfig::default()
    }
}

// =========================================================================
// Filesystem helpers
// =========================================================================

/// Write `content` to `path`, creating parent directories.
pub fn write_file(path: &Path, content: impl AsRef<[u8]>) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Read a file as a string. Panics with the path on failure.
pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("reading '{}': {e}", path.display()))
}

/// Every file and directory under `root`, as sorted `/`-separated relative
/// paths. Directories end with `/`.
pub fn list_tree(root: &Path) -> Vec<String> {
    let mut out = Vec::new();
    list_tree_into(root, root, &mut out);
    out.sort();
    out
}

fn list_tree_into(root: &Path, dir: &Path, out: &mut Vec<String>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        let rel: PathBuf = path.strip_prefix(root).unwrap().to_path_buf();
        let rel = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect::<Vec<_>>()
            .join("/");
        if path.is_dir() {
            out.push(format!("{rel}/"));
            list_tree_into(root, &path, out);
        } else {
            out.push(rel);
        }
    }
}

/// Assert the exact set of entries under `root`.
pub fn assert_tree(root: &Path, expected: &[&str]) {
    let mut expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
    expected.sort();
    assert_eq!(list_tree(root), expected, "tree under '{}'", root.display());
}

// =========================================================================
// Stub converters
// =========================================================================

/// Fragment that renders to a fixed string.
pub struct StubFragment(pub String);

impl Fragment for StubFragment {
    fn to_html(&self) -> String {
        self.0.clone()
    }
}

/// Wraps the whole markdown body in `<pre>`, so tests can see exactly what
/// the generator passed to the converter.
pub struct EchoConverter;

impl Converter for EchoConverter {
    type Fragment = StubFragment;

    fn convert(&self, markdown: &str) -> Result<StubFragment, ConversionError> {
        Ok(StubFragment(format!("<pre>{markdown}</pre>")))
    }
}

/// Rejects every document.
pub struct FailingConverter;

impl Converter for FailingConverter {
    type Fragment = StubFragment;

    fn convert(&self, _markdown: &str) -> Result<StubFragment, ConversionError> {
        Err(ConversionError::new("converter refused the document"))
    }
}
