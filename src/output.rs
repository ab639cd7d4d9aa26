//! CLI output formatting for builds and checks.
//!
//! # Information-First Display
//!
//! Every page is shown by its title first, with the written file beside it
//! and the markdown source as an indented `Source:` line. Paths are relative
//! to the content root and the destination root, so the listing reads as a
//! site map rather than a file dump.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Pages
//! 001 First Post → blog/first-post.html
//!     Source: blog/first-post.md
//! 002 Welcome → index.html
//!     Source: index.md
//!
//! Assets
//! 001 index.css (85 bytes)
//!
//! Generated 2 pages, 1 directory, 1 asset → docs
//! ```
//!
//! ## Check
//!
//! ```text
//! 001 First Post
//!     Source: blog/first-post.md
//! Template is missing {{ Content }}
//!
//! 1 page OK
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::types::{BuildReport, CheckReport};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `path` relative to `base` when it lies under it, unchanged otherwise.
fn relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// `1 page`, `2 pages`.
fn count(n: u64, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(report: &BuildReport, content_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    let destination = &report.destination;

    if !report.pages.is_empty() {
        lines.push("Pages".to_string());
        for (i, page) in report.pages.iter().enumerate() {
            lines.push(format!(
                "{} {} → {}",
                format_index(i + 1),
                page.title,
                relative(&page.output, destination)
            ));
            lines.push(format!(
                "{}Source: {}",
                indent(1),
                relative(&page.source, content_root)
            ));
        }
        lines.push(String::new());
    }

    if !report.assets.is_empty() {
        lines.push("Assets".to_string());
        for (i, asset) in report.assets.iter().enumerate() {
            lines.push(format!(
                "{} {} ({})",
                format_index(i + 1),
                relative(&asset.output, destination),
                count(asset.bytes, "byte", "bytes")
            ));
        }
        lines.push(String::new());
    }

    lines.push(format!(
        "Generated {}, {}, {} → {}",
        count(report.pages.len() as u64, "page", "pages"),
        count(report.directories.len() as u64, "directory", "directories"),
        count(report.assets.len() as u64, "asset", "assets"),
        destination.display()
    ));
    lines
}

pub fn print_build_output(report: &BuildReport, content_root: &Path) {
    for line in format_build_output(report, content_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(report: &CheckReport, content_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, page) in report.pages.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), page.title));
        lines.push(format!(
            "{}Source: {}",
            indent(1),
            relative(&page.source, content_root)
        ));
    }
    for placeholder in &report.missing_placeholders {
        lines.push(format!("Template is missing {}", placeholder));
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!("{} OK", count(report.pages.len() as u64, "page", "pages")));
    lines
}

pub fn print_check_output(report: &CheckReport, content_root: &Path) {
    for line in format_check_output(report, content_root) {
        println!("{}", line);
    }
}
