//! # sitegen
//!
//! A minimal static site generator. A tree of markdown files becomes a tree of
//! HTML pages sharing one template, and a static asset tree is copied over the
//! result.
//!
//! # Architecture: Two-Phase Build
//!
//! ```text
//! 1. Generate  content/ + template.html  →  docs/**/*.html
//! 2. Copy      static/                   →  docs/**
//! ```
//!
//! Each page goes through the same steps: read the markdown, take the first
//! `# ` heading as the title, convert the document to an HTML fragment, and
//! substitute both into the template's `{{ Title }}` and `{{ Content }}`
//! placeholders. The directory structure of the content tree is mirrored,
//! including directories that hold no markdown at all.
//!
//! Builds are fail-fast: the first error aborts the build and is reported
//! with the offending path. Nothing is rolled back; rerunning a build simply
//! overwrites what is there.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`build`] | Driver: destination root, generation phase, asset phase, `check` |
//! | [`tree`] | Mirrors the content tree and generates a page per markdown file |
//! | [`page`] | One markdown file → one HTML file |
//! | [`title`] | Title extraction from the first level-1 heading |
//! | [`template`] | `{{ Title }}` / `{{ Content }}` substitution, stock template |
//! | [`markdown`] | `Converter` / `Fragment` traits and the pulldown-cmark converter |
//! | [`assets`] | Byte-exact recursive copy of the static tree |
//! | [`entries`] | Sorted directory listings and symlink-cycle detection |
//! | [`naming`] | `.md` detection and `.html` output names |
//! | [`config`] | `sitegen.toml` loading, validation, and CLI overrides |
//! | [`types`] | Report records shared by the driver and the CLI |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Sorted Traversal
//!
//! Directory listings are sorted by file name before processing, so two
//! builds of the same tree visit (and report) pages in the same order.
//!
//! ## Plain-Text Templates
//!
//! The page template is a user-supplied file with two literal placeholders
//! rather than a template language. Placeholders are replaced everywhere they
//! occur, values are inserted verbatim, and a template that lacks one is
//! still valid.
//!
//! ## Pluggable Markdown
//!
//! Conversion sits behind the [`markdown::Converter`] trait. The bundled
//! [`markdown::CommonMark`] uses pulldown-cmark; tests use stubs.

pub mod assets;
pub mod build;
pub mod config;
pub mod entries;
pub mod markdown;
pub mod naming;
pub mod output;
pub mod page;
pub mod template;
pub mod title;
pub mod tree;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
