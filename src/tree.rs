//! Mirroring the content tree into the destination.
//!
//! Every directory under the content root is recreated under the destination
//! root (empty ones included), and every `*.md` file becomes a page with the
//! same stem and an `.html` extension:
//!
//! ```text
//! content/                     docs/
//! ├── index.md          →      ├── index.html
//! ├── notes.txt                │
//! ├── blog/             →      ├── blog/
//! │   └── first.md      →      │   └── first.html
//! └── drafts/           →      └── drafts/
//! ```
//!
//! Other files are skipped. Entries are visited in sorted order and the first
//! error aborts the whole walk.
//!
//! ## Parallel Walks
//!
//! With [`TreeWalker::parallel`] the entries of each directory are processed
//! on the rayon pool. Results are still collected in sorted order, and rayon
//! stops scheduling work once any entry fails, so a single error is reported
//! just like in a sequential walk.

use crate::entries::{Ancestors, Entry, EntryKind, collect_entries};
use crate::markdown::Converter;
use crate::naming;
use crate::page::{GenerateError, generate_page};
use crate::types::TreeReport;
use rayon::prelude::*;
use std::fs;
use std::path::Path;

/// Walks a content tree and generates a page for every markdown file.
pub struct TreeWalker<'a, C> {
    converter: &'a C,
    parallel: bool,
}

impl<'a, C: Converter> TreeWalker<'a, C> {
    pub fn new(converter: &'a C) -> Self {
        Self {
            converter,
            parallel: false,
        }
    }

    /// Process the entries of each directory in parallel.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Mirrors `content_root` into `destination_root`, which must exist.
    pub fn generate_tree(
        &self,
        content_root: &Path,
        template_path: &Path,
        destination_root: &Path,
    ) -> Result<TreeReport, GenerateError> {
        let ancestors = Ancestors::new(content_root).map_err(GenerateError::io(content_root))?;
        self.walk(content_root, template_path, destination_root, &ancestors)
    }

    fn walk(
        &self,
        dir: &Path,
        template_path: &Path,
        destination: &Path,
        ancestors: &Ancestors,
    ) -> Result<TreeReport, GenerateError> {
        let entries = collect_entries(dir).map_err(GenerateError::io(dir))?;
        let visit = |entry: &Entry| self.visit(entry, template_path, destination, ancestors);

        let reports: Vec<TreeReport> = if self.parallel {
            entries.par_iter().map(visit).collect::<Result<_, _>>()?
        } else {
            entries.iter().map(visit).collect::<Result<_, _>>()?
        };

        let mut merged = TreeReport::default();
        for report in reports {
            merged.pages.extend(report.pages);
            merged.directories.extend(report.directories);
        }
        Ok(merged)
    }

    fn visit(
        &self,
        entry: &Entry,
        template_path: &Path,
        destination: &Path,
        ancestors: &Ancestors,
    ) -> Result<TreeReport, GenerateError> {
        match entry.kind {
            EntryKind::File if naming::is_markdown(&entry.path) => {
                let output = naming::output_path(&entry.path, destination);
                let page = generate_page(&entry.path, template_path, &output, self.converter)?;
                Ok(TreeReport {
                    pages: vec![page],
                    directories: Vec::new(),
                })
            }
            EntryKind::Dir => {
                let child_ancestors = ancestors
                    .descend(&entry.path)
                    .map_err(GenerateError::io(&entry.path))?
                    .ok_or_else(|| GenerateError::SymlinkCycle(entry.path.clone()))?;

                let target = destination.join(entry.file_name());
                fs::create_dir_all(&target).map_err(GenerateError::io(&target))?;
                tracing::debug!(directory = %target.display(), "Mirrored directory");

                let sub = self.walk(&entry.path, template_path, &target, &child_ancestors)?;
                let mut directories = Vec::with_capacity(sub.directories.len() + 1);
                directories.push(target);
                directories.extend(sub.directories);
                Ok(TreeReport {
                    pages: sub.pages,
                    directories,
                })
            }
            EntryKind::File | EntryKind::Other => {
                tracing::trace!(path = %entry.path.display(), "Skipped non-markdown entry");
                Ok(TreeReport::default())
            }
        }
    }
}

/// Sequentially mirrors `content_root` into `destination_root`.
///
/// Shorthand for `TreeWalker::new(converter).generate_tree(..)`.
pub fn generate_tree<C: Converter>(
    content_root: &Path,
    template_path: &Path,
    destination_root: &Path,
    converter: &C,
) -> Result<TreeReport, GenerateError> {
    TreeWalker::new(converter).generate_tree(content_root, template_path, destination_root)
}
