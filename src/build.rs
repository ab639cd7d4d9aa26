//! The build driver.
//!
//! A build runs two phases into the destination root:
//!
//! ```text
//! 1. Generate  content/ ─► docs/**/*.html   (tree walker, one page per *.md)
//! 2. Copy      static/  ─► docs/**          (asset mirror, overwrites pages)
//! ```
//!
//! Assets are copied last, so a static file wins over a generated page with
//! the same path. The first failure in either phase aborts the build; files
//! already written stay where they are, and rerunning overwrites them.

use crate::assets::{CopyError, copy_tree};
use crate::config::{BuildConfig, ConfigError};
use crate::entries::{Ancestors, EntryKind, collect_entries};
use crate::markdown::Converter;
use crate::naming;
use crate::page::GenerateError;
use crate::template;
use crate::title;
use crate::tree::TreeWalker;
use crate::types::{BuildReport, CheckReport, CheckedPage};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Generating pages: {0}")]
    Generate(#[from] GenerateError),
    #[error("Copying static assets: {0}")]
    Copy(#[from] CopyError),
    #[error("creating destination '{}': {source}", path.display())]
    Destination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Runs a full build: pages first, then static assets.
pub fn build<C: Converter>(config: &BuildConfig, converter: &C) -> Result<BuildReport, BuildError> {
    config.validate()?;
    let destination = config.destination_root();
    fs::create_dir_all(&destination).map_err(|source| BuildError::Destination {
        path: destination.clone(),
        source,
    })?;

    warn_missing_placeholders(&config.template);

    tracing::info!(
        content = %config.content_dir.display(),
        destination = %destination.display(),
        parallel = config.build.parallel,
        "Generating pages"
    );
    let tree = TreeWalker::new(converter)
        .parallel(config.build.parallel)
        .generate_tree(&config.content_dir, &config.template, &destination)?;

    tracing::info!(
        source = %config.static_dir.display(),
        destination = %destination.display(),
        "Copying static assets"
    );
    let assets = copy_tree(&config.static_dir, &destination)?;

    Ok(BuildReport {
        destination,
        pages: tree.pages,
        directories: tree.directories,
        assets,
    })
}

/// Logs a warning for each placeholder the template lacks.
///
/// An unreadable template is left for the page generator to report, so a
/// content tree without markdown still builds.
fn warn_missing_placeholders(template_path: &Path) {
    let Ok(text) = fs::read_to_string(template_path) else {
        return;
    };
    for placeholder in template::missing_placeholders(&text) {
        tracing::warn!(
            template = %template_path.display(),
            placeholder,
            "Template has no placeholder; pages will not include it"
        );
    }
}

/// Validates the content tree without writing anything.
///
/// Every markdown document must have a title and the template must be
/// readable. Traversal order and symlink handling match [`build`].
pub fn check(config: &BuildConfig) -> Result<CheckReport, BuildError> {
    config.validate()?;
    let template_text =
        fs::read_to_string(&config.template).map_err(GenerateError::io(&config.template))?;

    let root = &config.content_dir;
    let ancestors = Ancestors::new(root).map_err(GenerateError::io(root))?;
    let mut pages = Vec::new();
    check_dir(root, &ancestors, &mut pages)?;

    Ok(CheckReport {
        pages,
        missing_placeholders: template::missing_placeholders(&template_text)
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}

fn check_dir(
    dir: &Path,
    ancestors: &Ancestors,
    pages: &mut Vec<CheckedPage>,
) -> Result<(), GenerateError> {
    for entry in collect_entries(dir).map_err(GenerateError::io(dir))? {
        match entry.kind {
            EntryKind::File if naming::is_markdown(&entry.path) => {
                let title = title::extract_title(&entry.path)?;
                pages.push(CheckedPage {
                    source: entry.path,
                    title,
                });
            }
            EntryKind::Dir => {
                let child = ancestors
                    .descend(&entry.path)
                    .map_err(GenerateError::io(&entry.path))?
                    .ok_or_else(|| GenerateError::SymlinkCycle(entry.path.clone()))?;
                check_dir(&entry.path, &child, pages)?;
            }
            EntryKind::File | EntryKind::Other => {}
        }
    }
    Ok(())
}
