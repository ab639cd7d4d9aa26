//! Single page generation: one markdown file in, one HTML file out.
//!
//! ```text
//! source.md ──read──► markdown ──first "# " line──► title
//!                        │
//!                        └──converter──► fragment ──┐
//! template.html ──read──► template ─────────────────┴──render──► output.html
//! ```
//!
//! The page is rendered completely in memory before anything is written, so
//! a missing title, a conversion failure, or an unreadable template leaves no
//! output file behind. If the write itself fails the partial file is removed.
//! Parent directories of the output are never created here.

use crate::markdown::{ConversionError, Converter, Fragment};
use crate::template;
use crate::title::{self, TitleError};
use crate::types::GeneratedPage;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Title(#[from] TitleError),
    #[error("converting '{}': {source}", path.display())]
    Conversion {
        path: PathBuf,
        #[source]
        source: ConversionError,
    },
    #[error("symlink cycle: '{}' points back to one of its parent directories", .0.display())]
    SymlinkCycle(PathBuf),
}

impl GenerateError {
    pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| GenerateError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Generates the page for `source` using the template at `template_path`
/// and writes it to `output`.
pub fn generate_page<C: Converter + ?Sized>(
    source: &Path,
    template_path: &Path,
    output: &Path,
    converter: &C,
) -> Result<GeneratedPage, GenerateError> {
    let markdown = fs::read_to_string(source).map_err(GenerateError::io(source))?;
    let title = title::title_from_markdown(&markdown)
        .ok_or_else(|| TitleError::NoTitleFound(source.to_path_buf()))?;

    let fragment = converter
        .convert(&markdown)
        .map_err(|source_err| GenerateError::Conversion {
            path: source.to_path_buf(),
            source: source_err,
        })?;
    let content = fragment.to_html();

    let template_text =
        fs::read_to_string(template_path).map_err(GenerateError::io(template_path))?;
    let page = template::render(&template_text, &title, &content);

    write_page(output, &page)?;
    tracing::debug!(
        source = %source.display(),
        output = %output.display(),
        title = %title,
        "Generated page"
    );

    Ok(GeneratedPage {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        title,
    })
}

fn write_page(output: &Path, page: &str) -> Result<(), GenerateError> {
    if let Err(source) = fs::write(output, page) {
        // A failed write can leave a truncated file behind.
        if output.is_file() {
            let _ = fs::remove_file(output);
        }
        return Err(GenerateError::Io {
            path: output.to_path_buf(),
            source,
        });
    }
    Ok(())
}
