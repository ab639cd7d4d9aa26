//! Page titles from level-1 headings.
//!
//! The title of a document is its first line that, once surrounding
//! whitespace is trimmed, starts with `"# "`. The marker is stripped and the
//! remainder trimmed:
//!
//! ```text
//! # Home                →  "Home"
//!    #   Spaced Out     →  "Spaced Out"
//! ## Section            →  (no match, level 2)
//! #Tight                →  (no match, needs the space)
//! #                     →  (no match, empty title)
//! ```
//!
//! A document without a matching line has no title, which is an error: every
//! generated page needs one for its `{{ Title }}` placeholder.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Marker that opens a level-1 heading line.
pub const HEADING_MARKER: &str = "# ";

#[derive(Error, Debug)]
pub enum TitleError {
    #[error("reading '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no title found in '{}': expected a line starting with '# '", .0.display())]
    NoTitleFound(PathBuf),
}

/// Title carried by a single line, if it is a level-1 heading.
pub fn heading_title(line: &str) -> Option<&str> {
    let title = line.trim().strip_prefix(HEADING_MARKER)?.trim();
    (!title.is_empty()).then_some(title)
}

/// Title of an in-memory markdown document.
pub fn title_from_markdown(markdown: &str) -> Option<String> {
    markdown.lines().find_map(heading_title).map(str::to_string)
}

/// Scans the file at `path` line by line and returns its title.
///
/// Reading stops at the first matching line.
pub fn extract_title(path: &Path) -> Result<String, TitleError> {
    let io_err = |source| TitleError::Io {
        path: path.to_path_buf(),
        source,
    };
    let reader = BufReader::new(File::open(path).map_err(io_err)?);
    for line in reader.lines() {
        let line = line.map_err(io_err)?;
        if let Some(title) = heading_title(&line) {
            return Ok(title.to_string());
        }
    }
    Err(TitleError::NoTitleFound(path.to_path_buf()))
}
