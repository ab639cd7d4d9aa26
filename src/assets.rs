//! Static asset mirroring.
//!
//! Copies the static tree into the destination byte for byte. Directories
//! are created as needed, existing files at the same path are overwritten,
//! and files that only exist in the destination are left alone: this is an
//! overlay, not a sync.
//!
//! Symbolic links are followed. A directory link pointing back at one of its
//! ancestors is reported as [`CopyError::SymlinkCycle`].

use crate::types::CopiedAsset;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CopyError {
    #[error("IO error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("symlink cycle: '{}' points back to one of its parent directories", .0.display())]
    SymlinkCycle(PathBuf),
}

impl CopyError {
    fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| CopyError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn walk(err: walkdir::Error, root: &Path) -> Self {
        let path = err.path().unwrap_or(root).to_path_buf();
        if err.loop_ancestor().is_some() {
            return CopyError::SymlinkCycle(path);
        }
        CopyError::Io {
            path,
            source: io::Error::from(err),
        }
    }
}

/// Copies every file under `source_root` to the same relative path under
/// `destination_root`.
///
/// `destination_root` is created first, so it exists even when the source
/// turns out to be missing.
///
/// Returns the copied files in traversal order (sorted by name, parents
/// before children).
pub fn copy_tree(source_root: &Path, destination_root: &Path) -> Result<Vec<CopiedAsset>, CopyError> {
    fs::create_dir_all(destination_root).map_err(CopyError::io(destination_root))?;
    let metadata = fs::metadata(source_root).map_err(CopyError::io(source_root))?;
    if !metadata.is_dir() {
        return Err(CopyError::Io {
            path: source_root.to_path_buf(),
            source: io::Error::other("not a directory"),
        });
    }

    let walker = WalkDir::new(source_root)
        .follow_links(true)
        .sort_by_file_name()
        .min_depth(1);

    let mut copied = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| CopyError::walk(e, source_root))?;
        let relative = entry
            .path()
            .strip_prefix(source_root)
            .map_err(|e| CopyError::Io {
                path: entry.path().to_path_buf(),
                source: io::Error::other(e),
            })?;
        let target = destination_root.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target).map_err(CopyError::io(&target))?;
        } else if file_type.is_file() {
            let bytes = fs::copy(entry.path(), &target).map_err(CopyError::io(&target))?;
            tracing::debug!(
                source = %entry.path().display(),
                output = %target.display(),
                bytes,
                "Copied asset"
            );
            copied.push(CopiedAsset {
                source: entry.path().to_path_buf(),
                output: target,
                bytes,
            });
        }
    }
    Ok(copied)
}
