//! Directory listing shared by the page generator and the asset mirror.
//!
//! Entries are returned sorted by file name so builds are reproducible
//! regardless of the order the filesystem reports them in. Symbolic links are
//! followed: an entry is classified by what it points to, and a directory
//! link that leads back to one of its own ancestors is reported as a cycle.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What a directory entry resolves to after following links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    /// Sockets, fifos, devices. Skipped by every walker.
    Other,
}

/// A child of a listed directory.
#[derive(Debug, Clone)]
pub struct Entry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl Entry {
    /// Final path component. Always present for listed entries.
    pub fn file_name(&self) -> &std::ffi::OsStr {
        self.path.file_name().unwrap_or(self.path.as_os_str())
    }
}

/// Lists the children of `dir`, sorted by file name.
pub fn collect_entries(dir: &Path) -> io::Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        // `metadata` follows symlinks; a dangling link fails here.
        let metadata = fs::metadata(&path)?;
        let kind = if metadata.is_dir() {
            EntryKind::Dir
        } else if metadata.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };
        entries.push(Entry { path, kind });
    }
    entries.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(entries)
}

/// Canonical paths of the directories on the current recursion path.
///
/// Descending into a directory whose canonical path is already on the stack
/// would recurse forever.
#[derive(Debug, Clone, Default)]
pub struct Ancestors {
    stack: Vec<PathBuf>,
}

impl Ancestors {
    /// Starts a recursion at `root`.
    pub fn new(root: &Path) -> io::Result<Self> {
        Ok(Self {
            stack: vec![fs::canonicalize(root)?],
        })
    }

    /// Returns the ancestor set extended with `dir`, or `None` when `dir`
    /// resolves to a directory already on the path.
    pub fn descend(&self, dir: &Path) -> io::Result<Option<Self>> {
        let canonical = fs::canonicalize(dir)?;
        if self.stack.contains(&canonical) {
            return Ok(None);
        }
        let mut stack = self.stack.clone();
        stack.push(canonical);
        Ok(Some(Self { stack }))
    }
}
