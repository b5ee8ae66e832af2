// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Directory tree serialization
//!
//! The snapshot is a depth-first listing of the tree. Each directory gets a
//! header line indented four spaces per level. Each file gets a listing line
//! one level deeper, followed by a block holding its relative path and full
//! content:
//!
//! ```text
//! project/
//!     README.md
//!
//!     ## README.md ##
//! # Project
//!
//!
//!     src/
//!         main.rs
//!
//!         ## src/main.rs ##
//! fn main() {}
//! ```
//!
//! File content is copied verbatim; only the structural lines are indented.
//!
//! Within a directory, files come before subdirectories and both are sorted
//! by name, so the same tree always produces the same text.

use std::cmp::Ordering;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, error, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::SnapshotError;
use crate::ignore::{IgnoreSet, absolute_root};

const INDENT: &str = "    ";

/// Serialize the tree under `root`, skipping everything in `ignore`
///
/// The walk is total: a file that cannot be read (deleted mid-walk, not
/// UTF-8, permission denied) is recorded with a placeholder instead of its
/// content, and an unreadable directory is logged and skipped.
///
/// # Errors
///
/// Returns `SnapshotError::InvalidRoot` if `root` cannot be made absolute and
/// `SnapshotError::RootNotDirectory` if it is not a directory.
pub fn build_snapshot(root: &Path, ignore: &IgnoreSet) -> Result<String, SnapshotError> {
    let root = absolute_root(root)?;
    if !root.is_dir() {
        return Err(SnapshotError::RootNotDirectory { path: root });
    }

    let mut out = String::new();
    let mut files = 0usize;
    let mut unreadable = 0usize;

    let walker = WalkDir::new(&root)
        .follow_links(false)
        .sort_by(files_first)
        .into_iter()
        .filter_entry(|entry| !ignore.contains(entry.path()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        let depth = entry.depth();
        if entry.file_type().is_dir() {
            let name = if depth == 0 {
                root.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| root.display().to_string())
            } else {
                entry.file_name().to_string_lossy().into_owned()
            };
            out.push_str(&format!("{}{name}/\n", INDENT.repeat(depth)));
            continue;
        }

        let indent = INDENT.repeat(depth);
        let relative = relative_path(&root, &entry);
        let content = match fs::read_to_string(entry.path()) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %entry.path().display(), "File not found");
                unreadable += 1;
                "File not found".to_string()
            }
            Err(e) => {
                error!(path = %entry.path().display(), error = %e, "Error reading file");
                unreadable += 1;
                format!("Error reading file: {e}")
            }
        };

        out.push_str(&format!(
            "{indent}{}\n\n{indent}## {relative} ##\n{content}\n\n",
            entry.file_name().to_string_lossy()
        ));
        files += 1;
        debug!(path = %relative, "File captured");
    }

    info!(files, unreadable, bytes = out.len(), "Snapshot built");
    Ok(out)
}

/// Files before directories, then by name
fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// Path relative to the root, always with `/` separators
fn relative_path(root: &Path, entry: &DirEntry) -> String {
    let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
