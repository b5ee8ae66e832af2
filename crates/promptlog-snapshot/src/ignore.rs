// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Ignore file handling
//!
//! An ignore file lists one path per line, relative to the snapshot root.
//! Lines starting with `#` are comments and blank lines are skipped. A line
//! naming a directory hides that directory and everything beneath it. Lines
//! containing `*`, `?` or `[` are treated as globs and matched against every
//! path under the root, so `*.lock` or `docs/*.png` work as expected.
//!
//! Patterns are resolved once into a set of absolute paths; the snapshot walk
//! then only needs a set lookup per entry.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::error::SnapshotError;

/// Name of the ignore file looked up in the project root
pub const DEFAULT_IGNORE_FILE: &str = ".assistantignore";

/// Resolved absolute paths excluded from a snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    paths: HashSet<PathBuf>,
}

impl IgnoreSet {
    /// Create an empty ignore set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an absolute path is excluded
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    /// Number of excluded paths
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if nothing is excluded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterate over the excluded paths
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    /// Exclude a path, and everything beneath it if it is a directory
    ///
    /// The path is taken literally: glob characters in it have no special
    /// meaning. A relative path is resolved against the current directory.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::InvalidRoot` if `path` cannot be made absolute.
    pub fn insert_path(&mut self, path: &Path) -> Result<(), SnapshotError> {
        let path = absolute_root(path)?;
        debug!(path = %path.display(), "Ignoring path");
        self.insert_transitive(&path);
        Ok(())
    }

    /// Add patterns, resolved against `root`, with ignore file semantics
    ///
    /// Used both for the lines of an ignore file and for default patterns
    /// supplied by configuration (such as `.git` and the ledger directory).
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::InvalidRoot` if `root` cannot be made absolute.
    pub fn extend_with_patterns<I, S>(&mut self, root: &Path, patterns: I) -> Result<(), SnapshotError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let root = absolute_root(root)?;
        let mut globs = GlobSetBuilder::new();
        let mut glob_count = 0usize;

        for pattern in patterns {
            let pattern = normalize_pattern(pattern.as_ref());
            if pattern.is_empty() {
                continue;
            }

            if is_glob(pattern) {
                match GlobBuilder::new(pattern).literal_separator(true).build() {
                    Ok(glob) => {
                        globs.add(glob);
                        glob_count += 1;
                    }
                    Err(e) => warn!(pattern, error = %e, "Skipping invalid ignore glob"),
                }
            } else {
                let path = normalize_lexically(&root.join(pattern));
                debug!(pattern, path = %path.display(), "Ignore pattern resolved");
                self.insert_transitive(&path);
            }
        }

        if glob_count > 0 {
            match globs.build() {
                Ok(set) => self.insert_glob_matches(&root, &set),
                Err(e) => warn!(error = %e, "Skipping ignore globs"),
            }
        }

        Ok(())
    }

    /// Add a path and, if it is a directory, everything beneath it
    ///
    /// Paths that do not exist are skipped without error.
    fn insert_transitive(&mut self, path: &Path) {
        let Ok(metadata) = fs::symlink_metadata(path) else {
            debug!(path = %path.display(), "Ignore pattern matches nothing");
            return;
        };

        if metadata.is_dir() {
            for entry in WalkDir::new(path).follow_links(false) {
                match entry {
                    Ok(entry) => {
                        self.paths.insert(entry.into_path());
                    }
                    Err(e) => warn!(error = %e, "Error walking ignored directory"),
                }
            }
        } else {
            self.paths.insert(path.to_path_buf());
        }
    }

    fn insert_glob_matches(&mut self, root: &Path, globs: &GlobSet) {
        let matches: Vec<PathBuf> = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| {
                entry
                    .path()
                    .strip_prefix(root)
                    .is_ok_and(|relative| globs.is_match(relative))
            })
            .map(walkdir::DirEntry::into_path)
            .collect();

        for path in matches {
            if !self.paths.contains(&path) {
                self.insert_transitive(&path);
            }
        }
    }
}

/// Build the ignore set for a snapshot of `root`
///
/// A missing ignore file yields an empty set. An unreadable one is logged and
/// also yields an empty set, so a snapshot is never blocked by its ignore
/// file.
///
/// # Errors
///
/// Returns `SnapshotError::InvalidRoot` if `root` cannot be made absolute.
pub fn build_ignore_set(root: &Path, ignore_spec_path: &Path) -> Result<IgnoreSet, SnapshotError> {
    let mut set = IgnoreSet::new();

    let text = match fs::read_to_string(ignore_spec_path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(
                path = %ignore_spec_path.display(),
                "Ignore file not found. No files will be ignored."
            );
            return Ok(set);
        }
        Err(e) => {
            error!(path = %ignore_spec_path.display(), error = %e, "Error reading ignore file");
            return Ok(set);
        }
    };

    info!(path = %ignore_spec_path.display(), "Processing ignore file");
    set.extend_with_patterns(root, parse_ignore_patterns(&text))?;
    debug!(count = set.len(), "Ignore set built");
    Ok(set)
}

/// Extract the pattern lines of an ignore file
///
/// Trims each line and drops blanks and `#` comments.
#[must_use]
pub fn parse_ignore_patterns(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

/// Resolve `root` to an absolute, lexically normalized path
///
/// Both the ignore set and the snapshot walk go through this, so the paths
/// they produce compare equal.
pub(crate) fn absolute_root(root: &Path) -> Result<PathBuf, SnapshotError> {
    let absolute = std::path::absolute(root).map_err(|source| SnapshotError::InvalidRoot {
        path: root.to_path_buf(),
        source,
    })?;
    Ok(normalize_lexically(&absolute))
}

/// Strip the decorations people habitually put on ignore lines
///
/// `/target/` and `target` mean the same thing: both are relative to the root.
fn normalize_pattern(pattern: &str) -> &str {
    pattern.trim().trim_start_matches('/').trim_end_matches('/')
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Remove `.` components and fold `..` without touching the file system
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
