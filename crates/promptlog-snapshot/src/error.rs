// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for promptlog-snapshot

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can stop a snapshot before it starts
///
/// Problems with individual files never surface here; they are written into
/// the snapshot as placeholders.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The root path could not be made absolute
    #[error("cannot resolve snapshot root {path}: {source}")]
    InvalidRoot {
        /// The root as given
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The root exists but is not a directory, or does not exist
    #[error("snapshot root is not a directory: {path}")]
    RootNotDirectory {
        /// The resolved root
        path: PathBuf,
    },
}
