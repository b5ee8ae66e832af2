// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! promptlog-snapshot: project file tree snapshots for promptlog
//!
//! This library crate serializes a directory tree, including the content of
//! every file, into a single text blob that becomes the assistant's initial
//! context. Paths listed in an ignore file (`.assistantignore` by default) are
//! left out, along with everything beneath ignored directories.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use promptlog_snapshot::{build_ignore_set, build_snapshot};
//!
//! let root = Path::new(".");
//! let ignore = build_ignore_set(root, &root.join(".assistantignore")).unwrap();
//! let snapshot = build_snapshot(root, &ignore).unwrap();
//! println!("{snapshot}");
//! ```

pub mod error;
pub mod ignore;
pub mod snapshot;

pub use error::SnapshotError;
pub use ignore::{DEFAULT_IGNORE_FILE, IgnoreSet, build_ignore_set, parse_ignore_patterns};
pub use snapshot::build_snapshot;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::SnapshotError;
    pub use crate::ignore::{IgnoreSet, build_ignore_set};
    pub use crate::snapshot::build_snapshot;
}
