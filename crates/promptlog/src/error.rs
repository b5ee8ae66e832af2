// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Command errors and process exit codes

use std::path::PathBuf;

use promptlog_ledger::{LedgerError, TurnRole};
use promptlog_provider::ProviderError;
use promptlog_snapshot::SnapshotError;
use thiserror::Error;

use crate::config::ConfigError;

/// Exit code for success
pub const EXIT_SUCCESS: u8 = 0;
/// Exit code for bad arguments or a missing command
pub const EXIT_USAGE: u8 = 1;
/// Exit code for file-system and ledger failures
pub const EXIT_IO: u8 = 2;
/// Exit code for failures talking to the model API
pub const EXIT_UPSTREAM: u8 = 3;

/// Errors that abort a command
#[derive(Debug, Error)]
pub enum CommandError {
    /// Invalid command-line usage
    #[error("{0}")]
    Usage(String),

    /// Invalid workspace configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Ledger scan or write failed
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Snapshot could not be built
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// Model API call failed
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// `run` needs at least one turn of each role
    #[error("no {role} turn in {dir}; run `promptlog start` first")]
    MissingTurn {
        /// Role with no turns
        role: TurnRole,
        /// Ledger directory that was scanned
        dir: PathBuf,
    },

    /// Scaffolding failed
    #[error("setup failed: {0:#}")]
    Setup(#[from] anyhow::Error),

    /// Writing command output or starting the runtime failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CommandError {
    /// Process exit code for this error
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) | Self::Config(_) => EXIT_USAGE,
            Self::Provider(_) => EXIT_UPSTREAM,
            Self::Ledger(_)
            | Self::Snapshot(_)
            | Self::MissingTurn { .. }
            | Self::Setup(_)
            | Self::Io(_) => EXIT_IO,
        }
    }
}
