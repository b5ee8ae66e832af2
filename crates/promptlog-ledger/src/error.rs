// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for promptlog-ledger

use std::path::PathBuf;

use thiserror::Error;

use crate::turn::TurnRole;

/// Errors that can occur while scanning or writing the ledger
#[derive(Debug, Error)]
pub enum LedgerError {
    /// I/O failure on a ledger path
    #[error("I/O error while {operation} {path}: {source}")]
    Io {
        /// What the ledger was doing when the error occurred
        operation: &'static str,
        /// The path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Two different files claim the same turn
    #[error("ledger is inconsistent: {first} and {second} are both {role} turn {number}")]
    DuplicateTurn {
        /// Role of the colliding turns
        role: TurnRole,
        /// Sequence number of the colliding turns
        number: u32,
        /// First file name found
        first: String,
        /// Second file name found
        second: String,
    },

    /// The latest turn has the largest number a turn can have
    #[error("ledger is inconsistent: no {role} turn can follow {latest}")]
    NumbersExhausted {
        /// Role whose numbers ran out
        role: TurnRole,
        /// File name of the latest turn
        latest: String,
    },

    /// Turn numbers start at 1
    #[error("invalid turn number {0}: turn numbers start at 1")]
    InvalidNumber(u32),
}

impl LedgerError {
    #[must_use]
    pub(crate) fn io(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}
