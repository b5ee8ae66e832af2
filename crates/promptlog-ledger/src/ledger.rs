// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Ledger directory operations
//!
//! The ledger is a flat directory of turn files. All state lives on disk:
//! a [`Ledger`] only remembers where that directory is.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::error::LedgerError;
use crate::turn::{TurnFileName, TurnRole, parse_turn_file_name};

/// A turn file found in the ledger directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnEntry {
    /// Parsed role and number
    #[serde(flatten)]
    pub name: TurnFileName,
    /// Full path to the file
    pub path: PathBuf,
}

impl TurnEntry {
    /// Sequence number of this turn
    #[must_use]
    pub fn number(&self) -> u32 {
        self.name.number
    }

    /// Role of this turn
    #[must_use]
    pub fn role(&self) -> TurnRole {
        self.name.role
    }
}

/// Handle on a ledger directory
#[derive(Debug, Clone)]
pub struct Ledger {
    dir: PathBuf,
}

impl Ledger {
    /// Create a handle for the given directory
    ///
    /// Nothing is created on disk until a turn is written.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The ledger directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a turn with this role and number would be stored at
    #[must_use]
    pub fn path_for(&self, role: TurnRole, number: u32) -> PathBuf {
        self.dir.join(TurnFileName::new(role, number).file_name())
    }

    /// List every turn of a role, ascending by number
    ///
    /// A missing ledger directory is treated as empty.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Io` if the directory exists but cannot be listed.
    pub fn turns(&self, role: TurnRole) -> Result<Vec<TurnEntry>, LedgerError> {
        let mut turns: Vec<TurnEntry> = self
            .all_turns()?
            .into_iter()
            .filter(|entry| entry.role() == role)
            .collect();

        turns.sort_by(|a, b| {
            a.number()
                .cmp(&b.number())
                .then_with(|| a.path.cmp(&b.path))
        });
        Ok(turns)
    }

    /// Find the turn with the highest number for a role
    ///
    /// The choice is numeric, so `100_user.md` beats `99_user.md` no matter
    /// how the file system orders them.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::DuplicateTurn` if two files parse to the same
    /// highest number (for example `1_user.md` and `01_user.md`), and
    /// `LedgerError::Io` if the directory cannot be listed.
    pub fn latest_turn(&self, role: TurnRole) -> Result<Option<TurnEntry>, LedgerError> {
        let mut turns = self.turns(role)?;
        let Some(latest) = turns.pop() else {
            debug!(dir = %self.dir.display(), %role, "No turns found");
            return Ok(None);
        };

        if let Some(previous) = turns.last() {
            if previous.number() == latest.number() {
                return Err(LedgerError::DuplicateTurn {
                    role,
                    number: latest.number(),
                    first: display_name(&previous.path),
                    second: display_name(&latest.path),
                });
            }
        }

        debug!(path = %latest.path.display(), "Latest {role} turn found");
        Ok(Some(latest))
    }

    /// The number the next turn of this role should get
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NumbersExhausted` if the latest turn already has
    /// the largest representable number, and propagates errors from
    /// [`Ledger::latest_turn`].
    pub fn next_number(&self, role: TurnRole) -> Result<u32, LedgerError> {
        let Some(latest) = self.latest_turn(role)? else {
            return Ok(1);
        };
        latest
            .number()
            .checked_add(1)
            .ok_or(LedgerError::NumbersExhausted {
                role,
                latest: display_name(&latest.path),
            })
    }

    /// Read a turn's content
    ///
    /// Never fails: a missing or unreadable file reads as an empty string.
    /// The failure is logged instead.
    #[must_use]
    pub fn read_turn(path: &Path) -> String {
        match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %path.display(), "Turn file not found");
                String::new()
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Error reading turn file");
                String::new()
            }
        }
    }

    /// Write a turn, replacing any file with the same name
    ///
    /// Parent directories are created as needed.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidNumber` for turn 0 and `LedgerError::Io`
    /// if the directory or file cannot be written. The failure is also logged.
    pub fn create_turn(
        &self,
        role: TurnRole,
        number: u32,
        content: &str,
    ) -> Result<PathBuf, LedgerError> {
        if number == 0 {
            return Err(LedgerError::InvalidNumber(number));
        }

        let path = self.path_for(role, number);
        fs::create_dir_all(&self.dir).map_err(|e| {
            error!(dir = %self.dir.display(), error = %e, "Error creating ledger directory");
            LedgerError::io("creating ledger directory", &self.dir, e)
        })?;
        fs::write(&path, content).map_err(|e| {
            error!(path = %path.display(), error = %e, "Error creating turn file");
            LedgerError::io("writing turn file", &path, e)
        })?;

        info!(path = %path.display(), "Turn created");
        Ok(path)
    }

    /// Remove every turn file so numbering restarts at 1
    ///
    /// Only files whose names parse as turns are touched; settings and any
    /// other files in the directory are left alone. Returns how many turns
    /// were removed.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Io` if a turn file cannot be removed.
    pub fn reset(&self) -> Result<usize, LedgerError> {
        let turns = self.all_turns()?;
        for entry in &turns {
            fs::remove_file(&entry.path)
                .map_err(|e| LedgerError::io("removing turn file", &entry.path, e))?;
        }
        if !turns.is_empty() {
            info!(dir = %self.dir.display(), removed = turns.len(), "Ledger reset");
        }
        Ok(turns.len())
    }

    fn all_turns(&self) -> Result<Vec<TurnEntry>, LedgerError> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(LedgerError::io("listing ledger directory", &self.dir, e)),
        };

        let mut turns = Vec::new();
        for entry in read_dir {
            let entry =
                entry.map_err(|e| LedgerError::io("listing ledger directory", &self.dir, e))?;
            let Some(name) = entry.file_name().to_str().and_then(parse_turn_file_name) else {
                continue;
            };
            if !entry.file_type().is_ok_and(|t| t.is_file()) {
                continue;
            }
            turns.push(TurnEntry {
                name,
                path: entry.path(),
            });
        }
        Ok(turns)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
