// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Command implementations
//!
//! Each command works on an explicit [`Workspace`] so it can be driven from
//! tests without touching the process environment. `run` takes any
//! [`Generator`], which is how tests avoid the network.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use promptlog_ledger::{Ledger, TurnEntry, TurnRole};
use promptlog_provider::{GenerationRequest, Generator};
use promptlog_snapshot::{DEFAULT_IGNORE_FILE, build_ignore_set, build_snapshot};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{Config, DEFAULT_LEDGER_DIR};
use crate::error::CommandError;
use crate::settings::{SETTINGS_TEMPLATE, Settings};

/// Heading placed above the snapshot in assistant turn 1
pub const FILES_HEADER: &str = "### Files ###\n";

/// Starter ignore file written by `promptlog setup`
pub const IGNORE_TEMPLATE: &str = "\
# Paths left out of promptlog snapshots, relative to the workspace root.
# An ignored directory hides everything beneath it.
# Lines containing *, ? or [ are glob patterns.
.git
.assistant
";

/// The paths a command operates on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    /// Project root to snapshot
    pub root: PathBuf,
    /// Directory holding the turn files
    pub ledger_dir: PathBuf,
    /// Ignore pattern file
    pub ignore_file: PathBuf,
}

impl Workspace {
    /// Workspace with the default ledger directory and ignore file
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            ledger_dir: root.join(DEFAULT_LEDGER_DIR),
            ignore_file: root.join(DEFAULT_IGNORE_FILE),
            root,
        }
    }

    /// Workspace described by the command line
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            root: config.workspace_path(),
            ledger_dir: config.ledger_dir_path(),
            ignore_file: config.ignore_file_path(),
        }
    }

    /// Ledger handle for this workspace
    #[must_use]
    pub fn ledger(&self) -> Ledger {
        Ledger::new(&self.ledger_dir)
    }
}

// ============================================================================
// start
// ============================================================================

/// What `start` wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartOutcome {
    /// Assistant turn 1, holding the snapshot
    pub assistant: PathBuf,
    /// Empty user turn 1
    pub user: PathBuf,
    /// Turns removed from a previous conversation
    pub removed: usize,
}

/// Begin a new conversation from a snapshot of the workspace
///
/// The snapshot is built before the ledger is touched, so a failure leaves
/// any previous conversation in place.
///
/// # Errors
///
/// Returns `CommandError::Snapshot` if the root cannot be walked and
/// `CommandError::Ledger` if turns cannot be removed or written.
pub fn start(workspace: &Workspace, settings: &Settings) -> Result<StartOutcome, CommandError> {
    let mut ignore = build_ignore_set(&workspace.root, &workspace.ignore_file)?;
    ignore.extend_with_patterns(&workspace.root, settings.ignore_patterns())?;
    ignore.insert_path(&workspace.ledger_dir)?;

    let snapshot = build_snapshot(&workspace.root, &ignore)?;
    debug!(bytes = snapshot.len(), "Snapshot built");

    let ledger = workspace.ledger();
    let removed = ledger.reset()?;
    let assistant = ledger.create_turn(
        TurnRole::Assistant,
        1,
        &format!("{FILES_HEADER}{snapshot}\n\n"),
    )?;
    let user = ledger.create_turn(TurnRole::User, 1, "")?;

    info!(
        root = %workspace.root.display(),
        removed,
        "Conversation started"
    );
    Ok(StartOutcome {
        assistant,
        user,
        removed,
    })
}

// ============================================================================
// run
// ============================================================================

/// What `run` wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Generated text
    pub reply: String,
    /// New assistant turn holding the reply
    pub assistant: PathBuf,
    /// New empty user turn
    pub user: PathBuf,
}

/// Send the latest turns to the model and record its reply
///
/// Nothing is written unless the reply arrives and parses. Turn numbers are
/// computed after the reply arrives.
///
/// # Errors
///
/// Returns `CommandError::MissingTurn` if either role has no turn,
/// `CommandError::Provider` if generation fails and `CommandError::Ledger` if
/// the ledger is inconsistent or cannot be written.
pub async fn run<G>(
    workspace: &Workspace,
    system_instruction: &str,
    generator: &G,
) -> Result<RunOutcome, CommandError>
where
    G: Generator + ?Sized,
{
    let ledger = workspace.ledger();
    let latest_assistant = latest_or_missing(&ledger, TurnRole::Assistant)?;
    let latest_user = latest_or_missing(&ledger, TurnRole::User)?;

    let assistant_content = Ledger::read_turn(&latest_assistant.path);
    let user_content = Ledger::read_turn(&latest_user.path);
    if user_content.trim().is_empty() {
        warn!(path = %latest_user.path.display(), "Latest user turn is empty");
    }
    debug!(
        assistant = %latest_assistant.path.display(),
        user = %latest_user.path.display(),
        "Using latest turns"
    );

    let request = GenerationRequest::new(system_instruction, assistant_content, user_content);
    let reply = generator.generate(&request).await?;

    let next_assistant = ledger.next_number(TurnRole::Assistant)?;
    let next_user = ledger.next_number(TurnRole::User)?;
    let assistant = ledger.create_turn(TurnRole::Assistant, next_assistant, &reply)?;
    let user = ledger.create_turn(TurnRole::User, next_user, "")?;

    info!(
        assistant = %assistant.display(),
        user = %user.display(),
        "Reply recorded"
    );
    Ok(RunOutcome {
        reply,
        assistant,
        user,
    })
}

fn latest_or_missing(ledger: &Ledger, role: TurnRole) -> Result<TurnEntry, CommandError> {
    ledger
        .latest_turn(role)?
        .ok_or_else(|| CommandError::MissingTurn {
            role,
            dir: ledger.dir().to_path_buf(),
        })
}

// ============================================================================
// setup
// ============================================================================

/// What `setup` did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupOutcome {
    /// Files written
    pub created: Vec<PathBuf>,
    /// Files that already existed and were left alone
    pub skipped: Vec<PathBuf>,
}

/// Write a starter settings file and ignore file
///
/// # Errors
///
/// Returns `CommandError::Setup` if a directory or file cannot be created.
pub fn setup(workspace: &Workspace, settings_path: &Path) -> Result<SetupOutcome, CommandError> {
    let mut outcome = SetupOutcome::default();
    for (path, contents) in [
        (settings_path, SETTINGS_TEMPLATE),
        (workspace.ignore_file.as_path(), IGNORE_TEMPLATE),
    ] {
        if write_if_absent(path, contents)? {
            info!(path = %path.display(), "Created");
            outcome.created.push(path.to_path_buf());
        } else {
            info!(path = %path.display(), "Already exists, left untouched");
            outcome.skipped.push(path.to_path_buf());
        }
    }
    Ok(outcome)
}

fn write_if_absent(path: &Path, contents: &str) -> anyhow::Result<bool> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(e).with_context(|| format!("creating {}", path.display())),
    };
    file.write_all(contents.as_bytes())
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(true)
}

// ============================================================================
// status
// ============================================================================

/// Turns recorded for one role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleStatus {
    /// Number of turn files
    pub count: usize,
    /// Turn with the highest number
    pub latest: Option<TurnEntry>,
}

/// Summary of the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    /// Ledger directory
    pub ledger_dir: PathBuf,
    /// Assistant turns
    pub assistant: RoleStatus,
    /// User turns
    pub user: RoleStatus,
}

/// Summarize the ledger
///
/// # Errors
///
/// Returns `CommandError::Ledger` if the directory cannot be listed or holds
/// duplicate latest turns.
pub fn status(workspace: &Workspace) -> Result<Status, CommandError> {
    let ledger = workspace.ledger();
    let role_status = |role: TurnRole| -> Result<RoleStatus, CommandError> {
        Ok(RoleStatus {
            count: ledger.turns(role)?.len(),
            latest: ledger.latest_turn(role)?,
        })
    };
    Ok(Status {
        ledger_dir: workspace.ledger_dir.clone(),
        assistant: role_status(TurnRole::Assistant)?,
        user: role_status(TurnRole::User)?,
    })
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ledger: {}", self.ledger_dir.display())?;
        for (role, status) in [
            (TurnRole::Assistant, &self.assistant),
            (TurnRole::User, &self.user),
        ] {
            let role = role.as_str();
            match &status.latest {
                Some(latest) => writeln!(
                    f,
                    "{role:<9} {} turn(s), latest {}",
                    status.count,
                    latest.path.display()
                )?,
                None => writeln!(f, "{role:<9} no turns")?,
            }
        }
        Ok(())
    }
}
