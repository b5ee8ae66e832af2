// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Command-line configuration for promptlog
//!
//! Paths default relative to the workspace: the ledger lives in
//! `<workspace>/.assistant` and the ignore file is `<workspace>/.assistantignore`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use promptlog_provider::Backend;
use promptlog_snapshot::DEFAULT_IGNORE_FILE;

use crate::settings::Overrides;

/// Name of the ledger directory inside the workspace
pub const DEFAULT_LEDGER_DIR: &str = ".assistant";

/// promptlog - snapshot a project and keep a numbered conversation with a model
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "promptlog")]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Config {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Project root to snapshot
    ///
    /// Defaults to the current working directory.
    #[arg(short, long, env = "PROMPTLOG_WORKSPACE", global = true)]
    pub workspace: Option<PathBuf>,

    /// Directory holding the turn files
    ///
    /// Defaults to <workspace>/.assistant.
    #[arg(long, global = true)]
    pub ledger_dir: Option<PathBuf>,

    /// Ignore pattern file
    ///
    /// Defaults to <workspace>/.assistantignore.
    #[arg(long, global = true)]
    pub ignore_file: Option<PathBuf>,

    /// Settings file
    ///
    /// Defaults to <ledger-dir>/config.yaml, then the user config directory.
    #[arg(long = "config", global = true)]
    pub config_file: Option<PathBuf>,

    /// Model API to call (gemini, openai or deepseek)
    #[arg(long, global = true)]
    pub provider: Option<Backend>,

    /// Model name
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// API key; prefer the provider's environment variable
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Enable verbose logging (debug level)
    ///
    /// Logs go to stderr; stdout only carries command output.
    #[arg(short, long, default_value = "false", global = true)]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false", global = true)]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Snapshot the workspace into a fresh conversation
    ///
    /// Removes existing turns, writes the snapshot as assistant turn 1 and
    /// creates an empty user turn 1 for the first prompt.
    #[command(alias = "reset")]
    Start,

    /// Send the latest assistant and user turns to the model
    ///
    /// The reply becomes the next assistant turn and an empty next user turn
    /// is created. The reply is also printed to stdout.
    Run,

    /// Create a starter settings file and ignore file
    ///
    /// Existing files are left untouched.
    Setup,

    /// Show the latest turn of each role
    Status {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

impl Config {
    /// Get the workspace path, using current directory as default
    #[must_use]
    pub fn workspace_path(&self) -> PathBuf {
        self.workspace
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get the ledger directory, defaulting inside the workspace
    #[must_use]
    pub fn ledger_dir_path(&self) -> PathBuf {
        self.ledger_dir
            .clone()
            .unwrap_or_else(|| self.workspace_path().join(DEFAULT_LEDGER_DIR))
    }

    /// Get the ignore file path, defaulting inside the workspace
    #[must_use]
    pub fn ignore_file_path(&self) -> PathBuf {
        self.ignore_file
            .clone()
            .unwrap_or_else(|| self.workspace_path().join(DEFAULT_IGNORE_FILE))
    }

    /// Provider values given on the command line
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            provider: self.provider,
            model: self.model.clone(),
            api_key: self.api_key.clone(),
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the workspace path is specified but is missing or
    /// not a directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref workspace) = self.workspace {
            if !workspace.exists() {
                return Err(ConfigError::WorkspaceNotFound(workspace.clone()));
            }
            if !workspace.is_dir() {
                return Err(ConfigError::WorkspaceNotDirectory(workspace.clone()));
            }
        }
        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Workspace path not found
    #[error("Workspace path not found: {0}")]
    WorkspaceNotFound(PathBuf),

    /// Workspace path is not a directory
    #[error("Workspace path is not a directory: {0}")]
    WorkspaceNotDirectory(PathBuf),
}
