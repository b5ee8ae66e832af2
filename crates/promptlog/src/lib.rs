// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! promptlog library
//!
//! This module exports the command layer of the `promptlog` binary for use in
//! integration tests and as a library.
//!
//! `start` snapshots the workspace into assistant turn 1 and opens an empty
//! user turn 1. After the operator writes a prompt into the latest user turn,
//! `run` sends the latest assistant and user turns to the configured model and
//! appends the reply as the next assistant turn, followed by a fresh user
//! turn.

#![warn(missing_docs)]

pub mod commands;
pub mod config;
pub mod error;
pub mod settings;

use std::io::Write;

use promptlog_provider::HttpGenerator;
use tracing::debug;

use crate::commands::Workspace;
use crate::config::{Command, Config};
use crate::error::CommandError;
use crate::settings::{SETTINGS_FILE_NAME, Settings, process_env, resolve_provider};

/// Run the command selected on the command line, writing its output to `out`
///
/// # Errors
///
/// Returns the `CommandError` that aborted the command; its
/// [`exit_code`](CommandError::exit_code) is the process exit status.
pub fn execute<W: Write>(config: &Config, out: &mut W) -> Result<(), CommandError> {
    let Some(command) = config.command.clone() else {
        return Err(CommandError::Usage(
            "no command given; try `promptlog --help`".to_string(),
        ));
    };
    config.validate()?;
    let workspace = Workspace::from_config(config);
    debug!(?command, root = %workspace.root.display(), "Dispatching command");

    match command {
        Command::Start => {
            let (settings, _) =
                Settings::discover(config.config_file.as_deref(), &workspace.ledger_dir);
            let outcome = commands::start(&workspace, &settings)?;
            writeln!(
                out,
                "Snapshot saved to {}. Write your prompt in {} and run `promptlog run`.",
                outcome.assistant.display(),
                outcome.user.display()
            )?;
        }
        Command::Run => {
            let (settings, _) =
                Settings::discover(config.config_file.as_deref(), &workspace.ledger_dir);
            let provider = resolve_provider(&config.overrides(), &settings, process_env);
            let generator = HttpGenerator::new(provider)?;
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let outcome = runtime.block_on(commands::run(
                &workspace,
                settings.system_instruction(),
                &generator,
            ))?;
            write!(out, "{}", outcome.reply)?;
            if !outcome.reply.ends_with('\n') {
                writeln!(out)?;
            }
        }
        Command::Setup => {
            let settings_path = config
                .config_file
                .clone()
                .unwrap_or_else(|| workspace.ledger_dir.join(SETTINGS_FILE_NAME));
            let outcome = commands::setup(&workspace, &settings_path)?;
            for path in &outcome.created {
                writeln!(out, "created  {}", path.display())?;
            }
            for path in &outcome.skipped {
                writeln!(out, "exists   {}", path.display())?;
            }
        }
        Command::Status { json } => {
            let status = commands::status(&workspace)?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &status).map_err(std::io::Error::from)?;
                writeln!(out)?;
            } else {
                write!(out, "{status}")?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commands::{RunOutcome, StartOutcome, Status, Workspace};
    pub use crate::config::{Command, Config};
    pub use crate::error::CommandError;
    pub use crate::settings::{Overrides, Settings};
}
