//! promptlog: snapshot a project and keep a numbered conversation with a model
//!
//! Logs go to stderr; stdout only carries command output.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use promptlog::config::Config;
use promptlog::error::{EXIT_SUCCESS, EXIT_USAGE};
use tracing::error;

fn main() -> ExitCode {
    let config = match Config::try_parse() {
        Ok(config) => config,
        Err(e) => {
            // --help and --version arrive here too and print to stdout
            let code = if e.use_stderr() { EXIT_USAGE } else { EXIT_SUCCESS };
            if let Err(print_error) = e.print() {
                eprintln!("{print_error}");
            }
            return ExitCode::from(code);
        }
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    match promptlog::execute(&config, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
