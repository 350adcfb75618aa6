// ============================================================================
// vtrim-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: fern dispatch for the vtrim binary
//
// Everything in vtrim-core logs through the `log` facade. This module
// installs the logger once, at startup: short lines to stderr and, when a
// log file is requested, fully timestamped lines appended to that file.
//
// LEVELS:
// - default: Info (job start/finish, tool output, run summary)
// - --verbose: Debug (skipped files, queue shutdown, command lines)
//
// AI-ASSISTANT-INFO: Logger initialization for the CLI

// ---- Internal crate imports ----
use crate::error::{CliErrorContext, CliResult};

// ---- External crate imports ----
use log::LevelFilter;

// ---- Standard library imports ----
use std::fs;
use std::io;
use std::path::Path;

/// Level used for a run with or without `--verbose`.
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Returns the current local timestamp formatted as "YYYY-MM-DD HH:MM:SS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Installs the global logger.
///
/// # Errors
///
/// Fails if the log file cannot be opened or a logger is already installed.
pub fn setup_logging(verbose: bool, log_file: Option<&Path>) -> CliResult<()> {
    let console = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                message
            ))
        })
        .chain(io::stderr());

    let mut dispatch = fern::Dispatch::new().level(level_for(verbose)).chain(console);

    if let Some(path) = log_file {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).cli_with_context(|| {
                format!("Failed to create log directory '{}'", parent.display())
            })?;
        }
        let file = fern::log_file(path)
            .cli_with_context(|| format!("Failed to open log file '{}'", path.display()))?;

        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "{} [{}] [{}] {}",
                        get_timestamp(),
                        record.level(),
                        record.target(),
                        message
                    ))
                })
                .chain(file),
        );
    }

    dispatch
        .apply()
        .cli_with_context(|| "Failed to initialize logging")
}
