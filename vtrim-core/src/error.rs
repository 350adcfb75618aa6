// ============================================================================
// vtrim-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the vtrim Core Library
//
// This module defines the error taxonomy of the job pipeline. Every fallible
// operation in the core returns `CoreResult<T>`; deciding whether an error
// terminates the process is left to the caller (the CLI).
//
// KEY COMPONENTS:
// - CoreError: the single error enum of the library
// - CoreResult: result alias used throughout the crate
// - Helper constructors for external command failures
//
// AI-ASSISTANT-INFO: Error types and helpers for vtrim-core

// ---- External crate imports ----
use thiserror::Error;

// ---- Standard library imports ----
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Errors produced by the vtrim core library.
///
/// Apart from the skippable conditions handled inside the traversal, every
/// variant is fatal to a run.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Directory traversal failed: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Required external tool '{0}' not found")]
    DependencyNotFound(String),

    #[error("Failed to start '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("'{command}' failed with {status}: {output}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        output: String,
    },

    #[error("Invalid job: output path '{0}' equals the input path")]
    InvalidJob(PathBuf),

    #[error("Job queue closed: no worker is left to receive jobs")]
    QueueClosed,

    #[error("Run aborted after a fatal error in another task")]
    Aborted,

    #[error("Worker {0} panicked")]
    WorkerPanicked(usize),
}

/// Result alias used across vtrim-core.
pub type CoreResult<T> = Result<T, CoreError>;

/// Builds a `CoreError::CommandStart` for a command that could not be spawned.
pub fn command_start_error(command: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(command.into(), err)
}

/// Builds a `CoreError::CommandFailed` carrying the captured diagnostic output.
pub fn command_failed_error(
    command: impl Into<String>,
    status: ExitStatus,
    output: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        command: command.into(),
        status,
        output: output.into(),
    }
}

impl CoreError {
    /// True for errors that are only a consequence of another task failing.
    ///
    /// The coordinator uses this to report the root cause instead of the
    /// `QueueClosed`/`Aborted` it triggered in the traversal.
    pub fn is_secondary(&self) -> bool {
        matches!(self, CoreError::QueueClosed | CoreError::Aborted)
    }
}
