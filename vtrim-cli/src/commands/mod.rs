//! Command implementations for the CLI.

/// The trimming run: configuration from arguments, then the pipeline.
pub mod run;
