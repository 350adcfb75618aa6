//! Implementation of the trimming run.
//!
//! Turns the parsed arguments into a `CoreConfig` and hands it to
//! `vtrim_core::run_pipeline`.

use crate::cli::Cli;
use crate::error::CliResult;
use crate::logging::get_timestamp;

use vtrim_core::{CoreConfig, CoreConfigBuilder, RunSummary, run_pipeline};

use log::{debug, info};

/// Builds the core configuration from command-line arguments.
pub fn build_config(args: &Cli) -> CliResult<CoreConfig> {
    CoreConfigBuilder::new()
        .tool_path(args.tool.clone())
        .input_dir(args.input_dir.clone())
        .output_dir(args.output_dir.clone())
        .worker_count(args.workers)
        .trim_offset_secs(args.trim_offset)
        .media_extension(args.extension.as_str())
        .strip_chars(&args.strip_chars)
        .build()
}

/// Runs the pipeline for the given arguments.
pub fn run_trim(args: &Cli) -> CliResult<RunSummary> {
    let config = build_config(args)?;
    debug!("Configuration: {:?}", config);

    info!("vtrim run started: {}", get_timestamp());
    let summary = run_pipeline(config)?;
    info!("vtrim run finished: {}", get_timestamp());

    Ok(summary)
}
