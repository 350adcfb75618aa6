// vtrim-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.

use clap::Parser;
use std::path::PathBuf;
use vtrim_core::config::{
    DEFAULT_INPUT_DIR, DEFAULT_MEDIA_EXTENSION, DEFAULT_OUTPUT_DIR, DEFAULT_TOOL,
    DEFAULT_TRIM_OFFSET_SECS, DEFAULT_WORKER_COUNT, MAX_WORKER_COUNT,
};

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "vtrim: trims the first seconds off every media file in a tree",
    long_about = "Walks the input directory, mirrors each matching media file into the \
                  output directory and runs the external tool (VLC by default) on it with \
                  a fixed start offset, using a pool of worker processes."
)]
pub struct Cli {
    /// Path or name of the external trimming tool
    #[arg(long, value_name = "PATH", env = "VTRIM_TOOL", default_value = DEFAULT_TOOL)]
    pub tool: PathBuf,

    /// Directory to search for media files
    #[arg(short = 'i', long = "input", value_name = "INPUT_DIR", default_value = DEFAULT_INPUT_DIR)]
    pub input_dir: PathBuf,

    /// Directory where trimmed files are written (never scanned for input)
    #[arg(short = 'o', long = "output", value_name = "OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Number of files processed concurrently
    #[arg(
        short = 'w',
        long,
        value_name = "COUNT",
        default_value_t = DEFAULT_WORKER_COUNT,
        value_parser = worker_count_in_range,
    )]
    pub workers: usize,

    /// Seconds cut from the start of each file
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_TRIM_OFFSET_SECS)]
    pub trim_offset: u64,

    /// Extension of the files to process (case-sensitive)
    #[arg(long, value_name = "EXT", default_value = DEFAULT_MEDIA_EXTENSION)]
    pub extension: String,

    /// Characters removed from destination paths
    #[arg(long, value_name = "CHARS", default_value = "',")]
    pub strip_chars: String,

    /// Optional: also write the log to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn worker_count_in_range(value: &str) -> Result<usize, String> {
    let count: usize = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if (1..=MAX_WORKER_COUNT).contains(&count) {
        Ok(count)
    } else {
        Err(format!("must be between 1 and {}", MAX_WORKER_COUNT))
    }
}

/// Parses the process arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}
