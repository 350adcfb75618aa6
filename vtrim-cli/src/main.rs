// ============================================================================
// vtrim-cli/src/main.rs
// ============================================================================
//
// VTRIM CLI: Entry point of the `vtrim` binary
//
// Parses arguments, installs the logger and runs the pipeline. Any error
// from the run is fatal: it is logged, printed to stderr and the process
// exits with status 1.
//
// AI-ASSISTANT-INFO: Binary entry point, error-to-exit-code mapping

// ---- Internal crate imports ----
use vtrim_cli::{parse_cli, run_trim, setup_logging};

// ---- Standard library imports ----
use std::process;

fn main() {
    let cli = parse_cli();

    if let Err(e) = setup_logging(cli.verbose, cli.log_file.as_deref()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    // The run summary is logged by the core on success.
    if let Err(e) = run_trim(&cli) {
        log::error!("Fatal: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
