// vtrim-cli/src/lib.rs
//
// Library portion of the vtrim CLI application.
// Contains argument definitions, logging setup and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, parse_cli};
pub use commands::run::{build_config, run_trim};
pub use error::{CliErrorContext, CliResult};
pub use logging::setup_logging;
