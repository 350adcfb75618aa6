//! Configuration structures and constants for the vtrim-core library.
//!
//! This module provides the run configuration consumed by the coordinator:
//! the external tool, the input and output roots, the worker count and the
//! parameters used to build each job.

mod builder;

use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

pub use builder::CoreConfigBuilder;

// Default constants

/// Default external trimming tool, resolved through `PATH`.
#[cfg(not(windows))]
pub const DEFAULT_TOOL: &str = "vlc";

/// Default external trimming tool on Windows installs.
#[cfg(windows)]
pub const DEFAULT_TOOL: &str = r"C:\Program Files (x86)\VideoLAN\VLC\vlc.exe";

/// Default input root.
pub const DEFAULT_INPUT_DIR: &str = ".";

/// Default output root, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "out";

/// Default number of concurrent workers.
pub const DEFAULT_WORKER_COUNT: usize = 4;

/// Upper bound accepted for the worker count.
pub const MAX_WORKER_COUNT: usize = 256;

/// Default start offset into each source, in seconds.
pub const DEFAULT_TRIM_OFFSET_SECS: u64 = 7;

/// Default media extension (matched case-sensitively, without the dot).
pub const DEFAULT_MEDIA_EXTENSION: &str = "mp4";

/// Characters stripped from output paths by default.
///
/// VLC's `--sout` chain syntax treats these as separators/quotes.
pub const DEFAULT_STRIP_CHARS: &[char] = &['\'', ','];

/// Main configuration structure for a vtrim run.
///
/// All fields have defaults, so a config can be built with
/// `CoreConfig::default()` and adjusted field by field, or through
/// [`CoreConfigBuilder`].
///
/// # Examples
///
/// ```rust
/// use vtrim_core::CoreConfig;
/// use std::path::PathBuf;
///
/// let mut config = CoreConfig::new(
///     PathBuf::from("vlc"),
///     PathBuf::from("/videos"),
///     PathBuf::from("/videos/out"),
/// );
/// config.worker_count = 2;
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// External trimming executable (bare name resolved through PATH, or a path)
    pub tool_path: PathBuf,

    /// Root directory scanned recursively for media files
    pub input_dir: PathBuf,

    /// Root directory receiving the trimmed copies
    pub output_dir: PathBuf,

    /// Number of concurrent workers
    pub worker_count: usize,

    /// Start offset, in seconds, passed to the external tool
    pub trim_offset_secs: u64,

    /// Media extension to select, without the leading dot
    pub media_extension: String,

    /// Characters removed from the mirrored output path
    pub strip_chars: Vec<char>,

    /// Skip locating the external tool before the run (used with injected processors)
    pub skip_tool_check: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            tool_path: PathBuf::from(DEFAULT_TOOL),
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            worker_count: DEFAULT_WORKER_COUNT,
            trim_offset_secs: DEFAULT_TRIM_OFFSET_SECS,
            media_extension: DEFAULT_MEDIA_EXTENSION.to_string(),
            strip_chars: DEFAULT_STRIP_CHARS.to_vec(),
            skip_tool_check: false,
        }
    }
}

impl CoreConfig {
    /// Creates a config with the given paths and default tuning values.
    pub fn new(tool_path: PathBuf, input_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            tool_path,
            input_dir,
            output_dir,
            ..Self::default()
        }
    }

    /// Media extension with any leading dot removed.
    pub fn normalized_extension(&self) -> &str {
        self.media_extension.trim_start_matches('.')
    }

    /// Capacity of the job queue: two slots per worker.
    pub fn queue_capacity(&self) -> usize {
        self.worker_count * 2
    }

    /// Checks the configuration for values the pipeline cannot run with.
    ///
    /// Filesystem state (existence of the roots, availability of the tool) is
    /// checked by the coordinator, not here.
    pub fn validate(&self) -> CoreResult<()> {
        if self.worker_count == 0 || self.worker_count > MAX_WORKER_COUNT {
            return Err(CoreError::Config(format!(
                "worker count must be between 1 and {}, got {}",
                MAX_WORKER_COUNT, self.worker_count
            )));
        }

        if self.normalized_extension().is_empty() {
            return Err(CoreError::Config(
                "media extension must not be empty".to_string(),
            ));
        }

        if self.tool_path.as_os_str().is_empty() {
            return Err(CoreError::Config("tool path must not be empty".to_string()));
        }

        if same_lexical_path(&self.input_dir, &self.output_dir) {
            return Err(CoreError::Config(format!(
                "output directory '{}' must differ from the input directory",
                self.output_dir.display()
            )));
        }

        Ok(())
    }
}

fn same_lexical_path(a: &Path, b: &Path) -> bool {
    a.components().eq(b.components())
}
