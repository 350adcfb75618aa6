//! Core library for trimming media files in parallel with an external tool.
//!
//! This crate discovers media files under a root directory, mirrors each one
//! to a destination under an output root, and feeds the resulting jobs
//! through a bounded queue to a fixed pool of worker threads that run the
//! external trimming tool (VLC by default).
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vtrim_core::{CoreConfig, run_pipeline};
//! use std::path::PathBuf;
//!
//! let mut config = CoreConfig::new(
//!     PathBuf::from("vlc"),
//!     PathBuf::from("/path/to/videos"),
//!     PathBuf::from("/path/to/videos/out"),
//! );
//! config.worker_count = 4;
//!
//! let summary = run_pipeline(config).unwrap();
//! println!("{}", summary);
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod job;
pub mod output_path;
pub mod pipeline;
pub mod summary;

// Re-exports for public API
pub use config::{CoreConfig, CoreConfigBuilder};
pub use error::{CoreError, CoreResult};
pub use external::{JobProcessor, ProcessOutput, VlcProcessor, check_dependency};
pub use job::Job;
pub use pipeline::{Coordinator, Traversal, TraversalStats, run_pipeline, run_with_processor};
pub use summary::{RunSummary, format_duration};
