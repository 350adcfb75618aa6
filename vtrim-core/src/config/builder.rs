// ============================================================================
// vtrim-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// This module implements a fluent builder for CoreConfig. Unset fields keep
// the defaults from `CoreConfig::default()`.
//
// AI-ASSISTANT-INFO: Builder pattern implementation for CoreConfig

// ---- Standard library imports ----
use std::path::PathBuf;

// ---- Internal crate imports ----
use super::CoreConfig;
use crate::error::CoreResult;

/// Builder for creating CoreConfig instances.
///
/// # Examples
///
/// ```rust
/// use vtrim_core::config::CoreConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .tool_path(PathBuf::from("/usr/bin/vlc"))
///     .input_dir(PathBuf::from("/videos"))
///     .output_dir(PathBuf::from("/videos/trimmed"))
///     .worker_count(8)
///     .trim_offset_secs(12)
///     .strip_chars("',;")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.queue_capacity(), 16);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBuilder {
    config: CoreConfig,
}

impl CoreConfigBuilder {
    /// Creates a new builder holding the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the external tool path.
    pub fn tool_path(mut self, path: PathBuf) -> Self {
        self.config.tool_path = path;
        self
    }

    /// Sets the input root.
    pub fn input_dir(mut self, path: PathBuf) -> Self {
        self.config.input_dir = path;
        self
    }

    /// Sets the output root.
    pub fn output_dir(mut self, path: PathBuf) -> Self {
        self.config.output_dir = path;
        self
    }

    /// Sets the number of workers.
    pub fn worker_count(mut self, count: usize) -> Self {
        self.config.worker_count = count;
        self
    }

    /// Sets the start offset passed to the tool.
    pub fn trim_offset_secs(mut self, secs: u64) -> Self {
        self.config.trim_offset_secs = secs;
        self
    }

    /// Sets the media extension to select.
    pub fn media_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.media_extension = ext.into();
        self
    }

    /// Replaces the denylist of characters stripped from output paths.
    pub fn strip_chars(mut self, chars: &str) -> Self {
        self.config.strip_chars = chars.chars().collect();
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> CoreResult<CoreConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
