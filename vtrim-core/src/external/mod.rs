// ============================================================================
// vtrim-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the External Trimming Tool
//
// This module encapsulates the only interaction with the outside world that
// does real media work: running the external trimming executable (VLC by
// default) for one job.
//
// KEY COMPONENTS:
// - JobProcessor: trait seam between the worker pool and the tool
// - VlcProcessor: production implementation spawning the tool
// - check_dependency: locates the tool before any work starts
// - mocks (feature "test-mocks"): recording processor for tests
//
// DESIGN PHILOSOPHY:
// Workers depend only on the JobProcessor trait, so the pipeline can be
// exercised without the external tool installed.
//
// AI-ASSISTANT-INFO: External tool interactions and abstractions

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::path::{Path, PathBuf};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Trait and VLC implementation for processing a single job
pub mod processor;

/// Test doubles for the processor seam
#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use processor::{JobProcessor, ProcessOutput, VlcProcessor};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Locates the external tool and returns its resolved path.
///
/// A bare name is searched for in `PATH`; a path with separators must point
/// at an executable file.
///
/// # Errors
///
/// * `CoreError::DependencyNotFound` - the tool cannot be located
pub fn check_dependency(tool: &Path) -> CoreResult<PathBuf> {
    match which::which(tool) {
        Ok(resolved) => {
            log::debug!("Found external tool: {}", resolved.display());
            Ok(resolved)
        }
        Err(e) => {
            log::warn!("External tool '{}' not found: {}", tool.display(), e);
            Err(CoreError::DependencyNotFound(tool.display().to_string()))
        }
    }
}
