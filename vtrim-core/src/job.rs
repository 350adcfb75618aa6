//! The unit of work handed from the traversal to the workers.

use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// One file to trim: where to run, what to read, where to write, and from
/// which second to start.
///
/// Paths are relative to `work_dir`; the external tool runs with `work_dir`
/// as its current directory. A `Job` is never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    work_dir: PathBuf,
    input_path: PathBuf,
    output_path: PathBuf,
    trim_offset_secs: u64,
}

impl Job {
    /// Creates a job, rejecting an output path equal to the input path.
    pub fn new(
        work_dir: impl Into<PathBuf>,
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        trim_offset_secs: u64,
    ) -> CoreResult<Self> {
        let input_path = input_path.into();
        let output_path = output_path.into();
        if input_path == output_path {
            return Err(CoreError::InvalidJob(output_path));
        }
        Ok(Self {
            work_dir: work_dir.into(),
            input_path,
            output_path,
            trim_offset_secs,
        })
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn trim_offset_secs(&self) -> u64 {
        self.trim_offset_secs
    }

    /// Absolute location of the source file.
    pub fn absolute_input(&self) -> PathBuf {
        self.work_dir.join(&self.input_path)
    }

    /// Absolute location of the destination file.
    pub fn absolute_output(&self) -> PathBuf {
        self.work_dir.join(&self.output_path)
    }
}
