// ============================================================================
// vtrim-core/src/pipeline/coordinator.rs
// ============================================================================
//
// COORDINATOR: One Complete Trimming Run
//
// The coordinator validates the environment, prepares the output root,
// creates the bounded queue, spawns the workers, runs the traversal on the
// calling thread, closes the queue and joins every worker.
//
// FAILURE POLICY:
// There is no partial success. The first fatal error raises the abort
// signal; the traversal stops producing, the workers stop consuming new
// jobs (jobs already running finish), and the root cause is returned once
// every worker has exited.
//
// AI-ASSISTANT-INFO: Orchestration of traversal, queue and worker pool

// ---- Internal crate imports ----
use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::{JobProcessor, VlcProcessor, check_dependency};
use crate::summary::RunSummary;

use super::AbortSignal;
use super::queue::job_queue;
use super::traversal::Traversal;
use super::worker::WorkerPool;

// ---- Standard library imports ----
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Drives one run of the pipeline.
pub struct Coordinator {
    config: CoreConfig,
    processor: Option<Arc<dyn JobProcessor>>,
}

impl Coordinator {
    /// Coordinator that invokes the configured tool through `VlcProcessor`.
    pub fn new(config: CoreConfig) -> Self {
        Self {
            config,
            processor: None,
        }
    }

    /// Coordinator that hands jobs to `processor` instead of the tool.
    pub fn with_processor(config: CoreConfig, processor: Arc<dyn JobProcessor>) -> Self {
        Self {
            config,
            processor: Some(processor),
        }
    }

    /// Runs the pipeline to completion.
    ///
    /// # Errors
    ///
    /// * `CoreError::Config` - invalid configuration
    /// * `CoreError::DependencyNotFound` - the tool cannot be located
    /// * `CoreError::PathError` / `CoreError::Io` - the roots cannot be prepared
    /// * `CoreError::Walkdir` - an entry could not be read during the walk
    /// * any error returned by the processor
    pub fn run(self) -> CoreResult<RunSummary> {
        let started = Instant::now();
        self.config.validate()?;

        let processor = self.resolve_processor()?;
        let (root, output_dir) = prepare_roots(&self.config.input_dir, &self.config.output_dir)?;

        log::info!("Input root: {}", root.display());
        log::info!("Output root: {}", output_dir.display());
        log::info!("Workers: {}", self.config.worker_count);

        let abort = AbortSignal::default();
        let traversal =
            Traversal::new(&self.config, &root, &output_dir)?.with_abort(abort.clone());

        let (sender, receiver) = job_queue(self.config.queue_capacity())?;
        let pool = WorkerPool::spawn(self.config.worker_count, &receiver, processor, &abort)?;
        // Workers hold the only receivers from here on.
        drop(receiver);

        let walked = traversal.run(|job| sender.send(job));
        match &walked {
            Ok(stats) => {
                log::debug!("Traversal queued {} jobs; closing queue", stats.queued);
                sender.close();
            }
            Err(e) => {
                log::error!("Aborting run: {}", e);
                abort.raise();
                drop(sender);
            }
        }

        let joined = pool.join();

        let (traversal_stats, counts) = match (walked, joined) {
            (Ok(stats), Ok(counts)) => (stats, counts),
            (Err(walk_err), Err(worker_err)) => {
                return Err(if walk_err.is_secondary() { worker_err } else { walk_err });
            }
            (Err(e), Ok(_)) | (Ok(_), Err(e)) => return Err(e),
        };

        let summary = RunSummary {
            traversal: traversal_stats,
            processed: counts.iter().sum(),
            workers: counts.len(),
            elapsed: started.elapsed(),
        };
        log::info!("{}", summary);
        Ok(summary)
    }

    fn resolve_processor(&self) -> CoreResult<Arc<dyn JobProcessor>> {
        let tool = if self.config.skip_tool_check {
            self.config.tool_path.clone()
        } else {
            check_dependency(&self.config.tool_path)?
        };

        Ok(match &self.processor {
            Some(processor) => Arc::clone(processor),
            None => Arc::new(VlcProcessor::new(tool)),
        })
    }
}

/// Canonicalizes the input root and creates/canonicalizes the output root.
fn prepare_roots(input_dir: &Path, output_dir: &Path) -> CoreResult<(PathBuf, PathBuf)> {
    let root = fs::canonicalize(input_dir).map_err(|e| {
        CoreError::PathError(format!(
            "Invalid input path '{}': {}",
            input_dir.display(),
            e
        ))
    })?;

    fs::create_dir_all(output_dir).map_err(|e| {
        CoreError::PathError(format!(
            "Failed to create output directory '{}': {}",
            output_dir.display(),
            e
        ))
    })?;
    let output = fs::canonicalize(output_dir)?;

    // Outputs written into the walked tree would be picked up again.
    if root.starts_with(&output) {
        return Err(CoreError::Config(format!(
            "output directory '{}' is or contains the input root '{}'",
            output_dir.display(),
            root.display()
        )));
    }

    Ok((root, output))
}

/// Runs the pipeline with the external tool from `config`.
pub fn run_pipeline(config: CoreConfig) -> CoreResult<RunSummary> {
    Coordinator::new(config).run()
}

/// Runs the pipeline with an injected processor.
pub fn run_with_processor(
    config: CoreConfig,
    processor: Arc<dyn JobProcessor>,
) -> CoreResult<RunSummary> {
    Coordinator::with_processor(config, processor).run()
}
