//! Fixed-size pool of worker threads consuming the job queue.
//!
//! Each worker processes one job at a time and exits once the queue is closed
//! and drained. A processor error is fatal: the worker raises the shared
//! abort signal and returns the error, the remaining workers stop taking new
//! jobs, and the traversal stops producing them.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::error::{CoreError, CoreResult};
use crate::external::JobProcessor;

use super::AbortSignal;
use super::queue::JobReceiver;

/// Handle on the running workers.
pub struct WorkerPool {
    workers: Vec<(usize, JoinHandle<CoreResult<usize>>)>,
}

impl WorkerPool {
    /// Spawns `count` workers, each with its own clone of `receiver`.
    ///
    /// The caller should drop its own receiver afterwards so that the queue
    /// reports disconnection once every worker has exited.
    pub fn spawn(
        count: usize,
        receiver: &JobReceiver,
        processor: Arc<dyn JobProcessor>,
        abort: &AbortSignal,
    ) -> CoreResult<Self> {
        let mut workers = Vec::with_capacity(count);
        for id in 0..count {
            let rx = receiver.clone();
            let processor = Arc::clone(&processor);
            let abort = abort.clone();
            let handle = thread::Builder::new()
                .name(format!("vtrim-worker-{id}"))
                .spawn(move || run_worker(id, rx, processor, abort))?;
            workers.push((id, handle));
        }
        log::debug!("Spawned {} workers", count);
        Ok(Self { workers })
    }

    /// Waits for every worker to exit.
    ///
    /// Returns the number of jobs each worker processed, or the first error
    /// any worker reported. All workers are joined even when one failed.
    pub fn join(self) -> CoreResult<Vec<usize>> {
        let mut counts = Vec::with_capacity(self.workers.len());
        let mut first_error: Option<CoreError> = None;

        for (id, handle) in self.workers {
            let outcome = handle.join().unwrap_or(Err(CoreError::WorkerPanicked(id)));
            match outcome {
                Ok(processed) => counts.push(processed),
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(counts),
        }
    }
}

/// Raises the abort signal if the worker unwinds.
struct AbortOnPanic(AbortSignal);

impl Drop for AbortOnPanic {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.raise();
        }
    }
}

fn run_worker(
    id: usize,
    receiver: JobReceiver,
    processor: Arc<dyn JobProcessor>,
    abort: AbortSignal,
) -> CoreResult<usize> {
    let _guard = AbortOnPanic(abort.clone());
    log::info!("Worker {} started", id);

    let mut processed = 0;
    while let Some(job) = receiver.recv() {
        if abort.is_raised() {
            log::debug!(
                "Worker {} abandoning {} after abort",
                id,
                job.input_path().display()
            );
            break;
        }

        log::info!(
            "Processing: {} -> {}",
            job.input_path().display(),
            job.output_path().display()
        );

        if let Err(e) = processor.process(&job) {
            log::error!("Worker {} failed on {}: {}", id, job.input_path().display(), e);
            abort.raise();
            return Err(e);
        }

        processed += 1;
        log::info!("Finished: {}", job.output_path().display());
    }

    log::info!("Worker {} finished ({} jobs)", id, processed);
    Ok(processed)
}
