//! The producer/consumer job pipeline.
//!
//! A single traversal on the calling thread feeds a bounded queue; a fixed
//! pool of worker threads drains it. The coordinator wires the pieces
//! together and waits for every worker before returning.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Wires configuration, queue, workers and traversal into one run
pub mod coordinator;

/// Bounded job queue
pub mod queue;

/// Recursive discovery and filtering of candidate files
pub mod traversal;

/// Worker thread pool
pub mod worker;

pub use coordinator::{Coordinator, run_pipeline, run_with_processor};
pub use queue::{JobReceiver, JobSender, job_queue, queue_capacity};
pub use traversal::{Decision, Traversal, TraversalStats};
pub use worker::WorkerPool;

/// Run-wide fatal error flag shared by the traversal and the workers.
///
/// Once raised it stays raised: the traversal stops producing jobs and the
/// workers stop taking new ones.
#[derive(Debug, Clone, Default)]
pub struct AbortSignal(Arc<AtomicBool>);

impl AbortSignal {
    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
