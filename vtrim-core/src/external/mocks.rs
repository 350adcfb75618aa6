// vtrim-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

use crate::error::{CoreError, CoreResult};
use crate::job::Job;

use super::processor::{JobProcessor, ProcessOutput};

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Recording implementation of `JobProcessor`.
///
/// Clones share their state, so a test can keep one handle while the
/// coordinator owns another.
#[derive(Clone, Default)]
pub struct MockProcessor {
    received: Arc<Mutex<Vec<Job>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    fail_on: Arc<Mutex<Vec<PathBuf>>>,
    create_outputs: bool,
    delay: Option<Duration>,
}

impl MockProcessor {
    pub fn new() -> Self {
        Default::default()
    }

    /// Writes an empty file at each job's output path, like the real tool would.
    pub fn creating_outputs(mut self) -> Self {
        self.create_outputs = true;
        self
    }

    /// Sleeps for `delay` inside every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fails the call whose job has this relative input path.
    pub fn fail_on(&self, input_path: impl Into<PathBuf>) {
        self.fail_on.lock().unwrap().push(input_path.into());
    }

    /// Jobs received so far, in call order.
    pub fn received_jobs(&self) -> Vec<Job> {
        self.received.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.received.lock().unwrap().len()
    }

    /// Highest number of concurrent calls observed.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl JobProcessor for MockProcessor {
    fn process(&self, job: &Job) -> CoreResult<ProcessOutput> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.received.lock().unwrap().push(job.clone());

        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }

        let should_fail = self
            .fail_on
            .lock()
            .unwrap()
            .iter()
            .any(|p| p.as_path() == job.input_path());

        let result = if should_fail {
            log::warn!("MockProcessor simulating failure for {}", job.input_path().display());
            Err(CoreError::CommandStart(
                "mock-tool".to_string(),
                io::Error::other(format!("mock failure for {}", job.input_path().display())),
            ))
        } else if self.create_outputs {
            touch_output(job)
        } else {
            Ok(ProcessOutput::default())
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

fn touch_output(job: &Job) -> CoreResult<ProcessOutput> {
    let output = job.absolute_output();
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::File::create(&output)?;
    Ok(ProcessOutput::default())
}
