//! Bounded job queue between the traversal and the workers.
//!
//! The queue is a crossbeam bounded channel split into a single, non-clonable
//! [`JobSender`] and a clonable [`JobReceiver`]. Dropping (or closing) the
//! sender closes the queue; receivers keep draining buffered jobs and see
//! `None` once it is both closed and empty.

use crossbeam_channel::{Receiver, Sender, bounded};

use crate::error::{CoreError, CoreResult};
use crate::job::Job;

/// Queue slots reserved per worker.
pub const SLOTS_PER_WORKER: usize = 2;

/// Queue capacity for a pool of `workers`.
pub fn queue_capacity(workers: usize) -> usize {
    workers * SLOTS_PER_WORKER
}

/// Creates a bounded job queue.
///
/// A capacity of zero is rejected.
pub fn job_queue(capacity: usize) -> CoreResult<(JobSender, JobReceiver)> {
    if capacity == 0 {
        return Err(CoreError::Config(
            "job queue capacity must be at least 1".to_string(),
        ));
    }
    let (sender, receiver) = bounded(capacity);
    Ok((JobSender { sender }, JobReceiver { receiver }))
}

/// Producer side of the queue. There is exactly one per run.
#[derive(Debug)]
pub struct JobSender {
    sender: Sender<Job>,
}

impl JobSender {
    /// Enqueues a job, blocking while the queue is full.
    ///
    /// Fails with `CoreError::QueueClosed` once every receiver is gone, which
    /// only happens after all workers have stopped.
    pub fn send(&self, job: Job) -> CoreResult<()> {
        self.sender.send(job).map_err(|_| CoreError::QueueClosed)
    }

    /// Closes the queue. Workers finish whatever is still buffered.
    pub fn close(self) {
        drop(self);
    }

    pub fn is_full(&self) -> bool {
        self.sender.is_full()
    }
}

/// Consumer side of the queue; each worker holds its own clone.
#[derive(Debug, Clone)]
pub struct JobReceiver {
    receiver: Receiver<Job>,
}

impl JobReceiver {
    /// Blocks until a job is available; `None` once closed and drained.
    pub fn recv(&self) -> Option<Job> {
        self.receiver.recv().ok()
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Duration;

    fn job(n: usize) -> Job {
        Job::new("/root", format!("{n}.mp4"), format!("out/{n}.mp4"), 7).unwrap()
    }

    #[test]
    fn capacity_is_two_per_worker() {
        assert_eq!(queue_capacity(1), 2);
        assert_eq!(queue_capacity(4), 8);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(job_queue(0), Err(CoreError::Config(_))));
    }

    #[test]
    fn receivers_drain_after_close() {
        let (tx, rx) = job_queue(4).unwrap();
        tx.send(job(1)).unwrap();
        tx.send(job(2)).unwrap();
        tx.close();

        assert_eq!(rx.recv(), Some(job(1)));
        assert_eq!(rx.recv(), Some(job(2)));
        assert_eq!(rx.recv(), None);
    }

    #[test]
    fn send_blocks_at_capacity_until_a_job_is_consumed() {
        let (tx, rx) = job_queue(queue_capacity(1)).unwrap();
        tx.send(job(1)).unwrap();
        tx.send(job(2)).unwrap();
        assert!(tx.is_full());

        let sent_third = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&sent_third);
        let producer = thread::spawn(move || {
            tx.send(job(3)).unwrap();
            flag.store(true, Ordering::SeqCst);
        });

        thread::sleep(Duration::from_millis(100));
        assert!(!sent_third.load(Ordering::SeqCst), "send must block while full");

        assert_eq!(rx.recv(), Some(job(1)));
        producer.join().unwrap();
        assert!(sent_third.load(Ordering::SeqCst));
        assert_eq!(rx.len(), 2);
    }

    #[test]
    fn send_fails_once_all_receivers_are_gone() {
        let (tx, rx) = job_queue(2).unwrap();
        let other = rx.clone();
        drop(rx);
        drop(other);
        assert!(matches!(tx.send(job(1)), Err(CoreError::QueueClosed)));
    }
}
