//! Work handed to the platform's UI thread
//!
//! Window APIs must be called on the thread that owns the view hierarchy.
//! Platform backends push jobs here from their event-loop thread and wake the
//! UI thread's looper; the UI thread then drains the queue.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// A unit of work for the UI thread
pub type UiJob = Box<dyn FnOnce() + Send + 'static>;

/// FIFO of jobs waiting for the UI thread
#[derive(Default)]
pub struct UiJobQueue {
    jobs: Mutex<VecDeque<UiJob>>,
}

impl UiJobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a job.
    ///
    /// Returns `true` when the queue was empty, i.e. the UI thread needs a wake-up.
    pub fn push(&self, job: UiJob) -> bool {
        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        let was_empty = jobs.is_empty();
        jobs.push_back(job);
        was_empty
    }

    /// Run every queued job in order; call on the UI thread
    pub fn run_pending(&self) -> usize {
        // Take the batch first so jobs can queue follow-up work without deadlocking.
        let batch: Vec<UiJob> = self
            .jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();
        let count = batch.len();
        for job in batch {
            job();
        }
        count
    }

    pub fn len(&self) -> usize {
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
