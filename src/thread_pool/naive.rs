use std::thread;

use super::ThreadPool;
use crate::Result;

/// Not a pool at all: spawns a fresh operating system thread for every job.
///
/// This is the literal one-thread-per-request scheduling model. It is useful
/// as a baseline and in tests, but under load the per-job thread spawn cost
/// dominates; prefer [`SharedQueueThreadPool`](super::SharedQueueThreadPool).
pub struct NaiveThreadPool;

impl ThreadPool for NaiveThreadPool {
    fn new(_threads: u32) -> Result<NaiveThreadPool> {
        Ok(NaiveThreadPool)
    }

    fn spawn<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        thread::spawn(job);
    }
}
