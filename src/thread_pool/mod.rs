//! Thread pools used by the server to service connections.
//!
//! The server is generic over the [`ThreadPool`] trait, so the pooling
//! strategy is a construction-time choice just like the store variant.

use crate::Result;

/// A pool of threads that jobs can be spawned onto
pub trait ThreadPool {
    /// Creates a new thread pool, immediately spawning the specified number
    /// of threads.
    ///
    /// Returns an error if any thread fails to spawn; all previously spawned
    /// threads are terminated.
    fn new(threads: u32) -> Result<Self>
    where
        Self: Sized;

    /// Spawns a function into the thread pool.
    ///
    /// Spawning always succeeds, but if the function panics the thread pool
    /// continues to operate with the same number of threads. The thread
    /// count is not reduced, nor is the pool destroyed, corrupted or
    /// invalidated.
    fn spawn<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static;
}

pub use self::naive::NaiveThreadPool;
pub use self::shared_queue::SharedQueueThreadPool;

mod naive;
mod shared_queue;
