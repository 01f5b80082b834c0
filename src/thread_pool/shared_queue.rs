use std::thread;

use crossbeam::channel::{self, Receiver, Sender};
use tracing::{debug, error};

use super::ThreadPool;
use crate::Result;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A fixed set of worker threads consuming jobs from a shared queue.
///
/// The queue is the MPMC [`channel`] from the crossbeam crate, used here with
/// a single producer (the pool handle) and one consumer per worker. Workers
/// block on the channel between jobs, so an idle pool costs nothing but
/// memory.
///
/// A worker that panics while running a job is replaced with a fresh thread,
/// keeping the pool at its configured size. If replacement itself fails at
/// the OS level the failure is logged and the pool shrinks by one; a pool
/// that has shrunk to zero threads will panic on the next `spawn`.
///
/// [`channel`]: https://docs.rs/crossbeam/0.8.1/crossbeam/channel/index.html
pub struct SharedQueueThreadPool {
    tx: Sender<Job>,
}

impl ThreadPool for SharedQueueThreadPool {
    fn new(threads: u32) -> Result<SharedQueueThreadPool> {
        let (tx, rx) = channel::unbounded::<Job>();
        for _ in 0..threads {
            let worker = Worker(rx.clone());
            thread::Builder::new().spawn(move || worker.run())?;
        }
        Ok(SharedQueueThreadPool { tx })
    }

    /// Sends the job to whichever worker picks it off the queue first.
    ///
    /// # Panics
    ///
    /// Panics if every worker thread has died.
    fn spawn<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.tx
            .send(Box::new(job))
            .expect("thread pool has no threads left");
    }
}

/// One worker's end of the job queue. The `Drop` impl is where panicked
/// workers get replaced: unwinding out of a job drops the `Worker`, and the
/// drop handler spawns a successor holding a clone of the receiver.
struct Worker(Receiver<Job>);

impl Worker {
    fn run(self) {
        loop {
            match self.0.recv() {
                Ok(job) => job(),
                Err(_) => {
                    // the pool handle was dropped and the queue is drained
                    debug!("worker exiting, thread pool was destroyed");
                    break;
                }
            }
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        if thread::panicking() {
            debug!("worker panicked, spawning a replacement");
            let worker = Worker(self.0.clone());
            if let Err(e) = thread::Builder::new().spawn(move || worker.run()) {
                error!("failed to spawn replacement worker: {}", e);
            }
        }
    }
}
