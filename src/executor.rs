//! Where layout jobs run.
//!
//! Parsing is a pure function and can run anywhere. Layout needs a [`FontMetrics`] provider, and some providers
//! may only be touched from the thread that created them (e.g. one backed by a UI toolkit). A [`MetricsExecutor`]
//! owns the provider and runs layout jobs against it:
//!
//!  - [`InlineExecutor`] runs jobs on the caller's thread, for providers that are `Sync`;
//!  - [`MetricsThread`] builds the provider on a dedicated thread and runs every job there.
//!
//! Jobs run to completion; there is no cancellation and no timeout.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{mpsc, Mutex, PoisonError};
use std::thread;

use crate::error::Error;
use crate::font::FontMetrics;


/// Runs jobs against a [`FontMetrics`] provider it owns
pub trait MetricsExecutor : Send + Sync {
    /// Runs `job` against the provider and waits for its result.
    /// Fails with [`Error::Executor`] if the job could not run to completion.
    fn run<R, J>(&self, job : J) -> Result<R, Error>
    where
        R : Send + 'static,
        J : FnOnce(&dyn FontMetrics) -> R + Send + 'static;
}


/// Runs jobs right away, on the calling thread
#[derive(Debug, Clone, Default)]
pub struct InlineExecutor<M> {
    metrics : M,
}

impl<M : FontMetrics + Send + Sync> InlineExecutor<M> {
    /// Creates an executor owning `metrics`
    pub fn new(metrics : M) -> Self {
        Self { metrics }
    }

    /// The provider jobs run against
    pub fn metrics(&self) -> &M {
        &self.metrics
    }
}

impl<M : FontMetrics + Send + Sync> MetricsExecutor for InlineExecutor<M> {
    fn run<R, J>(&self, job : J) -> Result<R, Error>
    where
        R : Send + 'static,
        J : FnOnce(&dyn FontMetrics) -> R + Send + 'static,
    {
        Ok(job(&self.metrics))
    }
}


type Job = Box<dyn FnOnce(&dyn FontMetrics) + Send>;

/// A dedicated thread owning a [`FontMetrics`] provider. Jobs are sent over a channel and run in order.
///
/// The provider is built on the thread itself, so it never needs to be `Send`.
/// Dropping the executor lets queued jobs finish, then joins the thread.
pub struct MetricsThread {
    sender : Mutex<Option<mpsc::Sender<Job>>>,
    handle : Option<thread::JoinHandle<()>>,
}

impl MetricsThread {
    /// Spawns the thread and builds the provider on it with `make_metrics`
    pub fn spawn<M, F>(make_metrics : F) -> Result<Self, Error>
    where
        M : FontMetrics + 'static,
        F : FnOnce() -> M + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel::<Job>();
        let handle = thread::Builder::new()
            .name("texbox-metrics".to_string())
            .spawn(move || {
                let metrics = make_metrics();
                for job in receiver {
                    // a panicking job drops its reply channel, which the caller sees as an error
                    if panic::catch_unwind(AssertUnwindSafe(|| job(&metrics))).is_err() {
                        warn!("a layout job panicked on the metrics thread");
                    }
                }
                debug!("metrics thread shutting down");
            })
            .map_err(|e| Error::Executor(format!("could not spawn metrics thread: {}", e)))?;

        Ok(Self {
            sender : Mutex::new(Some(sender)),
            handle : Some(handle),
        })
    }
}

impl MetricsExecutor for MetricsThread {
    fn run<R, J>(&self, job : J) -> Result<R, Error>
    where
        R : Send + 'static,
        J : FnOnce(&dyn FontMetrics) -> R + Send + 'static,
    {
        let (reply, result) = mpsc::channel();
        let job : Job = Box::new(move |metrics| {
            // the caller may have given up waiting
            let _ = reply.send(job(metrics));
        });

        {
            let sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
            let sender = sender.as_ref()
                .ok_or_else(|| Error::Executor("metrics thread has been shut down".to_string()))?;
            sender.send(job)
                .map_err(|_| Error::Executor("metrics thread has stopped".to_string()))?;
        }

        result.recv()
            .map_err(|_| Error::Executor("layout job did not complete".to_string()))
    }
}

impl Drop for MetricsThread {
    fn drop(&mut self) {
        // closing the channel ends the thread's loop
        self.sender.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("metrics thread panicked");
            }
        }
    }
}
