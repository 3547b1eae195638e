//! Where resolution work runs

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Result, resolve};

/// A unit of work handed to an executor
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Runs jobs, possibly on another thread
pub trait Executor: Send + Sync {
    fn spawn(&self, job: Job) -> Result<()>;
}

/// One named worker thread per job
#[derive(Debug)]
pub struct ThreadExecutor {
    prefix: String,
    spawned: AtomicUsize,
}

impl ThreadExecutor {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            spawned: AtomicUsize::new(0),
        }
    }
}

impl Default for ThreadExecutor {
    fn default() -> Self {
        Self::new("ivyfetch-resolve")
    }
}

impl Executor for ThreadExecutor {
    fn spawn(&self, job: Job) -> Result<()> {
        let n = self.spawned.fetch_add(1, Ordering::SeqCst);
        std::thread::Builder::new()
            .name(format!("{}-{n}", self.prefix))
            .spawn(job)
            .map_err(|e| resolve::worker_unavailable(e.to_string()))?;
        Ok(())
    }
}

/// Runs each job to completion on the calling thread
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineExecutor;

impl Executor for InlineExecutor {
    fn spawn(&self, job: Job) -> Result<()> {
        job();
        Ok(())
    }
}
