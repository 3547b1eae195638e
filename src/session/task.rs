//! Handle on a submitted resolution

use std::sync::mpsc::Receiver;

use crate::domain::ResolvedDependency;
use crate::error::{Result, resolve};
use crate::resolver::CancellationToken;

pub(crate) type Outcome = Result<Vec<ResolvedDependency>>;

/// A resolution running on an [`Executor`](super::Executor)
#[derive(Debug)]
pub struct ResolveTask {
    module: String,
    receiver: Receiver<Outcome>,
    cancel: CancellationToken,
}

impl ResolveTask {
    pub(crate) fn new(module: String, receiver: Receiver<Outcome>, cancel: CancellationToken) -> Self {
        Self {
            module,
            receiver,
            cancel,
        }
    }

    /// Name of the module being resolved
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Ask the resolution to stop before its next fetch
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Block until the resolution finishes and return its outcome
    pub fn wait(self) -> Outcome {
        self.receiver.recv().unwrap_or_else(|_| {
            Err(resolve::failed(
                self.module,
                "resolution worker stopped without reporting a result",
            ))
        })
    }
}
