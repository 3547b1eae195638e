//! Resolution sessions
//!
//! [`Resolver`] is the entry point for hosts: it looks a module up in the
//! [`ModuleModel`], picks the module's settings, and runs the
//! [`DependencyResolver`] while holding the model's read guard for the whole
//! run. Work can run inline or be handed to an [`Executor`]; the returned
//! [`ResolveTask`] can be cancelled and waited on.
//!
//! ```text
//! Resolver::schedule(module)
//!     │  resolve_in_background?
//!     ├── yes ──> background Executor ──┐
//!     └── no ───> InlineExecutor ───────┤
//!                                       v
//!                      model.read() ── DependencyResolver::resolve
//!                                       │
//!                       ResolveTask::wait() <── mpsc
//! ```

pub mod executor;
pub mod task;

use std::sync::Arc;
use std::sync::mpsc;

use tracing::info;

pub use executor::{Executor, InlineExecutor, ThreadExecutor};
pub use task::ResolveTask;

use crate::cache;
use crate::domain::ResolvedDependency;
use crate::error::Result;
use crate::logging::{MessageLogger, TracingLogger};
use crate::repository::{NoopObserver, TransferObserver};
use crate::resolver::{CancellationToken, DependencyResolver, RepositorySet};
use crate::workspace::ModuleModel;

/// Resolves workspace modules
#[derive(Clone)]
pub struct Resolver {
    model: Arc<ModuleModel>,
    observer: Arc<dyn TransferObserver>,
}

impl Resolver {
    pub fn new(model: Arc<ModuleModel>) -> Self {
        Self {
            model,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Report transfers of every resolution to `observer`
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn TransferObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn model(&self) -> &ModuleModel {
        &self.model
    }

    /// Resolve `module` on the calling thread
    ///
    /// Messages go to `logger`, or to `tracing` when none is given.
    pub fn resolve(
        &self,
        module: &str,
        logger: Option<&dyn MessageLogger>,
    ) -> Result<Vec<ResolvedDependency>> {
        run(
            &self.model,
            self.observer.as_ref(),
            module,
            logger.unwrap_or(&TracingLogger),
            &CancellationToken::new(),
        )
    }

    /// Whether `module` is configured to resolve in the background
    pub fn prefers_background(&self, module: &str) -> Result<bool> {
        Ok(self.model.read().module(module)?.settings.resolve_in_background)
    }

    /// Run the resolution of `module` on `executor`
    pub fn submit(
        &self,
        module: &str,
        logger: Arc<dyn MessageLogger>,
        executor: &dyn Executor,
    ) -> Result<ResolveTask> {
        let (sender, receiver) = mpsc::channel();
        let cancel = CancellationToken::new();

        let job = {
            let model = Arc::clone(&self.model);
            let observer = Arc::clone(&self.observer);
            let module = module.to_string();
            let cancel = cancel.clone();
            move || {
                let outcome = run(&model, observer.as_ref(), &module, logger.as_ref(), &cancel);
                // The task may have been dropped; nobody is left to tell.
                let _ = sender.send(outcome);
            }
        };
        executor.spawn(Box::new(job))?;

        Ok(ResolveTask::new(module.to_string(), receiver, cancel))
    }

    /// Submit to `background` or run inline, as the module's settings prefer
    pub fn schedule(
        &self,
        module: &str,
        logger: Arc<dyn MessageLogger>,
        background: &dyn Executor,
    ) -> Result<ResolveTask> {
        if self.prefers_background(module)? {
            self.submit(module, logger, background)
        } else {
            self.submit(module, logger, &InlineExecutor)
        }
    }
}

/// One resolution unit, holding the model's read guard throughout
fn run(
    model: &ModuleModel,
    observer: &dyn TransferObserver,
    module: &str,
    logger: &dyn MessageLogger,
    cancel: &CancellationToken,
) -> Result<Vec<ResolvedDependency>> {
    let guard = model.read();
    let facet = guard.module(module)?;
    let repositories = RepositorySet::from_settings(&facet.settings)?;
    let cache_dir = cache::cache_dir_for(&facet.settings)?;

    info!(
        "Resolving {} against {} repositories",
        facet.descriptor.revision_id(),
        repositories.len()
    );
    let resolved = DependencyResolver::new(&repositories, cache_dir, facet.settings.conflict_strategy)
        .with_observer(observer)
        .resolve(&facet.descriptor, logger, cancel)?;

    drop(guard);
    Ok(resolved)
}
