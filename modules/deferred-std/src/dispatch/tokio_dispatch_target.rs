use deferred_core_rs::{DispatchJob, DispatchTarget, DispatchTargetShared};
use tokio::runtime::Handle;

use super::DispatchPoolError;

/// Dispatch target that runs each continuation on the blocking pool of a tokio runtime.
///
/// Continuations may block (for instance on another future's value), so they are never placed
/// on the async worker threads.
#[derive(Clone, Debug)]
pub struct TokioDispatchTarget {
  handle: Handle,
}

impl TokioDispatchTarget {
  /// Creates a target bound to the runtime behind `handle`.
  #[must_use]
  pub const fn new(handle: Handle) -> Self {
    Self { handle }
  }

  /// Creates a target bound to the runtime running on the calling thread.
  ///
  /// # Errors
  ///
  /// Returns [`DispatchPoolError::NoAmbientRuntime`] when called outside a tokio runtime.
  pub fn current() -> Result<Self, DispatchPoolError> {
    Handle::try_current().map(Self::new).map_err(|_| DispatchPoolError::NoAmbientRuntime)
  }

  /// Runtime handle jobs are spawned on.
  #[must_use]
  pub const fn handle(&self) -> &Handle {
    &self.handle
  }

  /// Wraps this target into a shared handle usable in a `DeferredConfig`.
  #[must_use]
  pub fn into_shared(self) -> DispatchTargetShared {
    DispatchTargetShared::new(self)
  }
}

impl DispatchTarget for TokioDispatchTarget {
  fn dispatch(&self, job: DispatchJob) {
    drop(self.handle.spawn_blocking(job));
  }
}
