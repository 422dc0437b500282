use alloc::{boxed::Box, sync::Arc};
use core::fmt;

use super::{DispatchJob, DispatchTarget, InlineDispatchTarget};

/// Shared, cloneable handle to a [`DispatchTarget`].
#[derive(Clone)]
pub struct DispatchTargetShared {
  inner: Arc<dyn DispatchTarget>,
}

impl DispatchTargetShared {
  /// Creates a shared handle from a concrete target.
  #[must_use]
  pub fn new<D>(target: D) -> Self
  where
    D: DispatchTarget + 'static, {
    Self { inner: Arc::new(target) }
  }

  /// Wraps an existing shared target.
  #[must_use]
  pub fn from_arc(inner: Arc<dyn DispatchTarget>) -> Self {
    Self { inner }
  }

  /// Consumes the wrapper and returns the underlying `Arc`.
  #[must_use]
  pub fn into_arc(self) -> Arc<dyn DispatchTarget> {
    self.inner
  }

  /// Schedules `job` on the target.
  pub fn dispatch(&self, job: DispatchJob) {
    self.inner.dispatch(job);
  }

  /// Boxes `f` and schedules it on the target.
  pub fn execute<F>(&self, f: F)
  where
    F: FnOnce() + Send + 'static, {
    self.dispatch(Box::new(f));
  }

  /// Returns `true` when both handles point at the same target.
  #[must_use]
  pub fn ptr_eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.inner, &other.inner)
  }
}

impl Default for DispatchTargetShared {
  fn default() -> Self {
    Self::new(InlineDispatchTarget)
  }
}

impl fmt::Debug for DispatchTargetShared {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DispatchTargetShared").finish_non_exhaustive()
  }
}
