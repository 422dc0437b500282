use alloc::boxed::Box;

/// Unit of work handed to a [`DispatchTarget`].
pub type DispatchJob = Box<dyn FnOnce() + Send + 'static>;

/// Executor abstraction that runs continuations.
///
/// A target decides where and when a job runs: on the calling thread, on a worker pool, or on
/// a runtime's blocking threads. Jobs submitted from one thread must be started in submission
/// order when the target is serial; parallel targets give no ordering guarantee.
pub trait DispatchTarget: Send + Sync {
  /// Schedules `job` for execution.
  fn dispatch(&self, job: DispatchJob);
}
