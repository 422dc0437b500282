use std::{num::NonZeroUsize, thread, time::Duration};

const DEFAULT_MAX_BLOCKING_THREADS: usize = 512;
const DEFAULT_THREAD_NAME: &str = "deferred-dispatch";
const DEFAULT_THREAD_KEEP_ALIVE: Duration = Duration::from_secs(10);

/// Settings for the tokio runtime behind a [`DispatchPool`](super::DispatchPool).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchPoolConfig {
  worker_threads:       NonZeroUsize,
  max_blocking_threads: NonZeroUsize,
  thread_name:          String,
  thread_keep_alive:    Duration,
}

impl DispatchPoolConfig {
  /// Sets the number of async worker threads.
  #[must_use]
  pub const fn with_worker_threads(mut self, worker_threads: NonZeroUsize) -> Self {
    self.worker_threads = worker_threads;
    self
  }

  /// Sets the upper bound of threads running continuations.
  #[must_use]
  pub const fn with_max_blocking_threads(mut self, max_blocking_threads: NonZeroUsize) -> Self {
    self.max_blocking_threads = max_blocking_threads;
    self
  }

  /// Sets the name given to every pool thread.
  #[must_use]
  pub fn with_thread_name(mut self, thread_name: impl Into<String>) -> Self {
    self.thread_name = thread_name.into();
    self
  }

  /// Sets how long an idle continuation thread is kept before it exits.
  #[must_use]
  pub const fn with_thread_keep_alive(mut self, thread_keep_alive: Duration) -> Self {
    self.thread_keep_alive = thread_keep_alive;
    self
  }

  /// Number of async worker threads.
  #[must_use]
  pub const fn worker_threads(&self) -> NonZeroUsize {
    self.worker_threads
  }

  /// Upper bound of threads running continuations.
  #[must_use]
  pub const fn max_blocking_threads(&self) -> NonZeroUsize {
    self.max_blocking_threads
  }

  /// Name given to every pool thread.
  #[must_use]
  pub fn thread_name(&self) -> &str {
    &self.thread_name
  }

  /// Idle lifetime of a continuation thread.
  #[must_use]
  pub const fn thread_keep_alive(&self) -> Duration {
    self.thread_keep_alive
  }
}

impl Default for DispatchPoolConfig {
  fn default() -> Self {
    Self {
      worker_threads:       thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
      max_blocking_threads: NonZeroUsize::new(DEFAULT_MAX_BLOCKING_THREADS).unwrap_or(NonZeroUsize::MIN),
      thread_name:          DEFAULT_THREAD_NAME.to_owned(),
      thread_keep_alive:    DEFAULT_THREAD_KEEP_ALIVE,
    }
  }
}
