use std::{fmt, time::Duration};

use deferred_core_rs::{DeferredConfig, DispatchTargetShared};
use tokio::runtime::{Builder, Runtime};

use super::{DispatchPoolConfig, DispatchPoolError, TokioDispatchTarget};

/// Process-wide pool of threads that run continuations.
///
/// Owns a multi-thread tokio runtime. Create it once at process start and hand
/// [`deferred_config`](Self::deferred_config) to every `Deferred` constructor.
///
/// Dropping the pool from inside an async context panics, as for any tokio runtime; use
/// [`shutdown_timeout`](Self::shutdown_timeout) there instead.
pub struct DispatchPool {
  runtime: Runtime,
  target:  DispatchTargetShared,
  config:  DispatchPoolConfig,
}

impl DispatchPool {
  /// Builds the runtime described by `config`.
  ///
  /// # Errors
  ///
  /// Returns [`DispatchPoolError::RuntimeBuild`] if tokio fails to start the runtime.
  pub fn new(config: DispatchPoolConfig) -> Result<Self, DispatchPoolError> {
    let runtime = Builder::new_multi_thread()
      .worker_threads(config.worker_threads().get())
      .max_blocking_threads(config.max_blocking_threads().get())
      .thread_name(config.thread_name())
      .thread_keep_alive(config.thread_keep_alive())
      .enable_time()
      .build()?;
    let target = TokioDispatchTarget::new(runtime.handle().clone()).into_shared();
    tracing::debug!(
      worker_threads = config.worker_threads().get(),
      max_blocking_threads = config.max_blocking_threads().get(),
      thread_name = config.thread_name(),
      "dispatch pool started"
    );
    Ok(Self { runtime, target, config })
  }

  /// Target that spawns continuations on this pool.
  #[must_use]
  pub fn dispatch_target(&self) -> DispatchTargetShared {
    self.target.clone()
  }

  /// Configuration whose default target is this pool.
  #[must_use]
  pub fn deferred_config(&self) -> DeferredConfig {
    DeferredConfig::default().with_default_target(self.dispatch_target())
  }

  /// Runtime handle, for spawning async work next to the continuations.
  #[must_use]
  pub fn handle(&self) -> &tokio::runtime::Handle {
    self.runtime.handle()
  }

  /// Settings the pool was built with.
  #[must_use]
  pub const fn config(&self) -> &DispatchPoolConfig {
    &self.config
  }

  /// Shuts the pool down, waiting at most `timeout` for running continuations.
  ///
  /// Continuations dispatched afterwards are dropped without running.
  pub fn shutdown_timeout(self, timeout: Duration) {
    tracing::debug!(thread_name = self.config.thread_name(), ?timeout, "dispatch pool shutting down");
    self.runtime.shutdown_timeout(timeout);
  }
}

impl fmt::Debug for DispatchPool {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DispatchPool").field("config", &self.config).finish()
  }
}
