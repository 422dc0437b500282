use crate::dispatch::DispatchTargetShared;

/// Construction-time settings for a [`Deferred`](super::Deferred).
///
/// Derived futures (`map`, `bind`, `all`, ...) inherit the configuration of their source.
#[derive(Clone, Debug, Default)]
pub struct DeferredConfig {
  default_target: DispatchTargetShared,
}

impl DeferredConfig {
  /// Creates a configuration dispatching to `default_target`.
  #[must_use]
  pub const fn new(default_target: DispatchTargetShared) -> Self {
    Self { default_target }
  }

  /// Replaces the target used when a continuation is registered without one.
  #[must_use]
  pub fn with_default_target(mut self, default_target: DispatchTargetShared) -> Self {
    self.default_target = default_target;
    self
  }

  /// Target used when a continuation is registered without one.
  #[must_use]
  pub const fn default_target(&self) -> &DispatchTargetShared {
    &self.default_target
  }
}
