use alloc::{
  boxed::Box,
  sync::{Arc, Weak},
  vec::Vec,
};
use core::fmt;

use super::{
  upon_block::{PendingUponBlocks, UponBlock},
  DeferredConfig, FulfillError,
};
use crate::{
  dispatch::DispatchTargetShared,
  sync::{CasSpinLock, LockProtected, ReadWriteLock},
};

struct Protected<T> {
  value:       Option<T>,
  upon_blocks: PendingUponBlocks<T>,
}

struct DeferredInner<T, L> {
  protected: LockProtected<Protected<T>, L>,
  config:    DeferredConfig,
}

/// A value of type `T` that may not exist yet.
///
/// A `Deferred` starts out empty (or pre-fulfilled) and is fulfilled at most once. Continuations
/// registered with [`upon`](Self::upon) / [`upon_on`](Self::upon_on) run exactly once with the
/// value, on their dispatch target, no matter whether they were registered before or after the
/// fulfillment.
///
/// Cloning a `Deferred` yields another handle to the same future. `L` selects the
/// [`ReadWriteLock`] guarding the internal state.
///
/// Continuations always run outside the internal lock, so they are free to touch the same
/// future again.
pub struct Deferred<T, L = CasSpinLock> {
  inner: Arc<DeferredInner<T, L>>,
}

impl<T, L> Clone for Deferred<T, L> {
  fn clone(&self) -> Self {
    Self { inner: self.inner.clone() }
  }
}

impl<T, L> Deferred<T, L>
where
  T: Clone + Send + Sync + 'static,
  L: ReadWriteLock,
{
  /// Creates an unfulfilled future that runs continuations inline by default.
  #[must_use]
  pub fn new() -> Self {
    Self::new_with_config(DeferredConfig::default())
  }

  /// Creates an unfulfilled future with the given configuration.
  #[must_use]
  pub fn new_with_config(config: DeferredConfig) -> Self {
    Self::from_parts(None, config)
  }

  /// Creates a future that already holds `value`.
  #[must_use]
  pub fn fulfilled(value: T) -> Self {
    Self::fulfilled_with_config(value, DeferredConfig::default())
  }

  /// Creates a future that already holds `value`, with the given configuration.
  #[must_use]
  pub fn fulfilled_with_config(value: T, config: DeferredConfig) -> Self {
    Self::from_parts(Some(value), config)
  }

  fn from_parts(value: Option<T>, config: DeferredConfig) -> Self {
    let protected = LockProtected::new(Protected { value, upon_blocks: PendingUponBlocks::new() });
    Self { inner: Arc::new(DeferredInner { protected, config }) }
  }

  /// Configuration this future was created with.
  #[must_use]
  pub fn config(&self) -> &DeferredConfig {
    &self.inner.config
  }

  /// Target used by [`upon`](Self::upon), [`map`](Self::map) and [`bind`](Self::bind).
  #[must_use]
  pub fn default_target(&self) -> &DispatchTargetShared {
    self.inner.config.default_target()
  }

  /// Returns `true` once a value has been stored.
  #[must_use]
  pub fn is_fulfilled(&self) -> bool {
    self.inner.protected.with_read(|protected| protected.value.is_some())
  }

  /// Returns a copy of the value if it is present. Never blocks on fulfillment.
  #[must_use]
  pub fn peek(&self) -> Option<T> {
    self.inner.protected.with_read(|protected| protected.value.clone())
  }

  /// Stores `value` and dispatches every pending continuation.
  ///
  /// # Errors
  ///
  /// Returns [`FulfillError::AlreadyFulfilled`] carrying `value` back if the future already
  /// holds a value. The stored value is left untouched.
  pub fn try_fulfill(&self, value: T) -> Result<(), FulfillError<T>> {
    let (value, blocks) = self.inner.protected.with_write(|protected| {
      if protected.value.is_some() {
        return Err(FulfillError::AlreadyFulfilled(value));
      }
      protected.value = Some(value.clone());
      Ok((value, protected.upon_blocks.take()))
    })?;
    Self::dispatch_all(value, blocks);
    Ok(())
  }

  /// Stores `value` and dispatches every pending continuation in registration order.
  ///
  /// Each future has exactly one producer. Use
  /// [`fulfill_if_unfulfilled`](Self::fulfill_if_unfulfilled) when several producers race.
  ///
  /// # Panics
  ///
  /// Panics if the future has already been fulfilled.
  #[track_caller]
  pub fn fulfill(&self, value: T) {
    if let Err(error) = self.try_fulfill(value) {
      tracing::error!(lock = L::NAME, "{error}");
      panic!("{error}");
    }
  }

  /// Stores `value` unless a value is already present, in which case nothing happens.
  ///
  /// Returns `true` if this call stored the value.
  pub fn fulfill_if_unfulfilled(&self, value: T) -> bool {
    self.try_fulfill(value).is_ok()
  }

  /// Registers `block` on the default target. See [`upon_on`](Self::upon_on).
  pub fn upon<F>(&self, block: F)
  where
    F: FnOnce(T) + Send + 'static, {
    self.upon_on(self.default_target().clone(), block);
  }

  /// Registers `block` to run on `target` with the value.
  ///
  /// If the value is already present, `block` is dispatched right away; otherwise it is queued
  /// and dispatched by the fulfilling call. Either way it runs exactly once.
  pub fn upon_on<F>(&self, target: DispatchTargetShared, block: F)
  where
    F: FnOnce(T) + Send + 'static, {
    let upon = UponBlock::new(target, Box::new(block));
    let ready = self.inner.protected.with_write(|protected| match &protected.value {
      | Some(value) => Some((value.clone(), upon)),
      | None => {
        protected.upon_blocks.push(upon);
        None
      }
    });
    if let Some((value, upon)) = ready {
      upon.dispatch(value);
    }
  }

  /// Returns `true` when both handles refer to the same future.
  #[must_use]
  pub fn ptr_eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.inner, &other.inner)
  }

  /// Non-owning handle, for continuations registered on the future they refer to.
  pub(crate) fn downgrade(&self) -> WeakDeferred<T, L> {
    WeakDeferred { inner: Arc::downgrade(&self.inner) }
  }

  fn dispatch_all(value: T, blocks: Vec<UponBlock<T>>) {
    tracing::trace!(continuations = blocks.len(), lock = L::NAME, "deferred fulfilled");
    for upon in blocks {
      upon.dispatch(value.clone());
    }
  }
}

/// Handle that does not keep a [`Deferred`] alive.
pub(crate) struct WeakDeferred<T, L> {
  inner: Weak<DeferredInner<T, L>>,
}

impl<T, L> WeakDeferred<T, L> {
  /// Returns a strong handle while any other handle still exists.
  pub(crate) fn upgrade(&self) -> Option<Deferred<T, L>> {
    self.inner.upgrade().map(|inner| Deferred { inner })
  }
}

impl<T, L> Default for Deferred<T, L>
where
  T: Clone + Send + Sync + 'static,
  L: ReadWriteLock,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<T, L> fmt::Debug for Deferred<T, L>
where
  T: Clone + Send + Sync + fmt::Debug + 'static,
  L: ReadWriteLock,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Deferred").field("value", &self.peek()).field("lock", &L::NAME).finish()
  }
}
