
use std::sync::{Arc, Condvar, Mutex, PoisonError};

use deferred_core_rs::{Deferred, ReadWriteLock};

/// Blocking access to the value of a [`Deferred`].
pub trait DeferredBlockingExt<T> {
  /// Returns the value, parking the calling thread until it is present.
  ///
  /// Returns right away when the value is already stored. Otherwise a one-shot continuation is
  /// registered on the default target and the caller waits for it. Calling this from the thread
  /// (or the only dispatch thread) responsible for fulfilling the same future never returns.
  fn value(&self) -> T;
}

struct Slot<T> {
  value: Mutex<Option<T>>,
  ready: Condvar,
}

impl<T> Slot<T> {
  fn put(&self, value: T) {
    *self.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(value);
    self.ready.notify_all();
  }

  fn wait(&self) -> T {
    let mut guard = self.value.lock().unwrap_or_else(PoisonError::into_inner);
    loop {
      if let Some(value) = guard.take() {
        return value;
      }
      guard = self.ready.wait(guard).unwrap_or_else(PoisonError::into_inner);
    }
  }
}

impl<T, L> DeferredBlockingExt<T> for Deferred<T, L>
where
  T: Clone + Send + Sync + 'static,
  L: ReadWriteLock,
{
  fn value(&self) -> T {
    if let Some(value) = self.peek() {
      return value;
    }
    let slot = Arc::new(Slot { value: Mutex::new(None), ready: Condvar::new() });
    let filler = slot.clone();
    tracing::trace!(lock = L::NAME, "waiting for deferred value");
    self.upon(move |value| filler.put(value));
    slot.wait()
  }
}
