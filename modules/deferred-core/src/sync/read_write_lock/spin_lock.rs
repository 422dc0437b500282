use core::fmt;

use super::ReadWriteLock;

/// Binary spin lock: readers and writers contend for the same flag.
///
/// Acquisition is a test-and-set loop without backoff, so this is only suitable for very short
/// critical sections. Reads get no concurrency over writes.
pub struct SpinLock {
  flag: spin::Mutex<()>,
}

impl SpinLock {
  /// Creates an unlocked spin lock.
  #[must_use]
  pub const fn new() -> Self {
    Self { flag: spin::Mutex::new(()) }
  }

  /// Returns `true` if some thread currently holds the flag.
  #[must_use]
  pub fn is_locked(&self) -> bool {
    self.flag.is_locked()
  }

  fn run_exclusive<R>(&self, f: impl FnOnce() -> R) -> R {
    let _guard = self.flag.lock();
    f()
  }
}

impl Default for SpinLock {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for SpinLock {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SpinLock").field("locked", &self.is_locked()).finish()
  }
}

// SAFETY: both operations take the same mutex, so every closure runs exclusively.
unsafe impl ReadWriteLock for SpinLock {
  const NAME: &'static str = "SpinLock";

  fn new() -> Self {
    SpinLock::new()
  }

  fn with_read_lock<R>(&self, f: impl FnOnce() -> R) -> R {
    self.run_exclusive(f)
  }

  fn with_write_lock<R>(&self, f: impl FnOnce() -> R) -> R {
    self.run_exclusive(f)
  }
}
