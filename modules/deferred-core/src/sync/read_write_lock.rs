mod cas_spin_lock;
mod spin_lock;
#[cfg(test)]
mod tests;

pub use cas_spin_lock::{CasSpinLock, CasSpinLockState};
pub use spin_lock::SpinLock;

/// Scoped reader/writer lock abstraction.
///
/// Both operations run the given closure with the lock held for the closure's whole duration
/// and release it afterwards, including when the closure unwinds. Implementations that do not
/// distinguish readers from writers may treat a read as a write.
///
/// Re-entering the same lock from inside a closure is a caller error. Depending on the
/// implementation it spins or blocks forever.
///
/// # Safety
///
/// Implementors must guarantee that while a `with_write_lock` closure runs, no other
/// `with_read_lock` or `with_write_lock` closure on the same instance runs. [`LockProtected`]
/// hands out `&mut` references based on this guarantee.
///
/// [`LockProtected`]: crate::sync::LockProtected
pub unsafe trait ReadWriteLock: Send + Sync + 'static {
  /// Human readable name of the implementation.
  const NAME: &'static str;

  /// Creates an unlocked instance.
  fn new() -> Self
  where
    Self: Sized;

  /// Runs `f` while holding shared access.
  fn with_read_lock<R>(&self, f: impl FnOnce() -> R) -> R;

  /// Runs `f` while holding exclusive access.
  fn with_write_lock<R>(&self, f: impl FnOnce() -> R) -> R;
}
