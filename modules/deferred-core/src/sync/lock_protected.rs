
use core::{cell::UnsafeCell, fmt};

use super::ReadWriteLock;

/// A value that can only be reached through its paired [`ReadWriteLock`].
///
/// Readers get `&T` inside `with_read`, writers get `&mut T` inside `with_write`. Everything a
/// closure observes or changes happens under one lock acquisition, so no closure ever sees a
/// partially applied update.
pub struct LockProtected<T, L> {
  lock: L,
  item: UnsafeCell<T>,
}

// SAFETY: the value is moved along with the cell.
unsafe impl<T: Send, L: ReadWriteLock> Send for LockProtected<T, L> {}
// SAFETY: `&mut T` is only produced under the write lock. Readers may share `&T` across threads,
// hence `T: Sync`.
unsafe impl<T: Send + Sync, L: ReadWriteLock> Sync for LockProtected<T, L> {}

impl<T, L: ReadWriteLock> LockProtected<T, L> {
  /// Wraps `item` with a freshly created lock.
  pub fn new(item: T) -> Self {
    Self::with_lock(item, L::new())
  }

  /// Wraps `item` with an existing lock instance.
  pub const fn with_lock(item: T, lock: L) -> Self {
    Self { lock, item: UnsafeCell::new(item) }
  }

  /// Runs `f` with shared access to the value.
  pub fn with_read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
    self.lock.with_read_lock(|| {
      // SAFETY: the read lock excludes writers for the duration of the closure.
      let item = unsafe { &*self.item.get() };
      f(item)
    })
  }

  /// Runs `f` with exclusive access to the value.
  pub fn with_write<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
    self.lock.with_write_lock(|| {
      // SAFETY: the write lock excludes every other closure for its duration.
      let item = unsafe { &mut *self.item.get() };
      f(item)
    })
  }

  /// Returns the lock guarding the value.
  pub const fn lock(&self) -> &L {
    &self.lock
  }

  /// Returns a mutable reference without locking; the borrow checker proves exclusivity.
  pub fn get_mut(&mut self) -> &mut T {
    self.item.get_mut()
  }

  /// Consumes the cell and returns the value.
  pub fn into_inner(self) -> T {
    self.item.into_inner()
  }
}

impl<T: Default, L: ReadWriteLock> Default for LockProtected<T, L> {
  fn default() -> Self {
    Self::new(T::default())
  }
}

impl<T: fmt::Debug, L: ReadWriteLock> fmt::Debug for LockProtected<T, L> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.with_read(|item| f.debug_struct("LockProtected").field("lock", &L::NAME).field("item", item).finish())
  }
}
