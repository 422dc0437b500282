#[cfg(test)]
mod tests;

use std::{
  fmt,
  sync::{
    atomic::{AtomicU64, Ordering},
    Condvar, Mutex, MutexGuard, PoisonError,
  },
};

use deferred_core_rs::ReadWriteLock;

/// Lock that runs every closure, read or write, through one serialized FIFO channel.
///
/// Each caller takes a ticket and parks until the channel reaches it, then runs its closure on
/// its own thread. Closures therefore execute one at a time in arrival order. Reads get no
/// concurrency over writes.
///
/// Calling `with_read_lock` / `with_write_lock` on the same `QueueLock` from inside a closure
/// deadlocks: the inner call waits for a ticket that is only served after the outer closure
/// returns.
pub struct QueueLock {
  next_ticket: AtomicU64,
  serving:     Mutex<u64>,
  turn:        Condvar,
}

impl QueueLock {
  /// Creates an idle queue lock.
  #[must_use]
  pub const fn new() -> Self {
    Self { next_ticket: AtomicU64::new(0), serving: Mutex::new(0), turn: Condvar::new() }
  }

  /// Number of closures that have finished on this lock.
  #[must_use]
  pub fn completed(&self) -> u64 {
    *self.lock_serving()
  }

  fn lock_serving(&self) -> MutexGuard<'_, u64> {
    self.serving.lock().unwrap_or_else(PoisonError::into_inner)
  }

  fn run_serialized<R>(&self, f: impl FnOnce() -> R) -> R {
    let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
    {
      let serving = self.lock_serving();
      let _serving = self.turn.wait_while(serving, |serving| *serving != ticket).unwrap_or_else(PoisonError::into_inner);
    }
    let _advance = AdvanceOnDrop(self);
    f()
  }
}

struct AdvanceOnDrop<'a>(&'a QueueLock);

impl Drop for AdvanceOnDrop<'_> {
  fn drop(&mut self) {
    *self.0.lock_serving() += 1;
    self.0.turn.notify_all();
  }
}

impl Default for QueueLock {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for QueueLock {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("QueueLock")
      .field("issued", &self.next_ticket.load(Ordering::Relaxed))
      .field("completed", &self.completed())
      .finish()
  }
}

// SAFETY: tickets are unique and only the holder of the ticket being served runs, so closures
// never overlap.
unsafe impl ReadWriteLock for QueueLock {
  const NAME: &'static str = "QueueLock";

  fn new() -> Self {
    QueueLock::new()
  }

  fn with_read_lock<R>(&self, f: impl FnOnce() -> R) -> R {
    self.run_serialized(f)
  }

  fn with_write_lock<R>(&self, f: impl FnOnce() -> R) -> R {
    self.run_serialized(f)
  }
}
