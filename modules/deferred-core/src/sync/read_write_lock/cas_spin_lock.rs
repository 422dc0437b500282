
use core::fmt;

use portable_atomic::{AtomicU32, Ordering};

use super::ReadWriteLock;

const WRITER_BIT: u32 = 0x4000_0000;
const WRITER_WAITING_BIT: u32 = 0x2000_0000;
const WRITER_MASK: u32 = WRITER_BIT | WRITER_WAITING_BIT;
const READER_MASK: u32 = !WRITER_MASK;

/// Reader/writer spin lock built on a single compare-and-swap word.
///
/// The state word packs three fields:
///
/// - bit 30: a writer holds the lock
/// - bit 29: a writer is waiting; new readers stay out until it gets in
/// - remaining bits: number of active readers
///
/// Any number of readers may hold the lock together as long as no writer is active or waiting.
/// Waiting writers are not ordered among themselves; whichever wins the CAS proceeds.
pub struct CasSpinLock {
  state: AtomicU32,
}

/// Decoded view of a [`CasSpinLock`] state word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CasSpinLockState {
  /// Number of readers currently inside the lock.
  pub readers:        u32,
  /// Whether a writer currently holds the lock.
  pub writer_active:  bool,
  /// Whether a writer is waiting to acquire the lock.
  pub writer_waiting: bool,
}

impl CasSpinLockState {
  const fn decode(state: u32) -> Self {
    Self {
      readers:        state & READER_MASK,
      writer_active:  state & WRITER_BIT != 0,
      writer_waiting: state & WRITER_WAITING_BIT != 0,
    }
  }
}

impl CasSpinLock {
  /// Creates an unlocked instance.
  #[must_use]
  pub const fn new() -> Self {
    Self { state: AtomicU32::new(0) }
  }

  /// Returns a decoded snapshot of the state word.
  ///
  /// The snapshot is stale as soon as it is returned and is meant for diagnostics.
  #[must_use]
  pub fn snapshot(&self) -> CasSpinLockState {
    CasSpinLockState::decode(self.state.load(Ordering::Acquire))
  }

  fn acquire_write(&self) {
    loop {
      let state = self.state.load(Ordering::Relaxed);

      // Free, or only our own (or another writer's) waiting flag is set.
      if (state == 0 || state == WRITER_WAITING_BIT)
        && self.state.compare_exchange_weak(state, WRITER_BIT, Ordering::Acquire, Ordering::Relaxed).is_ok()
      {
        return;
      }

      // Keep new readers out. A failed CAS is fine, the next round retries.
      if state & WRITER_WAITING_BIT == 0 {
        let _ =
          self.state.compare_exchange_weak(state, state | WRITER_WAITING_BIT, Ordering::Relaxed, Ordering::Relaxed);
      }
      core::hint::spin_loop();
    }
  }

  fn release_write(&self) {
    let mut state = self.state.load(Ordering::Relaxed);
    // Only the waiting flag of a queued writer survives the release.
    while let Err(observed) =
      self.state.compare_exchange_weak(state, state & WRITER_WAITING_BIT, Ordering::Release, Ordering::Relaxed)
    {
      state = observed;
    }
  }

  fn acquire_read(&self) {
    loop {
      let state = self.state.load(Ordering::Relaxed);
      if state & WRITER_MASK == 0
        && self.state.compare_exchange_weak(state, state + 1, Ordering::Acquire, Ordering::Relaxed).is_ok()
      {
        return;
      }
      core::hint::spin_loop();
    }
  }

  fn release_read(&self) {
    let mut state = self.state.load(Ordering::Relaxed);
    loop {
      let readers = state & READER_MASK;
      if readers == 0 {
        tracing::error!(state, "read lock released without a matching acquisition");
      }
      assert!(readers > 0, "unlocking read lock: invalid reader count (state = {state:#010x})");

      let next = (readers - 1) | (state & WRITER_WAITING_BIT);
      match self.state.compare_exchange_weak(state, next, Ordering::Release, Ordering::Relaxed) {
        | Ok(_) => return,
        | Err(observed) => state = observed,
      }
    }
  }
}

impl Default for CasSpinLock {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for CasSpinLock {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CasSpinLock").field("state", &self.snapshot()).finish()
  }
}

struct ReadRelease<'a>(&'a CasSpinLock);

impl Drop for ReadRelease<'_> {
  fn drop(&mut self) {
    self.0.release_read();
  }
}

struct WriteRelease<'a>(&'a CasSpinLock);

impl Drop for WriteRelease<'_> {
  fn drop(&mut self) {
    self.0.release_write();
  }
}

// SAFETY: a writer only enters after moving the word from "no readers, no writer" to
// WRITER_BIT, and readers only enter while neither writer bit is set, so a write closure never
// overlaps another closure.
unsafe impl ReadWriteLock for CasSpinLock {
  const NAME: &'static str = "CasSpinLock";

  fn new() -> Self {
    CasSpinLock::new()
  }

  fn with_read_lock<R>(&self, f: impl FnOnce() -> R) -> R {
    self.acquire_read();
    let _release = ReadRelease(self);
    f()
  }

  fn with_write_lock<R>(&self, f: impl FnOnce() -> R) -> R {
    self.acquire_write();
    let _release = WriteRelease(self);
    f()
  }
}
