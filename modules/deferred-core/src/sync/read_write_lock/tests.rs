use std::{
  panic::{catch_unwind, AssertUnwindSafe},
  sync::atomic::{AtomicBool, AtomicUsize, Ordering},
  thread,
};

use super::*;

fn assert_mutual_exclusion<L: ReadWriteLock>() {
  let lock = L::new();
  let inside = AtomicBool::new(false);
  let entries = AtomicUsize::new(0);

  thread::scope(|scope| {
    for worker in 0..6 {
      let lock = &lock;
      let inside = &inside;
      let entries = &entries;
      scope.spawn(move || {
        for _ in 0..300 {
          let critical = || {
            assert!(!inside.swap(true, Ordering::SeqCst), "{} let two closures overlap", L::NAME);
            entries.fetch_add(1, Ordering::SeqCst);
            inside.store(false, Ordering::SeqCst);
          };
          if worker % 2 == 0 {
            lock.with_write_lock(critical);
          } else {
            lock.with_read_lock(critical);
          }
        }
      });
    }
  });

  assert_eq!(entries.load(Ordering::SeqCst), 1_800);
}

#[test]
fn spin_lock_serializes_reads_and_writes() {
  assert_mutual_exclusion::<SpinLock>();
}

#[test]
fn spin_lock_is_released_after_each_closure() {
  let lock = SpinLock::new();
  assert!(!lock.is_locked());
  assert!(lock.with_read_lock(|| lock.is_locked()));
  assert!(!lock.is_locked());

  let result = catch_unwind(AssertUnwindSafe(|| lock.with_write_lock(|| panic!("boom"))));
  assert!(result.is_err());
  assert!(!lock.is_locked());
}

#[test]
fn cas_spin_lock_writers_are_exclusive() {
  let lock = CasSpinLock::new();
  let inside = AtomicBool::new(false);

  thread::scope(|scope| {
    for _ in 0..6 {
      scope.spawn(|| {
        for _ in 0..300 {
          lock.with_write_lock(|| {
            assert!(!inside.swap(true, Ordering::SeqCst));
            inside.store(false, Ordering::SeqCst);
          });
        }
      });
    }
  });
}

#[test]
fn implementations_are_named() {
  assert_eq!(<SpinLock as ReadWriteLock>::NAME, "SpinLock");
  assert_eq!(<CasSpinLock as ReadWriteLock>::NAME, "CasSpinLock");
}
