use std::{
  panic::{catch_unwind, AssertUnwindSafe},
  sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    mpsc, Arc, Mutex,
  },
  thread,
  time::Duration,
};

use deferred_core_rs::{Deferred, LockProtected, ReadWriteLock};

use super::QueueLock;

#[test]
fn closures_never_overlap() {
  let lock = QueueLock::new();
  let inside = AtomicBool::new(false);
  let overlaps = AtomicUsize::new(0);

  thread::scope(|scope| {
    for worker in 0..8 {
      let lock = &lock;
      let inside = &inside;
      let overlaps = &overlaps;
      scope.spawn(move || {
        for _ in 0..200 {
          let body = || {
            if inside.swap(true, Ordering::SeqCst) {
              overlaps.fetch_add(1, Ordering::SeqCst);
            }
            thread::yield_now();
            inside.store(false, Ordering::SeqCst);
          };
          if worker % 2 == 0 {
            lock.with_read_lock(body);
          } else {
            lock.with_write_lock(body);
          }
        }
      });
    }
  });

  assert_eq!(overlaps.load(Ordering::SeqCst), 0, "readers are serialized like writers");
  assert_eq!(lock.completed(), 1_600);
}

#[test]
fn waiters_are_served_in_arrival_order() {
  let lock = Arc::new(QueueLock::new());
  let order = Arc::new(Mutex::new(Vec::new()));
  let (entered_tx, entered_rx) = mpsc::channel();
  let (release_tx, release_rx) = mpsc::channel::<()>();

  let holder = {
    let lock = lock.clone();
    thread::spawn(move || {
      lock.with_write_lock(|| {
        entered_tx.send(()).unwrap();
        release_rx.recv().unwrap();
      });
    })
  };
  entered_rx.recv().unwrap();

  let mut waiters = Vec::new();
  for index in 0..4 {
    let waiter_lock = lock.clone();
    let order = order.clone();
    waiters.push(thread::spawn(move || waiter_lock.with_read_lock(|| order.lock().unwrap().push(index))));
    while lock_issued(&lock) < index + 2 {
      thread::sleep(Duration::from_millis(1));
    }
  }

  release_tx.send(()).unwrap();
  holder.join().unwrap();
  for waiter in waiters {
    waiter.join().unwrap();
  }

  assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3]);
}

fn lock_issued(lock: &QueueLock) -> u64 {
  lock.next_ticket.load(Ordering::SeqCst)
}

#[test]
fn panicking_closure_still_advances_the_queue() {
  let lock = QueueLock::new();

  let outcome = catch_unwind(AssertUnwindSafe(|| lock.with_write_lock(|| panic!("boom"))));
  assert!(outcome.is_err());

  assert_eq!(lock.with_read_lock(|| 5), 5);
  assert_eq!(lock.completed(), 2);
}

#[test]
fn queue_lock_guards_a_cell_and_a_deferred() {
  let counter: LockProtected<u64, QueueLock> = LockProtected::new(0);
  thread::scope(|scope| {
    for _ in 0..4 {
      scope.spawn(|| {
        for _ in 0..100 {
          counter.with_write(|value| *value += 1);
        }
      });
    }
  });
  assert_eq!(counter.with_read(|value| *value), 400);

  let deferred: Deferred<u32, QueueLock> = Deferred::new();
  let seen = Arc::new(Mutex::new(Vec::new()));
  let observed = seen.clone();
  deferred.upon(move |value| observed.lock().unwrap().push(value));
  assert!(deferred.fulfill_if_unfulfilled(12));
  assert_eq!(deferred.peek(), Some(12));
  assert_eq!(*seen.lock().unwrap(), vec![12]);
}

#[test]
fn name_and_debug_identify_the_lock() {
  let lock = QueueLock::default();
  lock.with_read_lock(|| ());
  assert_eq!(QueueLock::NAME, "QueueLock");
  assert_eq!(format!("{lock:?}"), "QueueLock { issued: 1, completed: 1 }");
}
