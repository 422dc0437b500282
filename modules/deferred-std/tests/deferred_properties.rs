use std::{
  num::NonZeroUsize,
  sync::{
    atomic::{AtomicUsize, Ordering},
    mpsc,
  },
  thread,
  time::Duration,
};

use deferred_std_rs::prelude::*;

fn pool() -> DispatchPool {
  let config = DispatchPoolConfig::default()
    .with_worker_threads(NonZeroUsize::new(2).expect("non-zero worker count"))
    .with_thread_name("deferred-properties");
  DispatchPool::new(config).expect("dispatch pool")
}

fn shutdown(pool: DispatchPool) {
  pool.shutdown_timeout(Duration::from_secs(1));
}

#[test]
fn prefulfilled_future_reports_its_value() {
  let pool = pool();
  let deferred: Deferred<u32> = Deferred::fulfilled_with_config(5, pool.deferred_config());
  assert!(deferred.is_fulfilled());
  assert_eq!(deferred.peek(), Some(5));
  assert_eq!(deferred.value(), 5);
  shutdown(pool);
}

fn racing_producers_agree_on<L: ReadWriteLock>(config: DeferredConfig) {
  let deferred: Deferred<usize, L> = Deferred::new_with_config(config);
  let winners = AtomicUsize::new(0);

  thread::scope(|scope| {
    for candidate in 0..16 {
      let deferred = &deferred;
      let winners = &winners;
      scope.spawn(move || {
        if deferred.fulfill_if_unfulfilled(candidate) {
          winners.fetch_add(1, Ordering::SeqCst);
        }
      });
    }
  });

  let value = deferred.value();
  assert!(value < 16);
  assert_eq!(winners.load(Ordering::SeqCst), 1);
  assert_eq!(deferred.peek(), Some(value));
}

#[test]
fn racing_producers_store_one_value_with_every_lock() {
  let pool = pool();
  for _ in 0..10 {
    racing_producers_agree_on::<QueueLock>(pool.deferred_config());
    racing_producers_agree_on::<SpinLock>(pool.deferred_config());
    racing_producers_agree_on::<CasSpinLock>(pool.deferred_config());
  }
  shutdown(pool);
}

#[test]
fn continuations_before_and_after_fulfillment_each_run_once() {
  let pool = pool();
  let deferred: Deferred<u32> = Deferred::new_with_config(pool.deferred_config());
  let (tx, rx) = mpsc::channel();

  let early = tx.clone();
  deferred.upon(move |value| early.send(("early", value)).expect("send"));
  deferred.fulfill(8);
  deferred.upon(move |value| tx.send(("late", value)).expect("send"));

  let mut seen: Vec<_> = rx.iter().take(2).collect();
  seen.sort_unstable();
  assert_eq!(seen, vec![("early", 8), ("late", 8)]);
  assert!(rx.recv_timeout(Duration::from_millis(50)).is_err(), "no continuation runs twice");
  shutdown(pool);
}

#[test]
fn all_preserves_input_order() {
  let pool = pool();
  let inputs: Vec<Deferred<u32>> = (0..3).map(|_| Deferred::new_with_config(pool.deferred_config())).collect();
  let joined = all(inputs.clone());

  inputs[2].fulfill(3);
  inputs[0].fulfill(1);
  assert!(!joined.is_fulfilled());
  inputs[1].fulfill(2);

  assert_eq!(joined.value(), vec![1, 2, 3]);
  assert_eq!(all(Vec::<Deferred<u32>>::new()).peek(), Some(Vec::new()));
  shutdown(pool);
}

#[test]
fn any_yields_the_first_fulfilled_future() {
  let pool = pool();
  let first: Deferred<u32> = Deferred::new_with_config(pool.deferred_config());
  let second: Deferred<u32> = Deferred::new_with_config(pool.deferred_config());
  let winner = any(vec![first.clone(), second.clone()]);

  second.fulfill(2);
  let chosen = winner.value();
  assert!(chosen.ptr_eq(&second));

  first.fulfill(1);
  thread::sleep(Duration::from_millis(20));
  assert!(winner.value().ptr_eq(&second));
  assert_eq!(chosen.value(), 2);
  shutdown(pool);
}

#[test]
fn mapping_identity_preserves_the_value() {
  let pool = pool();
  let deferred: Deferred<String, QueueLock> = Deferred::new_with_config(pool.deferred_config());
  let mapped = deferred.map(|value| value);
  let bound = deferred.bind(Deferred::fulfilled);

  deferred.fulfill("same".to_owned());

  assert_eq!(mapped.value(), deferred.value());
  assert_eq!(bound.value(), deferred.value());
  shutdown(pool);
}

#[test]
fn long_chains_resolve_across_pool_threads() {
  let pool = pool();
  let source: Deferred<u64> = Deferred::new_with_config(pool.deferred_config());
  let chained = (0..100).fold(source.clone(), |current, _| current.map(|value| value + 1));
  let (tx, rx) = mpsc::channel();
  chained.upon(move |value| tx.send(value).expect("send"));

  source.fulfill(0);

  assert_eq!(chained.value(), 100);
  assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(100));
  assert!(rx.recv_timeout(Duration::from_millis(20)).is_err());
  shutdown(pool);
}
