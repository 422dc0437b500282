use std::time::Duration;

use crate::prelude::*;

#[test]
fn prelude_covers_the_std_bindings() {
  let pool = DispatchPool::new(DispatchPoolConfig::default().with_thread_name("prelude-pool")).unwrap();
  let first: Deferred<u32, QueueLock> = Deferred::new_with_config(pool.deferred_config());
  let second: Deferred<u32, QueueLock> = Deferred::new_with_config(pool.deferred_config());
  let sum = first.both(&second).map(|(left, right)| left + right);

  first.fulfill(20);
  second.fulfill(22);

  assert_eq!(sum.value(), 42);
  pool.shutdown_timeout(Duration::from_secs(1));
}
