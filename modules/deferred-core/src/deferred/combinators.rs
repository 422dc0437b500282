
use super::Deferred;
use crate::{dispatch::DispatchTargetShared, sync::ReadWriteLock};

impl<T, L> Deferred<T, L>
where
  T: Clone + Send + Sync + 'static,
  L: ReadWriteLock,
{
  /// Transforms the value on the default target. See [`map_on`](Self::map_on).
  #[must_use]
  pub fn map<U, F>(&self, f: F) -> Deferred<U, L>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> U + Send + 'static, {
    self.map_on(self.default_target().clone(), f)
  }

  /// Returns a future fulfilled with `f(value)` once this one is fulfilled.
  ///
  /// `f` runs on `target`. The returned future shares this future's configuration.
  #[must_use]
  pub fn map_on<U, F>(&self, target: DispatchTargetShared, f: F) -> Deferred<U, L>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> U + Send + 'static, {
    let mapped = Deferred::new_with_config(self.config().clone());
    let output = mapped.clone();
    self.upon_on(target, move |value| output.fulfill(f(value)));
    mapped
  }

  /// Chains a dependent computation on the default target. See [`bind_on`](Self::bind_on).
  #[must_use]
  pub fn bind<U, F>(&self, f: F) -> Deferred<U, L>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> Deferred<U, L> + Send + 'static, {
    self.bind_on(self.default_target().clone(), f)
  }

  /// Returns a future that settles with the value of the future produced by `f`.
  ///
  /// Once this future is fulfilled, `f` runs on `target` and the value of the future it returns
  /// is forwarded, again through `target`, to the returned future. No thread blocks in between.
  #[must_use]
  pub fn bind_on<U, F>(&self, target: DispatchTargetShared, f: F) -> Deferred<U, L>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> Deferred<U, L> + Send + 'static, {
    let bound = Deferred::new_with_config(self.config().clone());
    let output = bound.clone();
    let forward_target = target.clone();
    self.upon_on(target, move |value| {
      f(value).upon_on(forward_target, move |forwarded| output.fulfill(forwarded));
    });
    bound
  }

  /// Pairs this future with `other`; the result is available once both are fulfilled.
  #[must_use]
  pub fn both<U>(&self, other: &Deferred<U, L>) -> Deferred<(T, U), L>
  where
    U: Clone + Send + Sync + 'static, {
    let other = other.clone();
    self.bind(move |first| other.map(move |second| (first, second)))
  }
}
