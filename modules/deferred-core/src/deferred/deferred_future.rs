
use core::{
  fmt,
  future::{Future, IntoFuture},
  pin::Pin,
  task::{Context, Poll},
};

use futures::channel::oneshot;

use super::Deferred;
use crate::{
  dispatch::{DispatchTargetShared, InlineDispatchTarget},
  sync::ReadWriteLock,
};

/// Error returned by [`DeferredFuture`] when the future it waits on can never be fulfilled.
///
/// This happens when every handle to an unfulfilled [`Deferred`] is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredAbandoned;

impl fmt::Display for DeferredAbandoned {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("deferred was dropped before it was fulfilled")
  }
}

#[cfg(feature = "std")]
impl std::error::Error for DeferredAbandoned {}

/// [`Future`] resolving to the value of a [`Deferred`].
///
/// Created by [`Deferred::to_future`] or by awaiting a `Deferred` directly.
#[must_use = "futures do nothing unless polled"]
pub struct DeferredFuture<T> {
  receiver: oneshot::Receiver<T>,
}

impl<T> Future for DeferredFuture<T> {
  type Output = Result<T, DeferredAbandoned>;

  fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    Pin::new(&mut self.receiver).poll(cx).map(|received| received.map_err(|_| DeferredAbandoned))
  }
}

impl<T> fmt::Debug for DeferredFuture<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DeferredFuture").finish_non_exhaustive()
  }
}

impl<T, L> Deferred<T, L>
where
  T: Clone + Send + Sync + 'static,
  L: ReadWriteLock,
{
  /// Returns a [`Future`] that resolves once this deferred is fulfilled.
  ///
  /// The value is handed over inline by the fulfilling thread, bypassing the default target.
  pub fn to_future(&self) -> DeferredFuture<T> {
    let (sender, receiver) = oneshot::channel();
    self.upon_on(DispatchTargetShared::new(InlineDispatchTarget), move |value| {
      // The receiver may already be gone; nobody is waiting then.
      let _ = sender.send(value);
    });
    DeferredFuture { receiver }
  }
}

impl<T, L> IntoFuture for Deferred<T, L>
where
  T: Clone + Send + Sync + 'static,
  L: ReadWriteLock,
{
  type IntoFuture = DeferredFuture<T>;
  type Output = Result<T, DeferredAbandoned>;

  fn into_future(self) -> Self::IntoFuture {
    self.to_future()
  }
}
