use core::fmt;

/// Errors returned by [`Deferred::try_fulfill`](super::Deferred::try_fulfill).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FulfillError<T> {
  /// The future already holds a value. The rejected value is handed back.
  AlreadyFulfilled(T),
}

impl<T> FulfillError<T> {
  /// Returns the value that was rejected.
  pub fn into_value(self) -> T {
    match self {
      | Self::AlreadyFulfilled(value) => value,
    }
  }
}

impl<T> fmt::Display for FulfillError<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::AlreadyFulfilled(_) => f.write_str("cannot fulfill an already-fulfilled Deferred"),
    }
  }
}

#[cfg(feature = "std")]
impl<T: fmt::Debug> std::error::Error for FulfillError<T> {}
