#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(clippy::missing_safety_doc)]
#![deny(clippy::redundant_clone)]
#![deny(clippy::needless_borrow)]
#![deny(clippy::manual_let_else)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::print_stdout)]
#![deny(clippy::dbg_macro)]
#![deny(clippy::from_over_into)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::redundant_clone))]

//! Utilities for std runtimes.
//!
//! This crate binds the abstractions of `deferred_core_rs` to std and tokio:
//!
//! - [`QueueLock`]: a [`ReadWriteLock`](deferred_core_rs::ReadWriteLock) that serializes every
//!   closure through one FIFO channel and parks waiting threads instead of spinning.
//! - [`DispatchPool`]: a tokio runtime whose blocking threads run continuations, handing out the
//!   [`DeferredConfig`](deferred_core_rs::DeferredConfig) every future of the process is built
//!   with.
//! - [`DeferredBlockingExt`]: blocking access to a value.

/// Blocking access to deferred values.
pub mod blocking;
/// Tokio-backed dispatch targets.
pub mod dispatch;
/// Locks that need the operating system to park threads.
pub mod sync;

pub use blocking::DeferredBlockingExt;
pub use deferred_core_rs::{
  all, any, CasSpinLock, Deferred, DeferredAbandoned, DeferredConfig, DeferredFuture, DispatchTarget,
  DispatchTargetShared, FulfillError, InlineDispatchTarget, LockProtected, ReadWriteLock, SpinLock,
};
pub use dispatch::{DispatchPool, DispatchPoolConfig, DispatchPoolError, TokioDispatchTarget};
pub use sync::QueueLock;

#[cfg(test)]
mod tests;

/// Prelude module that re-exports commonly used types and traits.
pub mod prelude {
  pub use deferred_core_rs::prelude::*;

  pub use crate::{
    blocking::DeferredBlockingExt,
    dispatch::{DispatchPool, DispatchPoolConfig, DispatchPoolError, TokioDispatchTarget},
    sync::QueueLock,
  };
}
