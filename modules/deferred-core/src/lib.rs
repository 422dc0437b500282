#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(clippy::missing_safety_doc)]
#![deny(clippy::redundant_clone)]
#![deny(clippy::redundant_field_names)]
#![deny(clippy::needless_borrow)]
#![deny(clippy::manual_let_else)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::print_stdout)]
#![deny(clippy::dbg_macro)]
#![deny(clippy::clone_on_copy)]
#![deny(clippy::wrong_self_convention)]
#![deny(clippy::from_over_into)]
#![deny(clippy::bool_comparison)]
#![deny(clippy::needless_bool)]
#![deny(clippy::manual_assert)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::redundant_clone))]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! Runtime-agnostic single-assignment futures.
//!
//! This crate provides [`Deferred`], a value that may not exist yet, together with the
//! synchronization layer it is built on:
//!
//! - [`ReadWriteLock`] with two implementations available in `no_std`: [`SpinLock`] (one
//!   test-and-set flag, no reader concurrency) and [`CasSpinLock`] (a bit-packed reader/writer spin
//!   lock that keeps new readers out while a writer waits).
//! - [`LockProtected`], a value paired with a lock that only hands out references inside the
//!   corresponding critical section.
//! - [`DispatchTarget`], the executor seam continuations are handed to.
//!
//! Runtime bindings (a queue-serialized lock, a tokio-backed dispatch pool and blocking access
//! to values) live in `deferred_std_rs`.
//!
//! # Example
//! ```
//! use deferred_core_rs::{all, Deferred};
//!
//! let first = Deferred::<u32>::new();
//! let second = Deferred::<u32>::new();
//! let joined = all(vec![first.clone(), second.clone()]);
//!
//! second.fulfill(2);
//! first.fulfill(1);
//!
//! assert_eq!(joined.peek(), Some(vec![1, 2]));
//! ```

extern crate alloc;

/// Single-assignment futures and their combinators.
pub mod deferred;
/// Dispatch targets that run continuations.
pub mod dispatch;
/// Reader/writer locks and the lock-protected cell.
pub mod sync;

pub use deferred::{all, any, Deferred, DeferredAbandoned, DeferredConfig, DeferredFuture, FulfillError};
pub use dispatch::{DispatchJob, DispatchTarget, DispatchTargetShared, InlineDispatchTarget};
pub use sync::{CasSpinLock, CasSpinLockState, LockProtected, ReadWriteLock, SpinLock};

/// Prelude module that re-exports commonly used types and traits.
pub mod prelude {
  pub use crate::{
    deferred::{all, any, Deferred, DeferredAbandoned, DeferredConfig, DeferredFuture, FulfillError},
    dispatch::{DispatchJob, DispatchTarget, DispatchTargetShared, InlineDispatchTarget},
    sync::{CasSpinLock, CasSpinLockState, LockProtected, ReadWriteLock, SpinLock},
  };
}
