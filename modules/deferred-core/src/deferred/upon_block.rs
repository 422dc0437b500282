use alloc::{boxed::Box, vec::Vec};

use crate::dispatch::DispatchTargetShared;

pub(crate) type UponFn<T> = Box<dyn FnOnce(T) + Send + 'static>;

/// A continuation together with the target it runs on.
pub(crate) struct UponBlock<T> {
  target: DispatchTargetShared,
  block:  UponFn<T>,
}

impl<T: Send + 'static> UponBlock<T> {
  pub(crate) fn new(target: DispatchTargetShared, block: UponFn<T>) -> Self {
    Self { target, block }
  }

  pub(crate) fn dispatch(self, value: T) {
    let block = self.block;
    self.target.execute(move || block(value));
  }
}

/// Continuations waiting for a value, in registration order.
///
/// Only reachable through `&mut self`, so sharing `&PendingUponBlocks` between readers never
/// touches the (non-`Sync`) closures.
pub(crate) struct PendingUponBlocks<T> {
  blocks: Vec<UponBlock<T>>,
}

// SAFETY: there is no `&self` API; every access goes through `&mut self`.
unsafe impl<T> Sync for PendingUponBlocks<T> {}

impl<T> PendingUponBlocks<T> {
  pub(crate) const fn new() -> Self {
    Self { blocks: Vec::new() }
  }

  pub(crate) fn push(&mut self, block: UponBlock<T>) {
    self.blocks.push(block);
  }

  pub(crate) fn take(&mut self) -> Vec<UponBlock<T>> {
    core::mem::take(&mut self.blocks)
  }
}
