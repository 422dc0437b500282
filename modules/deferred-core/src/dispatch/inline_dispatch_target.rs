use super::{DispatchJob, DispatchTarget};

/// Runs every job immediately on the thread that dispatches it.
///
/// With this target, continuations run on the fulfilling thread right after the value has been
/// stored, or on the registering thread when the value was already there.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineDispatchTarget;

impl DispatchTarget for InlineDispatchTarget {
  fn dispatch(&self, job: DispatchJob) {
    job();
  }
}
