mod dispatch_target;
mod dispatch_target_shared;
mod inline_dispatch_target;

pub use dispatch_target::{DispatchJob, DispatchTarget};
pub use dispatch_target_shared::DispatchTargetShared;
pub use inline_dispatch_target::InlineDispatchTarget;
