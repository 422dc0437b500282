mod queue_lock;

pub use queue_lock::QueueLock;
