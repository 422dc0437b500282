mod lock_protected;
mod read_write_lock;

pub use lock_protected::LockProtected;
pub use read_write_lock::{CasSpinLock, CasSpinLockState, ReadWriteLock, SpinLock};
