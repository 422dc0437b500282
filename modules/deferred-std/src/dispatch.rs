mod dispatch_pool;
mod dispatch_pool_config;
mod dispatch_pool_error;
mod tokio_dispatch_target;


pub use dispatch_pool::DispatchPool;
pub use dispatch_pool_config::DispatchPoolConfig;
pub use dispatch_pool_error::DispatchPoolError;
pub use tokio_dispatch_target::TokioDispatchTarget;
