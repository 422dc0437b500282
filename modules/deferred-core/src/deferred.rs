mod collection;
mod combinators;
mod deferred_config;
mod deferred_future;
mod deferred_struct;
mod fulfill_error;
mod upon_block;

pub use collection::{all, any};
pub use deferred_config::DeferredConfig;
pub use deferred_future::{DeferredAbandoned, DeferredFuture};
pub use deferred_struct::Deferred;
pub use fulfill_error::FulfillError;
