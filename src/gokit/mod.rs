//! Small concurrency helpers on top of tokio: a fixed-size worker pool,
//! a token bucket rate limiter and panic-catching task wrappers.

mod env;
mod pool;
mod recover;
mod token_bucket;

pub use env::get_module_name;
pub use pool::{Pool, PoolStats, Task};
pub use recover::{current_thread_id, go_with_recover, spawn_with_recover};
pub use token_bucket::TokenBucket;
