//! # glossa-pool
//!
//! Runs recognition requests on a small, fixed pool of expensive backend
//! workers.
//!
//! - **[`backend`]** -- the [`RecognitionBackend`] trait each worker implements
//! - **[`pool`]** -- slot ownership, FIFO admission, lease-based release
//! - **[`dispatcher`]** -- [`WorkerPoolDispatcher`], the request entry point

pub mod backend;
pub mod dispatcher;
pub mod pool;
mod slot;

pub use backend::RecognitionBackend;
pub use dispatcher::{DispatcherStats, WorkerPoolDispatcher};
pub use pool::{Lease, PoolStats, Selection, WorkerPool};
pub use slot::SlotStats;
