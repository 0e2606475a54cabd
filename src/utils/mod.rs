//! Runtime helpers shared by the parallel code paths.

pub mod parallel;

pub use parallel::{
    batch_chunk_size, parallelism_enabled, set_parallelism, shard_ranges, worker_budget,
    ParallelismGuard,
};
