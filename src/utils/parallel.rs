//! Worker budgeting for the crate's parallel fan-outs.
//!
//! Three kinds of work split across threads here: the product engine forks
//! a task tree over balanced halves, the precompute table shards exponent
//! digits across scoped workers, and the four-square search races trial
//! workers against a shared done flag. All of them size their fan-out from
//! [`worker_budget`] and stand down when [`parallelism_enabled`] is false,
//! so tests can pin any entry point to a deterministic single-threaded
//! execution through the [`set_parallelism`] guard.

#[cfg(feature = "parallel")]
use std::num::NonZeroUsize;
use std::ops::Range;
#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

/// Runtime cap on the worker budget. Zero means "match the machine"; one
/// pins every parallel entry point to sequential execution.
#[cfg(feature = "parallel")]
static WORKER_CAP: AtomicUsize = AtomicUsize::new(0);

/// Number of workers a fan-out may use right now.
///
/// Applies the runtime cap to the machine's parallelism and collapses to
/// one when the `parallel` feature is compiled out.
pub fn worker_budget() -> usize {
    #[cfg(feature = "parallel")]
    {
        let cores = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        match WORKER_CAP.load(Ordering::SeqCst) {
            0 => cores,
            cap => cap.min(cores),
        }
    }
    #[cfg(not(feature = "parallel"))]
    {
        1
    }
}

/// Whether fan-outs may use more than one worker.
pub fn parallelism_enabled() -> bool {
    worker_budget() > 1
}

/// Caps the worker budget at one, or lifts the cap again, until the
/// returned guard drops.
pub fn set_parallelism(enabled: bool) -> ParallelismGuard {
    #[cfg(feature = "parallel")]
    {
        let cap = if enabled { 0 } else { 1 };
        let previous = WORKER_CAP.swap(cap, Ordering::SeqCst);
        ParallelismGuard { previous }
    }
    #[cfg(not(feature = "parallel"))]
    {
        let _ = enabled;
        ParallelismGuard {}
    }
}

/// Guard restoring the previous worker cap on drop.
pub struct ParallelismGuard {
    #[cfg(feature = "parallel")]
    previous: usize,
}

#[cfg(feature = "parallel")]
impl Drop for ParallelismGuard {
    fn drop(&mut self) {
        WORKER_CAP.store(self.previous, Ordering::SeqCst);
    }
}

#[cfg(not(feature = "parallel"))]
impl Drop for ParallelismGuard {
    fn drop(&mut self) {}
}

/// Contiguous index shards splitting `count` fixed-cost items (exponent
/// digits, mostly) across `workers` threads.
///
/// Shard sizes differ by at most one, with the leading shards absorbing
/// the remainder, so a worker never waits on a sibling that holds more
/// than one extra digit product.
pub fn shard_ranges(count: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.clamp(1, count.max(1));
    let base = count / workers;
    let remainder = count % workers;
    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;
    for index in 0..workers {
        let len = base + usize::from(index < remainder);
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}

/// Chunk size handed to rayon when mapping a batch of heavyweight items
/// (representative encodings: each one is a hash-to-prime search or a DI
/// digest).
///
/// A single item already amortises the steal, so small batches stay
/// unchunked; large batches are grouped so scheduling overhead stays
/// sublinear in the batch size while every worker still sees several
/// steals' worth of slack.
pub fn batch_chunk_size(total_items: usize) -> usize {
    let per_worker = total_items / (worker_budget().max(1) * 8);
    per_worker.clamp(1, 64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shard_ranges_balance_and_cover() {
        let ranges = shard_ranges(10, 3);
        assert_eq!(ranges, vec![0..4, 4..7, 7..10]);
        let total: usize = ranges.iter().map(|range| range.len()).sum();
        assert_eq!(total, 10);
    }

    #[test]
    fn shard_ranges_never_outnumber_items() {
        assert_eq!(shard_ranges(2, 8), vec![0..1, 1..2]);
        assert_eq!(shard_ranges(0, 4), vec![0..0]);
        assert_eq!(shard_ranges(5, 1), vec![0..5]);
    }

    #[test]
    fn batch_chunks_stay_positive() {
        assert_eq!(batch_chunk_size(0), 1);
        assert_eq!(batch_chunk_size(3), 1);
        let large = batch_chunk_size(1_000_000);
        assert!((1..=64).contains(&large));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn guard_restores_previous_cap() {
        let outer = set_parallelism(false);
        assert_eq!(worker_budget(), 1);
        assert!(!parallelism_enabled());
        {
            let _inner = set_parallelism(true);
            assert!(worker_budget() >= 1);
        }
        assert_eq!(worker_budget(), 1);
        drop(outer);
    }
}
