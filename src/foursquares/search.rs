//! Randomized trial search for the denouement seed.
//!
//! A trial draws `k'` from `[0, n^5/2)`, forms the candidate
//! `p = M·n·(2k' + 1) − 1` and a random `u ∈ [1, p−1]`, and tests whether
//! `s = u^{(p−1)/4} mod p` satisfies `s² ≡ −1 (mod p)`.
//!
//! With parallelism enabled the trial range is sharded across the worker
//! budget and the workers race: the first success fills a mutexed result
//! slot and raises the shared done flag, which every worker polls at the
//! top of each trial, so siblings stop after at most one extra trial and a
//! late success is simply dropped. With the budget pinned to one worker
//! the same trial loop runs inline on the caller's thread over the full
//! range.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::thread;

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::rngs::OsRng;

use crate::utils::{parallelism_enabled, worker_budget};

/// Searches for `(s, p)` with `s² ≡ −1 (mod p)` for `p = M·n·k − 1`.
///
/// `n` must be odd and at least nine. Never gives up: the candidates are
/// heuristically prime with constant density, so a success arrives after an
/// expected `O(log n)` trials per worker.
pub(super) fn random_trials(n: &BigUint, prime_product: &BigUint) -> (BigUint, BigUint) {
    // Shard bound n^5 / 2.
    let n_squared = n * n;
    let bound = (&n_squared * &n_squared * n) >> 1usize;
    let pre_p = prime_product * n;

    if !parallelism_enabled() {
        let mut rng = OsRng;
        let start = BigUint::zero();
        loop {
            if let Some(hit) = trial(&start, &bound, &pre_p, &mut rng) {
                return hit;
            }
        }
    }

    let workers = worker_budget();
    let shard_width = &bound / BigUint::from(workers);
    let done = AtomicBool::new(false);
    let result: Mutex<Option<(BigUint, BigUint)>> = Mutex::new(None);

    thread::scope(|scope| {
        for worker in 0..workers {
            let start = &shard_width * BigUint::from(worker);
            let end = if worker + 1 == workers {
                bound.clone()
            } else {
                &shard_width * BigUint::from(worker + 1)
            };
            let done = &done;
            let result = &result;
            let pre_p = &pre_p;
            scope.spawn(move || {
                find_in_shard(start, end, pre_p, done, result);
            });
        }
    });

    let slot = result.into_inner().expect("search result slot poisoned");
    slot.expect("done flag raised without a delivered result")
}

fn find_in_shard(
    start: BigUint,
    end: BigUint,
    pre_p: &BigUint,
    done: &AtomicBool,
    result: &Mutex<Option<(BigUint, BigUint)>>,
) {
    let mut rng = OsRng;
    let width = &end - &start;
    loop {
        if done.load(Ordering::Acquire) {
            return;
        }
        if let Some(hit) = trial(&start, &width, pre_p, &mut rng) {
            let mut slot = result.lock().expect("search result slot poisoned");
            if slot.is_none() {
                *slot = Some(hit);
            }
            done.store(true, Ordering::Release);
            return;
        }
    }
}

/// One trial over `[start, start + width)`; `Some` iff the drawn candidate
/// accepts.
fn trial(
    start: &BigUint,
    width: &BigUint,
    pre_p: &BigUint,
    rng: &mut OsRng,
) -> Option<(BigUint, BigUint)> {
    // k = 2k' + 1 with k' uniform in the trial range.
    let k_prime = start + rng.gen_biguint_below(width);
    let k = (k_prime << 1usize) | BigUint::one();
    let p = pre_p * &k - BigUint::one();
    let p_minus_1 = &p - BigUint::one();

    // u uniform in [1, p − 1].
    let u = rng.gen_biguint_below(&p_minus_1) + BigUint::one();
    let s = u.modpow(&(&p_minus_1 >> 2usize), &p);

    // Accept iff s² ≡ −1 (mod p).
    if (&s * &s) % &p == p_minus_1 {
        Some((s, p))
    } else {
        None
    }
}
