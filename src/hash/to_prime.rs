use num_bigint::BigUint;
use num_traits::One;

use crate::arith::is_probable_prime;
use crate::hash::sha256_to_int;

/// Miller–Rabin rounds (plus the Baillie–PSW stage) applied per candidate.
/// Heuristic budget; the incremental search retries on rejection, so the
/// function stays total.
pub const HASH_TO_PRIME_ROUNDS: usize = 10;

/// Deterministically maps `bytes` to a probable prime of at least 256 bits.
///
/// The SHA-256 digest seeds the candidate with bit 255 and bit 0 forced, so
/// the search starts odd and above `2^255`; the candidate then advances by
/// two until the primality gate accepts. Identical input always yields the
/// identical prime.
pub fn hash_to_prime(bytes: &[u8]) -> BigUint {
    let mut candidate = sha256_to_int(bytes) | (BigUint::one() << 255usize) | BigUint::one();
    let two = BigUint::from(2u8);
    while !is_probable_prime(&candidate, HASH_TO_PRIME_ROUNDS) {
        candidate += &two;
    }
    candidate
}
