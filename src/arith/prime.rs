use num_bigint::prime::probably_prime;
use num_bigint::{BigUint, RandPrime};
use num_traits::{One, ToPrimitive};
use rand::rngs::OsRng;

/// Miller–Rabin rounds applied when validating safe-prime candidates.
pub const SAFE_PRIME_ROUNDS: usize = 64;

/// Small primes used by the combined sieve. A candidate `p'` surviving the
/// sieve cannot produce `2p' + 1` divisible by any of them.
const SIEVE_PRIMES: [u64; 11] = [3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Primality gate: `rounds` Miller–Rabin iterations combined with one
/// Baillie–PSW (Lucas) stage, mirroring Go's `ProbablyPrime` contract.
pub fn is_probable_prime(candidate: &BigUint, rounds: usize) -> bool {
    probably_prime(candidate, rounds)
}

/// Combined sieve from "Safe Prime Generation with a Combined Sieve".
///
/// For each small prime `ρ`, rejects `candidate ≡ (ρ−1)/2 (mod ρ)`, which is
/// exactly the class for which `2·candidate + 1 ≡ 0 (mod ρ)`. How far the
/// sieve runs is experimental; primes up to 37 discard the bulk of doomed
/// candidates before any Miller–Rabin work happens.
pub fn safe_prime_sieve(candidate: &BigUint) -> bool {
    for rho in SIEVE_PRIMES {
        let residue = (candidate % rho).to_u64().unwrap_or(0);
        if residue == (rho - 1) / 2 {
            return false;
        }
    }
    true
}

/// Generates a safe prime `p = 2p' + 1` with `bits` bits, `p'` prime.
///
/// Draws `(bits−1)`-bit primes from the OS RNG, runs them through the
/// combined sieve and a confirmation primality gate, then tests the doubled
/// candidate. An unavailable OS RNG aborts the process.
pub fn gen_safe_prime(bits: usize) -> BigUint {
    assert!(bits >= 8, "safe prime bit length too small");
    let mut rng = OsRng;
    loop {
        let half: BigUint = rng.gen_prime(bits - 1);
        if !safe_prime_sieve(&half) {
            continue;
        }
        if !is_probable_prime(&half, SAFE_PRIME_ROUNDS) {
            continue;
        }
        let candidate = (&half << 1usize) | BigUint::one();
        if is_probable_prime(&candidate, SAFE_PRIME_ROUNDS) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_integer::Integer;

    #[test]
    fn sieve_rejects_doomed_classes() {
        // 2·4 + 1 = 9 is divisible by 3, and 4 ≡ 1 ≡ (3−1)/2 (mod 3).
        assert!(!safe_prime_sieve(&BigUint::from(4u8)));
        // 5 gives 11, clean across the whole sieve.
        assert!(safe_prime_sieve(&BigUint::from(5u8)));
    }

    #[test]
    fn gen_safe_prime_structure_ok() {
        let p = gen_safe_prime(48);
        assert_eq!(p.bits(), 48);
        assert!(is_probable_prime(&p, 40));
        let half: BigUint = (&p - BigUint::one()) >> 1usize;
        assert!(is_probable_prime(&half, 40));
        assert!(half.is_odd());
    }
}
