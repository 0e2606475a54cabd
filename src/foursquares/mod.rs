//! Lagrange four-square decomposition.
//!
//! Every non-negative integer is a sum of four squares; this module finds a
//! witness with the randomized Pollack–Treviño procedure:
//!
//! 1. strip factors of two, leaving an odd `n`;
//! 2. answer `n ≤ 8` from a precomputed table of Hurwitz GCRDs;
//! 3. otherwise search in parallel for `(s, p)` with `p = M·n·k − 1`
//!    (`M` the product of primes up to `log₂ n`) and `s² ≡ −1 (mod p)`;
//! 4. split `p = A² + B²` via `gcd(s + i, p)` in `ℤ[i]`, then take the
//!    Hurwitz `gcrd(A + Bi + j, n)`, whose norm is `n`;
//! 5. lift back through the stripped twos by multiplying with `(1 + i)^e`.
//!
//! The result is always re-verified against the input before it is
//! returned; a mismatch (possible when the heuristically chosen `p` was
//! composite) restarts the randomized search.

mod search;
mod three;

pub use three::three_squares;

use core::fmt;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::complex::{GaussianInt, HurwitzInt};

/// Precomputed Hurwitz GCRDs for inputs up to eight. Only odd indices are
/// reachable after the twos are stripped; the even entries keep the table
/// addressable by the raw value.
static SMALL_GCRDS: Lazy<[HurwitzInt; 9]> = Lazy::new(|| {
    let entries: [[i64; 4]; 9] = [
        [0, 0, 0, 0],
        [1, 0, 0, 0],
        [1, 1, 0, 0],
        [1, 1, 1, 0],
        [2, 0, 0, 0],
        [2, 1, 0, 0],
        [2, 1, 1, 0],
        [2, 1, 1, 1],
        [2, 2, 0, 0],
    ];
    entries.map(|[a, b, c, d]| {
        HurwitzInt::from_integers(
            BigInt::from(a),
            BigInt::from(b),
            BigInt::from(c),
            BigInt::from(d),
        )
    })
});

/// Errors surfaced by the decomposition routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FourSquaresError {
    /// The input is outside the routine's domain.
    InvalidInput(&'static str),
    /// The randomized three-square search exhausted its attempt budget.
    DecompositionFailed { attempts: u32 },
}

impl fmt::Display for FourSquaresError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FourSquaresError::InvalidInput(reason) => write!(f, "invalid input: {reason}"),
            FourSquaresError::DecompositionFailed { attempts } => {
                write!(f, "decomposition failed after {attempts} attempts")
            }
        }
    }
}

impl std::error::Error for FourSquaresError {}

/// Four-square witness `(w₁, w₂, w₃, w₄)` with `Σwᵢ² = n`, sorted in
/// descending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FourSquare {
    w: [BigUint; 4],
}

impl FourSquare {
    /// Builds the witness from signed quaternion components: absolute
    /// values, sorted descending.
    fn from_components(components: [BigInt; 4]) -> Self {
        let mut w = components.map(|component| {
            component.abs().to_biguint().unwrap_or_default()
        });
        w.sort_by(|a, b| b.cmp(a));
        Self { w }
    }

    /// The four components, largest first.
    pub fn values(&self) -> &[BigUint; 4] {
        &self.w
    }

    /// Checks `Σwᵢ² = target`.
    pub fn verify(&self, target: &BigUint) -> bool {
        let sum: BigUint = self.w.iter().map(|w| w * w).sum();
        sum == *target
    }
}

impl fmt::Display for FourSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}, {}, {}}}", self.w[0], self.w[1], self.w[2], self.w[3])
    }
}

/// Lagrange four-square decomposition of a positive integer.
///
/// Zero is rejected as an invalid input; every positive integer succeeds,
/// retrying the randomized search internally until the verified witness
/// emerges. Wall-clock time is dominated by the `s² ≡ −1 (mod p)` search,
/// which fans out across the worker budget and runs inline on the calling
/// thread when parallelism is pinned off.
pub fn lagrange_four_squares(n: &BigUint) -> Result<FourSquare, FourSquaresError> {
    if n.is_zero() {
        return Err(FourSquaresError::InvalidInput("input must be positive"));
    }

    // Step A: n = 2^e · odd.
    let mut odd = n.clone();
    let mut twos = 0usize;
    while odd.is_even() {
        odd >>= 1usize;
        twos += 1;
    }

    // Lift factor (1 + i)^e, embedded into the Hurwitz order.
    let one_plus_i = GaussianInt::new(BigInt::from(1), BigInt::from(1));
    let mut tau = GaussianInt::one();
    for _ in 0..twos {
        tau = tau.mul(&one_plus_i);
    }
    let tau = HurwitzInt::from_gaussian(&tau);

    if let Some(index) = odd.to_usize().filter(|&index| index <= 8) {
        let lifted = tau.mul(&SMALL_GCRDS[index]);
        let components = lifted
            .components()
            .ok_or(FourSquaresError::InvalidInput("small-case lift mismatch"))?;
        let witness = FourSquare::from_components(components);
        debug_assert!(witness.verify(n));
        return Ok(witness);
    }

    let prime_product = prime_product(&odd);
    loop {
        // Step D: randomized search for s² ≡ −1 (mod p).
        let (s, p) = search::random_trials(&odd, &prime_product);
        // Step E: denouement.
        let gcrd = denouement(&odd, &s, &p);
        if gcrd.norm() != BigInt::from(odd.clone()) {
            continue;
        }
        // Step F: lift and verify.
        let lifted = tau.mul(&gcrd);
        let Some(components) = lifted.components() else {
            continue;
        };
        let witness = FourSquare::from_components(components);
        if witness.verify(n) {
            return Ok(witness);
        }
    }
}

/// Step C: product `M` of all primes not exceeding `log₂ n`, found by trial
/// division against the primes collected so far. Starts from `{2, 3, 5, 7}`
/// with product 210 and walks odd candidates from nine.
fn prime_product(n: &BigUint) -> BigUint {
    let log2 = (n.bits() - 1) as u64;
    let mut primes: Vec<u64> = vec![2, 3, 5, 7];
    let mut product = BigUint::from(210u32);
    let mut candidate = 9u64;
    while candidate <= log2 {
        if primes.iter().all(|prime| candidate % prime != 0) {
            primes.push(candidate);
            product *= BigUint::from(candidate);
        }
        candidate += 2;
    }
    product
}

/// Step E: `γ = gcd(s + i, p)` splits `p` into `A² + B²`; the Hurwitz
/// `gcrd(A + Bi + j, n)` then carries norm `n`.
fn denouement(n: &BigUint, s: &BigUint, p: &BigUint) -> HurwitzInt {
    let gamma = GaussianInt::new(BigInt::from(s.clone()), BigInt::from(1)).gcd(&GaussianInt::new(
        BigInt::from(p.clone()),
        BigInt::from(0),
    ));
    let target = HurwitzInt::from_integers(gamma.re, gamma.im, BigInt::from(1), BigInt::from(0));
    let modulus = HurwitzInt::from_integers(
        BigInt::from(n.clone()),
        BigInt::from(0),
        BigInt::from(0),
        BigInt::from(0),
    );
    target.gcrd(&modulus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    #[test]
    fn small_table_entries_decompose_their_index() {
        for (index, entry) in SMALL_GCRDS.iter().enumerate() {
            assert_eq!(entry.norm(), BigInt::from(index as u64), "entry {index}");
        }
    }

    #[test]
    fn nine_decomposes_ok() {
        let target = BigUint::from(9u8);
        let witness = lagrange_four_squares(&target).expect("positive input");
        assert!(witness.verify(&target));
        for pair in witness.values().windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn fifteen_decomposes_sorted() {
        let target = BigUint::from(15u8);
        let witness = lagrange_four_squares(&target).expect("positive input");
        assert!(witness.verify(&target));
        let values = witness.values();
        for pair in values.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn small_cases_via_table_ok() {
        for n in 1u64..=8 {
            let target = BigUint::from(n);
            let witness = lagrange_four_squares(&target).expect("positive input");
            assert!(witness.verify(&target), "n = {n}");
        }
    }

    #[test]
    fn power_of_two_lift_ok() {
        for exponent in [1usize, 4, 7] {
            let target = BigUint::one() << exponent;
            let witness = lagrange_four_squares(&target).expect("positive input");
            assert!(witness.verify(&target), "2^{exponent}");
        }
    }

    #[test]
    fn million_range_decomposition_ok() {
        let target = BigUint::from(1_000_003u64);
        let witness = lagrange_four_squares(&target).expect("positive input");
        assert!(witness.verify(&target));
    }

    #[test]
    fn zero_rejected() {
        assert_eq!(
            lagrange_four_squares(&BigUint::zero()),
            Err(FourSquaresError::InvalidInput("input must be positive"))
        );
    }

    #[test]
    fn even_inputs_ok() {
        for n in [12u64, 56, 240, 2_048_010] {
            let target = BigUint::from(n);
            let witness = lagrange_four_squares(&target).expect("positive input");
            assert!(witness.verify(&target), "n = {n}");
        }
    }

    #[test]
    fn prime_product_small_ok() {
        // log2(1000) ≈ 9.97; nine is composite and the sieve skips it, so
        // M stays 210 for inputs below 2^11.
        assert_eq!(prime_product(&BigUint::from(1_000u32)), BigUint::from(210u32));
        // log2(8192) = 13 picks up 11 and 13.
        assert_eq!(
            prime_product(&BigUint::from(8_192u32)),
            BigUint::from(210u32 * 11 * 13)
        );
    }
}
