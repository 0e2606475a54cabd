//! Three-square decomposition for integers `≡ 1 (mod 4)`.
//!
//! Specialization used by the compact positivity argument, which decomposes
//! `4(b − x)(x − a) + 1` instead of a full four-square witness. Randomized
//! Rabin–Shallit shape: draw an even `w ≤ √n`, hope `n − w²` is one or a
//! prime `p ≡ 1 (mod 4)`, and split that prime into two squares with the
//! same Gaussian gcd used by the four-square denouement.

use num_bigint::{BigInt, BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use rand::rngs::OsRng;

use crate::arith::is_probable_prime;
use crate::complex::GaussianInt;

use super::FourSquaresError;

/// Primality rounds for the `n − w²` candidates; failures only cost a
/// retry, so the budget stays small.
const CANDIDATE_PRIME_ROUNDS: usize = 20;

/// Attempts at finding `s² ≡ −1 (mod p)` before discarding the candidate.
const ROOT_ATTEMPTS: usize = 64;

/// Decomposes `n ≡ 1 (mod 4)` into three squares, sorted descending.
///
/// Returns `DecompositionFailed` if the randomized search exhausts its
/// budget, which is proportional to the bit length of `n`; retrying is
/// sound and succeeds with overwhelming probability.
pub fn three_squares(n: &BigUint) -> Result<[BigUint; 3], FourSquaresError> {
    if n.is_zero() {
        return Err(FourSquaresError::InvalidInput("input must be positive"));
    }
    if (n % 4u64).to_u64() != Some(1) {
        return Err(FourSquaresError::InvalidInput("input must be 1 mod 4"));
    }
    if n.is_one() {
        return Ok(sorted([BigUint::one(), BigUint::zero(), BigUint::zero()]));
    }

    let mut rng = OsRng;
    let root = n.sqrt();
    if &root * &root == *n {
        return Ok(sorted([root, BigUint::zero(), BigUint::zero()]));
    }

    let sqrt_bound = &root + BigUint::one();
    let attempts = 40 * (n.bits() as u32 + 1);
    for _ in 0..attempts {
        // n ≡ 1 (mod 4) needs w even for n − w² ≡ 1 (mod 4).
        let mut w = rng.gen_biguint_below(&sqrt_bound);
        if w.is_odd() {
            w -= BigUint::one();
        }
        let square = &w * &w;
        if square > *n {
            continue;
        }
        let p = n - square;
        if p.is_one() {
            return Ok(sorted([w, BigUint::one(), BigUint::zero()]));
        }
        // Residual perfect square: n = w² + m², done without a prime split.
        let residual_root = p.sqrt();
        if &residual_root * &residual_root == p {
            return Ok(sorted([w, residual_root, BigUint::zero()]));
        }
        if !is_probable_prime(&p, CANDIDATE_PRIME_ROUNDS) {
            continue;
        }
        if let Some((a, b)) = split_two_squares(&p, &mut rng) {
            return Ok(sorted([w, a, b]));
        }
    }
    Err(FourSquaresError::DecompositionFailed { attempts })
}

/// Splits a prime `p ≡ 1 (mod 4)` as `a² + b²` via `gcd(s + i, p)`.
fn split_two_squares(p: &BigUint, rng: &mut OsRng) -> Option<(BigUint, BigUint)> {
    let p_minus_1 = p - BigUint::one();
    let quarter = &p_minus_1 >> 2usize;
    for _ in 0..ROOT_ATTEMPTS {
        let u = rng.gen_biguint_below(&p_minus_1) + BigUint::one();
        let s = u.modpow(&quarter, p);
        if (&s * &s) % p != p_minus_1 {
            continue;
        }
        let gamma = GaussianInt::new(BigInt::from(s), BigInt::one())
            .gcd(&GaussianInt::new(BigInt::from(p.clone()), BigInt::zero()));
        let a = gamma.re.abs().to_biguint()?;
        let b = gamma.im.abs().to_biguint()?;
        if &a * &a + &b * &b == *p {
            return Some((a, b));
        }
    }
    None
}

fn sorted(mut values: [BigUint; 3]) -> [BigUint; 3] {
    values.sort_by(|a, b| b.cmp(a));
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum_of_squares(values: &[BigUint; 3]) -> BigUint {
        values.iter().map(|v| v * v).sum()
    }

    #[test]
    fn decomposes_residue_one_targets() {
        for n in [5u64, 9, 13, 21, 25, 101, 289, 1_000_001, 123_457] {
            let target = BigUint::from(n);
            let witness = three_squares(&target).expect("n ≡ 1 (mod 4)");
            assert_eq!(sum_of_squares(&witness), target, "n = {n}");
            assert!(witness[0] >= witness[1] && witness[1] >= witness[2]);
        }
    }

    #[test]
    fn rejects_wrong_residue() {
        assert!(matches!(
            three_squares(&BigUint::from(7u8)),
            Err(FourSquaresError::InvalidInput(_))
        ));
        assert!(matches!(
            three_squares(&BigUint::zero()),
            Err(FourSquaresError::InvalidInput(_))
        ));
    }

    #[test]
    fn positivity_relation_shape_ok() {
        // 4(b−x)(x−a) + 1 for a = 3, b = 20, x = 11: 4·9·8 + 1 = 289.
        let target = BigUint::from(289u32);
        let witness = three_squares(&target).expect("relation value is 1 mod 4");
        assert_eq!(sum_of_squares(&witness), target);
    }
}
