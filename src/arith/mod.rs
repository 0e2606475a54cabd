//! Big-integer arithmetic adapter.
//!
//! Everything the accumulator stack needs beyond what `num-bigint` ships:
//! the Jacobi symbol, the primality gate (Miller–Rabin rounds combined with
//! one Baillie–PSW stage), combined-sieve safe-prime generation, modular
//! exponentiation with signed exponents, and nearest-integer division for
//! the Gaussian/Hurwitz quotient selection.

mod jacobi;
mod prime;

pub use jacobi::jacobi;
pub use prime::{gen_safe_prime, is_probable_prime, safe_prime_sieve, SAFE_PRIME_ROUNDS};

use num_bigint::{BigInt, BigUint, ModInverse, Sign};
use num_integer::Integer;
use num_traits::Signed;

/// Modular inverse of `value` modulo `modulus`, reduced to `[0, modulus)`.
///
/// Returns `None` when `gcd(value, modulus) != 1`.
pub fn mod_inverse(value: &BigUint, modulus: &BigUint) -> Option<BigUint> {
    let inverse = value.mod_inverse(modulus)?;
    let modulus_signed = BigInt::from_biguint(Sign::Plus, modulus.clone());
    inverse.mod_floor(&modulus_signed).to_biguint()
}

/// Modular exponentiation accepting a signed exponent.
///
/// A negative exponent is evaluated through the modular inverse of the base;
/// `None` signals that no inverse exists. Used by the range-proof verifier,
/// which raises commitments to negated challenges.
pub fn pow_signed(base: &BigUint, exponent: &BigInt, modulus: &BigUint) -> Option<BigUint> {
    if exponent.is_negative() {
        let inverse = mod_inverse(base, modulus)?;
        let magnitude = exponent.abs().to_biguint()?;
        Some(inverse.modpow(&magnitude, modulus))
    } else {
        let magnitude = exponent.to_biguint()?;
        Some(base.modpow(&magnitude, modulus))
    }
}

/// Nearest-integer division `round(numer / denom)` for a positive divisor.
///
/// Ties round towards positive infinity; the absolute error never exceeds
/// one half, which is the bound the Gaussian and Hurwitz division operators
/// rely on for their remainder-norm guarantees.
pub(crate) fn round_div(numer: &BigInt, denom: &BigInt) -> BigInt {
    debug_assert!(denom.is_positive(), "round_div requires a positive divisor");
    let (quotient, remainder) = numer.div_mod_floor(denom);
    if &(&remainder << 1usize) >= denom {
        quotient + 1
    } else {
        quotient
    }
}
