//! Products of large integer sets.
//!
//! Accumulator exponents are products of hundreds of thousands of 256- to
//! 1280-bit representatives. A left fold makes every multiplication lopsided
//! (one huge operand, one small), which is the worst case for sub-quadratic
//! multiplication; the recursive variants keep the operands balanced, and
//! the fast variant switches to the NTT multiplier once both operands are
//! wide enough to amortise the transforms. All variants agree on every
//! input because integer multiplication is commutative and associative, so
//! any balanced partition is equivalent.

mod ntt;

use num_bigint::BigUint;
use num_traits::One;

/// Operand width, in bits, above which the NTT multiplier beats the
/// schoolbook/Karatsuba path.
const NTT_THRESHOLD_BITS: usize = 10_240;

/// Multiplies two integers, routing wide operands through the NTT.
fn mul_fast(a: &BigUint, b: &BigUint) -> BigUint {
    if a.bits() >= NTT_THRESHOLD_BITS && b.bits() >= NTT_THRESHOLD_BITS {
        ntt::mul_ntt(a, b)
    } else {
        a * b
    }
}

/// Left-fold product of the set. Returns one for an empty slice.
pub fn product(values: &[BigUint]) -> BigUint {
    let mut result = BigUint::one();
    for value in values {
        result *= value;
    }
    result
}

/// Divide-and-conquer product over balanced halves.
pub fn product_recursive(values: &[BigUint]) -> BigUint {
    if values.len() <= 2 {
        return product(values);
    }
    let (low, high) = values.split_at(values.len() / 2);
    product_recursive(low) * product_recursive(high)
}

/// Divide-and-conquer product switching to the NTT multiplier above the
/// crossover width.
pub fn product_recursive_fast(values: &[BigUint]) -> BigUint {
    if values.len() <= 2 {
        return product(values);
    }
    let (low, high) = values.split_at(values.len() / 2);
    mul_fast(
        &product_recursive_fast(low),
        &product_recursive_fast(high),
    )
}

/// Parallel divide-and-conquer product forking at most `2^limit` tasks.
///
/// Below the fork budget, or when parallelism is disabled at runtime, the
/// computation falls through to [`product_recursive_fast`].
pub fn product_parallel(values: &[BigUint], limit: u32) -> BigUint {
    #[cfg(feature = "parallel")]
    {
        if crate::utils::parallelism_enabled() {
            return product_parallel_inner(values, limit);
        }
    }
    let _ = limit;
    product_recursive_fast(values)
}

#[cfg(feature = "parallel")]
fn product_parallel_inner(values: &[BigUint], limit: u32) -> BigUint {
    if limit == 0 || values.len() <= 2 {
        return product_recursive_fast(values);
    }
    let (low, high) = values.split_at(values.len() / 2);
    let (left, right) = rayon::join(
        || product_parallel_inner(low, limit - 1),
        || product_parallel_inner(high, limit - 1),
    );
    mul_fast(&left, &right)
}
