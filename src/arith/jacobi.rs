use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

/// Jacobi symbol `(a/n)` for odd `n > 0`.
///
/// Binary algorithm: strip factors of two from the numerator flipping the
/// sign according to `n mod 8`, apply quadratic reciprocity, reduce, repeat.
/// Returns `0` when `gcd(a, n) != 1`.
pub fn jacobi(a: &BigUint, n: &BigUint) -> i32 {
    debug_assert!(n.is_odd(), "jacobi symbol requires an odd denominator");
    let mut a = a % n;
    let mut n = n.clone();
    let mut result = 1i32;

    while !a.is_zero() {
        while a.is_even() {
            a >>= 1usize;
            let residue = (&n % 8u64).to_u64().unwrap_or(0);
            if residue == 3 || residue == 5 {
                result = -result;
            }
        }
        core::mem::swap(&mut a, &mut n);
        if (&a % 4u64).to_u64().unwrap_or(0) == 3 && (&n % 4u64).to_u64().unwrap_or(0) == 3 {
            result = -result;
        }
        a = a % &n;
    }

    if n.is_one() {
        result
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn j(a: u64, n: u64) -> i32 {
        jacobi(&BigUint::from(a), &BigUint::from(n))
    }

    #[test]
    fn jacobi_small_table_ok() {
        // Values straight from the Legendre symbol for prime denominators.
        assert_eq!(j(1, 3), 1);
        assert_eq!(j(2, 3), -1);
        assert_eq!(j(2, 7), 1);
        assert_eq!(j(3, 7), -1);
        assert_eq!(j(5, 11), 1);
        assert_eq!(j(6, 11), -1);
        assert_eq!(j(1001, 9907), -1);
        assert_eq!(j(19, 45), 1);
        assert_eq!(j(8, 21), -1);
        assert_eq!(j(5, 21), 1);
    }

    #[test]
    fn jacobi_shared_factor_is_zero() {
        assert_eq!(j(21, 7), 0);
        assert_eq!(j(12, 9), 0);
    }

    #[test]
    fn jacobi_squares_are_residues() {
        let p = BigUint::from(1_000_003u64);
        for base in [2u64, 3, 5, 123_456] {
            let square = (BigUint::from(base) * BigUint::from(base)) % &p;
            assert_eq!(jacobi(&square, &p), 1);
        }
    }
}
