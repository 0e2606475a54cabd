use num_bigint::BigInt;
use proptest::prelude::*;

use super::{GaussianInt, HurwitzInt};

fn gaussian(re: i64, im: i64) -> GaussianInt {
    GaussianInt::new(BigInt::from(re), BigInt::from(im))
}

fn hurwitz(a: i64, b: i64, c: i64, d: i64) -> HurwitzInt {
    HurwitzInt::from_integers(
        BigInt::from(a),
        BigInt::from(b),
        BigInt::from(c),
        BigInt::from(d),
    )
}

proptest! {
    #[test]
    fn gaussian_norm_multiplicative(
        (ar, ai) in (-10_000i64..10_000, -10_000i64..10_000),
        (br, bi) in (-10_000i64..10_000, -10_000i64..10_000),
    ) {
        let a = gaussian(ar, ai);
        let b = gaussian(br, bi);
        prop_assert_eq!(a.mul(&b).norm(), a.norm() * b.norm());
    }

    #[test]
    fn gaussian_div_rem_invariants(
        (ar, ai) in (-100_000i64..100_000, -100_000i64..100_000),
        (br, bi) in (-500i64..500, -500i64..500),
    ) {
        prop_assume!(br != 0 || bi != 0);
        let a = gaussian(ar, ai);
        let b = gaussian(br, bi);
        let (q, r) = a.div_rem(&b);
        prop_assert_eq!(q.mul(&b).add(&r), a);
        prop_assert!(r.norm() * BigInt::from(2) <= b.norm());
    }

    #[test]
    fn hurwitz_norm_multiplicative(
        a in (-300i64..300, -300i64..300, -300i64..300, -300i64..300),
        b in (-300i64..300, -300i64..300, -300i64..300, -300i64..300),
    ) {
        let lhs = hurwitz(a.0, a.1, a.2, a.3);
        let rhs = hurwitz(b.0, b.1, b.2, b.3);
        prop_assert_eq!(lhs.mul(&rhs).norm(), lhs.norm() * rhs.norm());
    }

    #[test]
    fn hurwitz_div_rem_invariants(
        a in (-5_000i64..5_000, -5_000i64..5_000, -5_000i64..5_000, -5_000i64..5_000),
        b in (-40i64..40, -40i64..40, -40i64..40, -40i64..40),
    ) {
        prop_assume!(b != (0, 0, 0, 0));
        let lhs = hurwitz(a.0, a.1, a.2, a.3);
        let rhs = hurwitz(b.0, b.1, b.2, b.3);
        let (q, r) = lhs.div_rem_left(&rhs);
        prop_assert_eq!(q.mul(&rhs).add(&r), lhs);
        prop_assert!(r.norm() < rhs.norm());
    }

    #[test]
    fn gaussian_gcd_divides_both(
        (ar, ai) in (-2_000i64..2_000, -2_000i64..2_000),
        (br, bi) in (-2_000i64..2_000, -2_000i64..2_000),
    ) {
        prop_assume!((ar != 0 || ai != 0) && (br != 0 || bi != 0));
        let a = gaussian(ar, ai);
        let b = gaussian(br, bi);
        let gcd = a.gcd(&b);
        prop_assume!(!gcd.is_zero());
        let (_, ra) = a.div_rem(&gcd);
        let (_, rb) = b.div_rem(&gcd);
        prop_assert!(ra.is_zero());
        prop_assert!(rb.is_zero());
    }
}
