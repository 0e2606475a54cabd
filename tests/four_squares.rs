use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rsa_accumulator::{lagrange_four_squares, three_squares, FourSquaresError};

fn assert_sorted_witness(target: &BigUint) {
    let witness = lagrange_four_squares(target).expect("positive input");
    assert!(witness.verify(target), "target {target}");
    let values = witness.values();
    for pair in values.windows(2) {
        assert!(pair[0] >= pair[1], "unsorted witness for {target}");
    }
}

#[test]
fn nine_has_a_verified_witness() {
    assert_sorted_witness(&BigUint::from(9u8));
}

#[test]
fn fifteen_has_a_verified_witness() {
    // Common result is (3, 2, 1, 1); any tuple with Σwᵢ² = 15 is accepted.
    assert_sorted_witness(&BigUint::from(15u8));
}

#[test]
fn one_million_three_has_a_verified_witness() {
    assert_sorted_witness(&BigUint::from(1_000_003u64));
}

#[test]
fn random_odd_targets_verify() {
    let mut rng = StdRng::seed_from_u64(0xf0f0);
    for bits in [12usize, 20, 28, 40] {
        for _ in 0..4 {
            let target = rng.gen_biguint(bits) | BigUint::one() | (BigUint::one() << bits);
            assert_sorted_witness(&target);
        }
    }
}

#[test]
fn even_targets_lift_through_the_twos() {
    // N = 2^e · n exercises the (1 + i)^e lift for every parity of e.
    for (exponent, odd) in [(1u32, 4_095u64), (2, 99_991), (5, 10_001), (9, 15)] {
        let target = BigUint::from(odd) << exponent as usize;
        assert_sorted_witness(&target);
    }
}

#[test]
fn zero_is_invalid_input() {
    assert!(matches!(
        lagrange_four_squares(&BigUint::from(0u8)),
        Err(FourSquaresError::InvalidInput(_))
    ));
}

#[test]
fn three_square_specialization_verifies() {
    for n in [9u64, 1_000_001, 4 * 9 * 8 + 1] {
        let target = BigUint::from(n);
        let witness = three_squares(&target).expect("n ≡ 1 (mod 4)");
        let sum: BigUint = witness.iter().map(|w| w * w).sum();
        assert_eq!(sum, target, "n = {n}");
    }
}
