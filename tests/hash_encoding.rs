use num_bigint::BigUint;
use num_traits::One;
use rsa_accumulator::arith::is_probable_prime;
use rsa_accumulator::hash::DELTA;
use rsa_accumulator::{di_hash, hash_to_prime};

#[test]
fn hash_to_prime_hello_is_deterministic_and_prime() {
    let first = hash_to_prime(b"hello");
    let second = hash_to_prime(b"hello");
    assert_eq!(first, second);
    assert!(first >= BigUint::one() << 255usize);
    assert!(is_probable_prime(&first, 40));
}

#[test]
fn di_hash_carries_the_division_intractability_offset() {
    let value = di_hash(b"hello");
    assert!(value >= *DELTA);
    let digest_part = &value - &*DELTA;
    assert!(digest_part.bits() <= 256);
    assert_eq!(value, di_hash(b"hello"));
}
