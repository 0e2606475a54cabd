//! Exact big-integer multiplication through a radix-2 NTT.
//!
//! Operands are split into 16-bit limbs and convolved over the 64-bit
//! Goldilocks prime `p = 2^64 − 2^32 + 1`, whose multiplicative group has
//! two-adicity 32. Convolution coefficients are bounded by
//! `n · (2^16 − 1)^2 < p` for every domain size `n ≤ 2^32` this module can
//! build, so the reduced coefficients are the exact integer coefficients
//! and carry propagation recovers the product with no rounding step.

use num_bigint::BigUint;

/// Goldilocks prime `2^64 − 2^32 + 1`.
const MODULUS: u64 = 0xffff_ffff_0000_0001;

/// Generator of the full multiplicative group of the Goldilocks field.
const GENERATOR: u64 = 7;

/// `2^32` divides `MODULUS − 1`.
const TWO_ADICITY: u32 = 32;

/// Limb width used for the integer-to-coefficient split.
const LIMB_BITS: usize = 16;

fn add_mod(a: u64, b: u64) -> u64 {
    let (sum, overflow) = a.overflowing_add(b);
    if overflow || sum >= MODULUS {
        sum.wrapping_sub(MODULUS)
    } else {
        sum
    }
}

fn sub_mod(a: u64, b: u64) -> u64 {
    if a >= b {
        a - b
    } else {
        a.wrapping_sub(b).wrapping_add(MODULUS)
    }
}

fn mul_mod(a: u64, b: u64) -> u64 {
    ((a as u128 * b as u128) % MODULUS as u128) as u64
}

fn pow_mod(mut base: u64, mut exp: u64) -> u64 {
    let mut result = 1u64;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base);
        }
        base = mul_mod(base, base);
        exp >>= 1;
    }
    result
}

fn inv_mod(value: u64) -> u64 {
    pow_mod(value, MODULUS - 2)
}

/// Primitive `2^log2_size`-th root of unity.
fn root_of_unity(log2_size: u32) -> u64 {
    debug_assert!(log2_size <= TWO_ADICITY);
    pow_mod(GENERATOR, (MODULUS - 1) >> log2_size)
}

/// In-place iterative Cooley–Tukey transform over the Goldilocks field.
fn ntt(values: &mut [u64], invert: bool) {
    let n = values.len();
    debug_assert!(n.is_power_of_two());

    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j |= bit;
        if i < j {
            values.swap(i, j);
        }
    }

    let mut len = 2usize;
    while len <= n {
        let root = root_of_unity(len.trailing_zeros());
        let step = if invert { inv_mod(root) } else { root };
        for start in (0..n).step_by(len) {
            let mut twiddle = 1u64;
            for offset in 0..len / 2 {
                let even = values[start + offset];
                let odd = mul_mod(values[start + offset + len / 2], twiddle);
                values[start + offset] = add_mod(even, odd);
                values[start + offset + len / 2] = sub_mod(even, odd);
                twiddle = mul_mod(twiddle, step);
            }
        }
        len <<= 1;
    }

    if invert {
        let scale = inv_mod(n as u64);
        for value in values.iter_mut() {
            *value = mul_mod(*value, scale);
        }
    }
}

fn to_limbs(value: &BigUint) -> Vec<u64> {
    let bytes = value.to_bytes_le();
    bytes
        .chunks(LIMB_BITS / 8)
        .map(|chunk| {
            let mut limb = 0u64;
            for (idx, byte) in chunk.iter().enumerate() {
                limb |= (*byte as u64) << (8 * idx);
            }
            limb
        })
        .collect()
}

fn from_limbs(limbs: &[u64]) -> BigUint {
    let mut bytes = Vec::with_capacity(limbs.len() * (LIMB_BITS / 8) + 8);
    let mut carry: u128 = 0;
    for &limb in limbs {
        carry += limb as u128;
        bytes.push((carry & 0xff) as u8);
        bytes.push(((carry >> 8) & 0xff) as u8);
        carry >>= LIMB_BITS;
    }
    while carry > 0 {
        bytes.push((carry & 0xff) as u8);
        carry >>= 8;
    }
    BigUint::from_bytes_le(&bytes)
}

/// Multiplies two non-negative integers by limb convolution over the NTT
/// domain. Exact for every size the two-adicity admits.
pub(crate) fn mul_ntt(a: &BigUint, b: &BigUint) -> BigUint {
    use num_traits::Zero;
    if a.is_zero() || b.is_zero() {
        return BigUint::zero();
    }

    let a_limbs = to_limbs(a);
    let b_limbs = to_limbs(b);
    let result_len = a_limbs.len() + b_limbs.len();
    let domain = result_len.next_power_of_two();
    assert!(
        domain <= 1usize << TWO_ADICITY,
        "operands exceed the NTT domain"
    );

    let mut lhs = a_limbs;
    lhs.resize(domain, 0);
    let mut rhs = b_limbs;
    rhs.resize(domain, 0);

    ntt(&mut lhs, false);
    ntt(&mut rhs, false);
    for (left, right) in lhs.iter_mut().zip(rhs.iter()) {
        *left = mul_mod(*left, *right);
    }
    ntt(&mut lhs, true);

    from_limbs(&lhs[..result_len.min(lhs.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::RandBigInt;
    use num_traits::{One, Zero};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn ntt_roundtrip_ok() {
        let mut values: Vec<u64> = (0..16).map(|v| v * 7 + 3).collect();
        let original = values.clone();
        ntt(&mut values, false);
        ntt(&mut values, true);
        assert_eq!(values, original);
    }

    #[test]
    fn mul_ntt_matches_schoolbook_small() {
        let a = BigUint::from(0xdead_beefu64);
        let b = BigUint::from(0x1234_5678_9abcu64);
        assert_eq!(mul_ntt(&a, &b), &a * &b);
    }

    #[test]
    fn mul_ntt_matches_schoolbook_random() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for bits in [1_000usize, 4_097, 20_000, 65_536] {
            let a = rng.gen_biguint(bits);
            let b = rng.gen_biguint(bits / 2 + 1);
            assert_eq!(mul_ntt(&a, &b), &a * &b, "bits = {bits}");
        }
    }

    #[test]
    fn mul_ntt_carry_chain_ok() {
        // All-ones operands maximise every convolution coefficient.
        let a = (BigUint::one() << 8_192usize) - BigUint::one();
        let b = (BigUint::one() << 4_096usize) - BigUint::one();
        assert_eq!(mul_ntt(&a, &b), &a * &b);
    }

    #[test]
    fn mul_ntt_zero_and_one_ok() {
        let a = BigUint::from(12_345u64);
        assert!(mul_ntt(&a, &BigUint::zero()).is_zero());
        assert_eq!(mul_ntt(&a, &BigUint::one()), a);
    }
}
