//! RSA dynamic accumulator over `QR_N`.
//!
//! An accumulator summarises a set of representatives `{r₁, …, rₙ}` as
//! `A = g^{Πrᵢ} mod N` in a hidden-order group. Membership of `rⱼ` is
//! witnessed by `πⱼ = g^{Π_{i≠j} rᵢ} mod N`, verified by checking
//! `πⱼ^{rⱼ} ≡ A (mod N)`. The modulus comes from a trusted setup over two
//! safe primes; the factors never leave [`TrustedSetup`].
//!
//! Elements are opaque byte strings mapped to big-integer representatives
//! by one of the two [`EncodeType`] encodings. The encoding is part of the
//! accumulator's identity: mixing encodings across accumulate and prove
//! calls produces proofs that never verify.

mod membership;
mod setup;

pub use membership::{
    prove_membership, prove_membership_parallel, prove_membership_precomputed, verify_membership,
};
pub use setup::{trusted_setup, trusted_setup_with_bits, Setup, SetupError, TrustedSetup};

use num_bigint::BigUint;

use crate::hash::{di_hash, hash_to_prime, EncodeType};
use crate::product::product_recursive_fast;

/// Opaque application datum accepted by the accumulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    bytes: Vec<u8>,
}

impl Element {
    /// Wraps already encoded bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Returns a view of the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the element and returns its byte payload.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<&[u8]> for Element {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }
}

impl From<&str> for Element {
    fn from(text: &str) -> Self {
        Self::new(text.as_bytes().to_vec())
    }
}

/// Single modular exponentiation `g^x mod N`.
pub fn accumulate(g: &BigUint, x: &BigUint, modulus: &BigUint) -> BigUint {
    g.modpow(x, modulus)
}

/// Accumulates a batch of representatives: `g^{Πrᵢ} mod N`.
///
/// The product is computed outside the group (the exponent is the integer
/// product, not a reduced value) through the balanced fast multiplier, then
/// spent in one exponentiation. Errors on an empty batch.
pub fn accumulate_batch(
    g: &BigUint,
    representatives: &[BigUint],
    modulus: &BigUint,
) -> Result<BigUint, crate::Error> {
    if representatives.is_empty() {
        return Err(crate::Error::InvalidParameter(
            "accumulate_batch requires at least one representative",
        ));
    }
    let exponent = product_recursive_fast(representatives);
    Ok(accumulate(g, &exponent, modulus))
}

/// Maps each element to its big-integer representative under `encoding`.
///
/// Hash-to-prime searches are independent per element, so the mapping fans
/// out across rayon workers when parallelism is active.
pub fn gen_representatives(items: &[Element], encoding: EncodeType) -> Vec<BigUint> {
    let encode = |item: &Element| -> BigUint {
        match encoding {
            EncodeType::HashToPrime => hash_to_prime(item.as_bytes()),
            EncodeType::DiHash => di_hash(item.as_bytes()),
        }
    };

    #[cfg(feature = "parallel")]
    {
        if crate::utils::parallelism_enabled() {
            use rayon::prelude::*;
            let chunk = crate::utils::batch_chunk_size(items.len());
            return items
                .par_iter()
                .with_min_len(chunk)
                .with_max_len(chunk)
                .map(encode)
                .collect();
        }
    }
    items.iter().map(encode).collect()
}
