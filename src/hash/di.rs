use num_bigint::BigUint;
use num_traits::One;
use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};

/// Division-intractability offset `Δ = 2^1024`.
///
/// Every DI representative lives in `[Δ, Δ + 2^256)`, so any product of
/// representatives is far from divisible by a fresh one.
pub static DELTA: Lazy<BigUint> = Lazy::new(|| BigUint::one() << 1024usize);

/// External 256-bit digest primitive backing the DI encoding.
///
/// The production system derives the digest from a Poseidon sponge; that
/// implementation lives outside this crate, so the trait only fixes the
/// output width and determinism requirements. [`Sha256InteropBackend`]
/// stands in wherever a Poseidon backend has not been wired.
pub trait DiHashBackend {
    /// Deterministic 32-byte digest of `input`.
    fn digest(&self, input: &[u8]) -> [u8; 32];
}

/// SHA-256 stand-in for the Poseidon digest backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256InteropBackend;

impl DiHashBackend for Sha256InteropBackend {
    fn digest(&self, input: &[u8]) -> [u8; 32] {
        Sha256::digest(input).into()
    }
}

/// Division-intractable representative `Δ + h(x)` with the default backend.
pub fn di_hash(bytes: &[u8]) -> BigUint {
    di_hash_with_backend(&Sha256InteropBackend, bytes)
}

/// Division-intractable representative `Δ + h(x)` with an explicit backend.
pub fn di_hash_with_backend<B: DiHashBackend>(backend: &B, bytes: &[u8]) -> BigUint {
    let digest = backend.digest(bytes);
    &*DELTA + BigUint::from_bytes_be(&digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn di_hash_offset_ok() {
        let value = di_hash(b"hello");
        assert!(value >= *DELTA);
        assert!(value.bits() == 1025);
        assert!(&value - &*DELTA < (BigUint::one() << 256usize));
    }

    #[test]
    fn di_hash_deterministic_ok() {
        assert_eq!(di_hash(b"item"), di_hash(b"item"));
        assert_ne!(di_hash(b"item"), di_hash(b"item2"));
    }
}
