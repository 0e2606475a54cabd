//! Element encodings for the accumulator.
//!
//! Application data enters the accumulator as a big-integer representative
//! produced by one of two encodings: [`hash_to_prime`], which derives a
//! 256-bit prime, or [`di_hash`], which offsets a 256-bit digest by `2^1024`
//! to obtain a division-intractable value. The encoding is selected through
//! the typed [`EncodeType`] parameter; callers must use the same variant for
//! accumulation and proving.

mod di;
mod to_prime;

pub use di::{di_hash, di_hash_with_backend, DiHashBackend, Sha256InteropBackend, DELTA};
pub use to_prime::{hash_to_prime, HASH_TO_PRIME_ROUNDS};

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Representative encoding. Pick one per accumulator lifetime and use it for
/// every accumulate and prove call against that accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncodeType {
    /// 256-bit prime representative via SHA-256 seeding and incremental
    /// search.
    HashToPrime,
    /// Division-intractable representative `2^1024 + h(x)` with `h` a
    /// 256-bit digest.
    DiHash,
}

/// Interprets the SHA-256 digest of `bytes` as a big-endian integer.
pub fn sha256_to_int(bytes: &[u8]) -> BigUint {
    let digest = Sha256::digest(bytes);
    BigUint::from_bytes_be(&digest)
}
