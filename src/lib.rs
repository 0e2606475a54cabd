#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

//! RSA dynamic accumulator over a hidden-order group, together with the two
//! number-theoretic engines that make it fast in batch settings.
//!
//! The crate is organised around three load-bearing subsystems:
//!
//! * [`accumulator`]: trusted setup over `QR_N` for `N = pq` a product of
//!   safe primes, element encoding into big-integer representatives
//!   ([`hash::hash_to_prime`] or the division-intractable [`hash::di_hash`]),
//!   batch accumulation and divide-and-conquer membership proofs.
//! * [`precompute`]: a windowed base-power table turning `g^x mod N` for
//!   very wide `x` into one table lookup and one modular multiplication per
//!   chunk, sharded across worker threads.
//! * [`foursquares`]: randomized Lagrange four-square decomposition
//!   (Pollack–Treviño) backed by the Gaussian/Hurwitz arithmetic in
//!   [`complex`], which in turn feeds the [`rangeproof`] Σ-protocol.
//!
//! Large set products are computed by the [`product`] engine; shared
//! big-integer helpers (Jacobi symbol, primality gate, safe-prime sieve)
//! live in [`arith`]. All randomized routines draw from the operating
//! system RNG; an unavailable RNG is a fatal condition and aborts.

pub mod accumulator;
pub mod arith;
pub mod complex;
pub mod foursquares;
pub mod hash;
pub mod precompute;
pub mod product;
pub mod rangeproof;
pub mod utils;

use core::fmt;

pub use accumulator::{
    accumulate, accumulate_batch, gen_representatives, prove_membership,
    prove_membership_parallel, prove_membership_precomputed, trusted_setup,
    trusted_setup_with_bits, verify_membership, Element, Setup, SetupError, TrustedSetup,
};
pub use foursquares::{lagrange_four_squares, three_squares, FourSquare, FourSquaresError};
pub use hash::{di_hash, hash_to_prime, EncodeType};
pub use precompute::{PrecomputeTable, TableError};
pub use product::{product, product_parallel, product_recursive, product_recursive_fast};
pub use rangeproof::{
    NonNegativeProof, PublicParameters, RangeProof, RangeProofError, RangeProver, RangeVerifier,
};

/// Result type used by the top-level accumulator entry points.
pub type AccResult<T> = core::result::Result<T, Error>;

/// Crate-level error enumeration aggregating the per-subsystem failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A caller-supplied parameter failed validation.
    InvalidParameter(&'static str),
    /// Trusted setup failed.
    Setup(SetupError),
    /// Precompute table construction or evaluation failed.
    Table(TableError),
    /// Four-square decomposition failed.
    FourSquares(FourSquaresError),
    /// Range proof generation or verification failed.
    RangeProof(RangeProofError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter(reason) => write!(f, "invalid parameter: {reason}"),
            Error::Setup(err) => write!(f, "setup failure: {err}"),
            Error::Table(err) => write!(f, "precompute table failure: {err}"),
            Error::FourSquares(err) => write!(f, "four-square failure: {err}"),
            Error::RangeProof(err) => write!(f, "range proof failure: {err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<SetupError> for Error {
    fn from(err: SetupError) -> Self {
        Error::Setup(err)
    }
}

impl From<TableError> for Error {
    fn from(err: TableError) -> Self {
        Error::Table(err)
    }
}

impl From<FourSquaresError> for Error {
    fn from(err: FourSquaresError) -> Self {
        Error::FourSquares(err)
    }
}

impl From<RangeProofError> for Error {
    fn from(err: RangeProofError) -> Self {
        Error::RangeProof(err)
    }
}
