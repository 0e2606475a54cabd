//! Zero-knowledge positivity and range arguments over the hidden-order
//! group.
//!
//! Variant of Lipmaa's compact argument for positivity as refined by
//! Couteau et al.: to show a committed `x` lies in `[a, b]`, prove that
//! `x − a` and `b − x` are non-negative by exhibiting four-square
//! decompositions behind Pedersen-style commitments `cᵢ = g^{xᵢ}h^{rᵢ}`.
//! The verifier derives the shifted commitments homomorphically from the
//! public bounds, so one commitment `c = g^x h^r` anchors both halves.
//!
//! The Σ-protocol is made non-interactive with a SHA-256 Fiat–Shamir
//! transcript; responses are computed over the integers (the group order is
//! unknown to everyone), which is why the verifier needs signed-exponent
//! exponentiation.

mod transcript;

use core::fmt;

use num_bigint::{BigInt, BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::arith::pow_signed;
use crate::foursquares::{lagrange_four_squares, FourSquaresError};
use transcript::Transcript;

/// Statistical security parameter κ.
pub const SECURITY_PARAM: usize = 128;

/// Bound `B` on the bit width of committed values the masks must hide.
const BOUND_B: usize = 4096;

const CHALLENGE_DOMAIN: &str = "range-proof-v1";
const STATEMENT: &str = "c = (g^x)(h^r), x is non-negative";

/// Five-digest announcement commitment `H(d₁)‖…‖H(d₄)‖H(d)`.
type AnnouncementDigest = [[u8; 32]; 5];

/// Public parameters of the argument: the hidden-order modulus and two
/// generators with unknown discrete-log relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicParameters {
    pub n: BigUint,
    pub g: BigUint,
    pub h: BigUint,
}

impl PublicParameters {
    pub fn new(n: BigUint, g: BigUint, h: BigUint) -> Self {
        Self { n, g, h }
    }

    /// Pedersen-style commitment `g^x · h^r mod n` with signed randomness.
    pub fn commit(&self, value: &BigUint, randomness: &BigInt) -> Option<BigUint> {
        let base = self.g.modpow(value, &self.n);
        let blind = pow_signed(&self.h, randomness, &self.n)?;
        Some(base * blind % &self.n)
    }
}

impl From<&crate::accumulator::Setup> for PublicParameters {
    fn from(setup: &crate::accumulator::Setup) -> Self {
        Self::new(setup.n.clone(), setup.g.clone(), setup.h.clone())
    }
}

/// Errors surfaced by proof generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeProofError {
    /// `a > b`, or the witness lies outside `[a, b]`.
    InvalidRange,
    /// The four-square decomposition of a shifted witness failed.
    Decomposition(FourSquaresError),
    /// A generator or commitment is not invertible modulo `n`.
    MalformedParameters(&'static str),
}

impl fmt::Display for RangeProofError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeProofError::InvalidRange => write!(f, "witness outside the requested range"),
            RangeProofError::Decomposition(err) => write!(f, "decomposition failure: {err}"),
            RangeProofError::MalformedParameters(reason) => {
                write!(f, "malformed parameters: {reason}")
            }
        }
    }
}

impl std::error::Error for RangeProofError {}

impl From<FourSquaresError> for RangeProofError {
    fn from(err: FourSquaresError) -> Self {
        RangeProofError::Decomposition(err)
    }
}

/// Non-interactive argument that a commitment opens to a non-negative
/// integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonNegativeProof {
    /// Commitments `cᵢ = g^{xᵢ} h^{rᵢ}` to the four squares of the value.
    square_commitments: [BigUint; 4],
    /// Hash commitment to the prover's announcement `(d₁, …, d₄, d)`.
    announcement: AnnouncementDigest,
    /// Responses `zᵢ = mᵢ + e·xᵢ`.
    z: [BigUint; 4],
    /// Responses `tᵢ = sᵢ + e·rᵢ`.
    t: [BigUint; 4],
    /// Response `τ = σ + e·(r − Σxᵢrᵢ)`; signed because the group order is
    /// unknown and nothing can be reduced.
    tau: BigInt,
}

/// Range argument for `x ∈ [a, b]` behind `c = g^x h^r`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeProof {
    commitment: BigUint,
    lower: NonNegativeProof,
    upper: NonNegativeProof,
}

impl RangeProof {
    /// The anchoring commitment `c = g^x h^r mod n`.
    pub fn commitment(&self) -> &BigUint {
        &self.commitment
    }
}

/// Prover side of the range argument.
pub struct RangeProver<'a> {
    pp: &'a PublicParameters,
}

impl<'a> RangeProver<'a> {
    pub fn new(pp: &'a PublicParameters) -> Self {
        Self { pp }
    }

    /// Proves `x ∈ [a, b]` for the commitment `g^x h^r`.
    pub fn prove(
        &self,
        x: &BigUint,
        randomness: &BigInt,
        a: &BigUint,
        b: &BigUint,
    ) -> Result<RangeProof, RangeProofError> {
        if a > b || x < a || x > b {
            return Err(RangeProofError::InvalidRange);
        }
        let commitment = self
            .pp
            .commit(x, randomness)
            .ok_or(RangeProofError::MalformedParameters("h not invertible"))?;

        let lower_commitment = shift_lower(self.pp, &commitment, a)
            .ok_or(RangeProofError::MalformedParameters("g not invertible"))?;
        let upper_commitment = shift_upper(self.pp, &commitment, b)
            .ok_or(RangeProofError::MalformedParameters("c not invertible"))?;

        let lower = self.prove_nonnegative(&(x - a), randomness, &lower_commitment)?;
        let upper = self.prove_nonnegative(&(b - x), &(-randomness), &upper_commitment)?;

        Ok(RangeProof {
            commitment,
            lower,
            upper,
        })
    }

    /// Σ-protocol prover for `commitment = g^value · h^randomness` with
    /// `value ≥ 0`, compiled through Fiat–Shamir.
    fn prove_nonnegative(
        &self,
        value: &BigUint,
        randomness: &BigInt,
        commitment: &BigUint,
    ) -> Result<NonNegativeProof, RangeProofError> {
        let n = &self.pp.n;
        let mut rng = OsRng;

        let squares: [BigUint; 4] = if value.is_zero() {
            core::array::from_fn(|_| BigUint::zero())
        } else {
            lagrange_four_squares(value)?.values().clone()
        };

        // Commitments to the squares with coins in [0, n).
        let coins: [BigUint; 4] = core::array::from_fn(|_| rng.gen_biguint_below(n));
        let square_commitments: [BigUint; 4] = core::array::from_fn(|idx| {
            self.pp.g.modpow(&squares[idx], n) * self.pp.h.modpow(&coins[idx], n) % n
        });

        // Masks: mᵢ ∈ [0, 2^{B+2κ}), sᵢ ∈ [0, 2^{2κ}·n), σ ∈ [0, 2^{B+2κ}·n).
        let m_limit = BigUint::one() << (BOUND_B + 2 * SECURITY_PARAM);
        let s_limit = (BigUint::one() << (2 * SECURITY_PARAM)) * n;
        let sigma_limit = &m_limit * n;
        let m: [BigUint; 4] = core::array::from_fn(|_| rng.gen_biguint_below(&m_limit));
        let s: [BigUint; 4] = core::array::from_fn(|_| rng.gen_biguint_below(&s_limit));
        let sigma = rng.gen_biguint_below(&sigma_limit);

        // Announcement dᵢ = g^{mᵢ}h^{sᵢ}, d = h^{σ}·Π cᵢ^{mᵢ}.
        let announced: [BigUint; 4] = core::array::from_fn(|idx| {
            self.pp.g.modpow(&m[idx], n) * self.pp.h.modpow(&s[idx], n) % n
        });
        let mut aggregate = self.pp.h.modpow(&sigma, n);
        for idx in 0..4 {
            aggregate = aggregate * square_commitments[idx].modpow(&m[idx], n) % n;
        }
        let announcement = announcement_digest(&announced, &aggregate);

        let e = challenge(self.pp, commitment, &square_commitments);

        // Responses over ℤ.
        let z: [BigUint; 4] = core::array::from_fn(|idx| &m[idx] + &e * &squares[idx]);
        let t: [BigUint; 4] = core::array::from_fn(|idx| &s[idx] + &e * &coins[idx]);
        let mut inner = randomness.clone();
        for idx in 0..4 {
            inner -= BigInt::from(&squares[idx] * &coins[idx]);
        }
        let tau = BigInt::from(sigma) + BigInt::from(e) * inner;

        Ok(NonNegativeProof {
            square_commitments,
            announcement,
            z,
            t,
            tau,
        })
    }
}

/// Verifier side of the range argument.
pub struct RangeVerifier<'a> {
    pp: &'a PublicParameters,
}

impl<'a> RangeVerifier<'a> {
    pub fn new(pp: &'a PublicParameters) -> Self {
        Self { pp }
    }

    /// Verifies `proof` against the public bounds `[a, b]`.
    pub fn verify(&self, a: &BigUint, b: &BigUint, proof: &RangeProof) -> bool {
        if a > b {
            return false;
        }
        let Some(lower_commitment) = shift_lower(self.pp, &proof.commitment, a) else {
            return false;
        };
        let Some(upper_commitment) = shift_upper(self.pp, &proof.commitment, b) else {
            return false;
        };
        self.verify_nonnegative(&lower_commitment, &proof.lower)
            && self.verify_nonnegative(&upper_commitment, &proof.upper)
    }

    /// Recomputes the announcement from the responses and checks the hash
    /// commitment closure.
    fn verify_nonnegative(&self, commitment: &BigUint, proof: &NonNegativeProof) -> bool {
        let n = &self.pp.n;
        let e = challenge(self.pp, commitment, &proof.square_commitments);
        let neg_e = -BigInt::from(e);

        let mut announced = [BigUint::zero(), BigUint::zero(), BigUint::zero(), BigUint::zero()];
        for idx in 0..4 {
            let Some(shifted) = pow_signed(&proof.square_commitments[idx], &neg_e, n) else {
                return false;
            };
            announced[idx] = self.pp.g.modpow(&proof.z[idx], n)
                * self.pp.h.modpow(&proof.t[idx], n)
                % n
                * shifted
                % n;
        }

        let mut aggregate = BigUint::one();
        for idx in 0..4 {
            aggregate = aggregate * proof.square_commitments[idx].modpow(&proof.z[idx], n) % n;
        }
        let Some(blind) = pow_signed(&self.pp.h, &proof.tau, n) else {
            return false;
        };
        let Some(anchor) = pow_signed(commitment, &neg_e, n) else {
            return false;
        };
        aggregate = aggregate * blind % n * anchor % n;

        announcement_digest(&announced, &aggregate) == proof.announcement
    }
}

/// Derived commitment to `x − a`: `c · g^{−a} mod n`.
fn shift_lower(pp: &PublicParameters, commitment: &BigUint, a: &BigUint) -> Option<BigUint> {
    let shift = pow_signed(&pp.g, &-BigInt::from(a.clone()), &pp.n)?;
    Some(commitment * shift % &pp.n)
}

/// Derived commitment to `b − x`: `g^b · c^{−1} mod n`.
fn shift_upper(pp: &PublicParameters, commitment: &BigUint, b: &BigUint) -> Option<BigUint> {
    let inverse = pow_signed(commitment, &BigInt::from(-1), &pp.n)?;
    Some(pp.g.modpow(b, &pp.n) * inverse % &pp.n)
}

/// Fiat–Shamir challenge binding the statement, the public parameters, the
/// anchoring commitment and the four square commitments.
fn challenge(pp: &PublicParameters, commitment: &BigUint, squares: &[BigUint; 4]) -> BigUint {
    let mut transcript = Transcript::new(CHALLENGE_DOMAIN);
    transcript.absorb("statement", STATEMENT.as_bytes());
    transcript.absorb_uint("g", &pp.g);
    transcript.absorb_uint("h", &pp.h);
    transcript.absorb_uint("n", &pp.n);
    transcript.absorb_uint("c", commitment);
    for square in squares {
        transcript.absorb_uint("square-commitment", square);
    }
    transcript.challenge()
}

/// `H(d₁)‖…‖H(d₄)‖H(d)` over the big-endian byte encodings.
fn announcement_digest(announced: &[BigUint; 4], aggregate: &BigUint) -> AnnouncementDigest {
    let mut digest = [[0u8; 32]; 5];
    for (slot, value) in digest.iter_mut().zip(announced.iter()) {
        *slot = Sha256::digest(value.to_bytes_be()).into();
    }
    digest[4] = Sha256::digest(aggregate.to_bytes_be()).into();
    digest
}
