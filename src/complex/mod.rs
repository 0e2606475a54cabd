//! Gaussian integers and Hurwitz quaternions.
//!
//! The four-square denouement needs exact arithmetic in two rings:
//!
//! * `ℤ[i]`, where `gcd(s + i, p)` splits a prime `p ≡ 1 (mod 4)` into a sum
//!   of two squares, and
//! * the Hurwitz order (quaternions with all-integer or all-half-integer
//!   components), where a greatest common right divisor against `n` yields a
//!   four-square decomposition.
//!
//! Both rings admit division with a remainder of strictly smaller norm,
//! which is what makes the Euclidean loops below terminate. Hurwitz
//! multiplication is non-commutative; nothing in this module parallelizes
//! across factors.

mod gaussian;
mod hurwitz;

pub use gaussian::GaussianInt;
pub use hurwitz::HurwitzInt;

#[cfg(test)]
mod tests;
