use core::fmt;

use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::arith::round_div;

/// Gaussian integer `re + im·i`.
#[derive(Clone, PartialEq, Eq)]
pub struct GaussianInt {
    pub re: BigInt,
    pub im: BigInt,
}

impl GaussianInt {
    pub fn new(re: BigInt, im: BigInt) -> Self {
        Self { re, im }
    }

    pub fn zero() -> Self {
        Self::new(BigInt::zero(), BigInt::zero())
    }

    pub fn one() -> Self {
        Self::new(BigInt::one(), BigInt::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    /// Field norm `re² + im²`.
    pub fn norm(&self) -> BigInt {
        &self.re * &self.re + &self.im * &self.im
    }

    pub fn conj(&self) -> Self {
        Self::new(self.re.clone(), -&self.im)
    }

    pub fn add(&self, other: &Self) -> Self {
        Self::new(&self.re + &other.re, &self.im + &other.im)
    }

    pub fn sub(&self, other: &Self) -> Self {
        Self::new(&self.re - &other.re, &self.im - &other.im)
    }

    pub fn mul(&self, other: &Self) -> Self {
        let re = &self.re * &other.re - &self.im * &other.im;
        let im = &self.re * &other.im + &self.im * &other.re;
        Self::new(re, im)
    }

    /// Division with remainder: returns `(q, ρ)` with `self = q·other + ρ`
    /// and `N(ρ) ≤ N(other)/2`.
    ///
    /// The quotient is the componentwise nearest-integer rounding of
    /// `self·conj(other) / N(other)`, so each coordinate of the error is at
    /// most one half.
    pub fn div_rem(&self, other: &Self) -> (Self, Self) {
        assert!(!other.is_zero(), "gaussian division by zero");
        let numerator = self.mul(&other.conj());
        let denominator = other.norm();
        let quotient = Self::new(
            round_div(&numerator.re, &denominator),
            round_div(&numerator.im, &denominator),
        );
        let remainder = self.sub(&quotient.mul(other));
        (quotient, remainder)
    }

    /// Euclidean greatest common divisor, unique up to the units ±1, ±i.
    pub fn gcd(&self, other: &Self) -> Self {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let (_, remainder) = a.div_rem(&b);
            a = b;
            b = remainder;
        }
        a
    }
}

impl fmt::Debug for GaussianInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GaussianInt({} + {}i)", self.re, self.im)
    }
}
