use core::fmt;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use once_cell::sync::Lazy;

use crate::arith::round_div;

use super::GaussianInt;

/// Hurwitz quaternion `a + b·i + c·j + d·k` where the components are either
/// all integers or all half-integers.
///
/// Components are stored doubled, which keeps both lattices in `ℤ⁴`: a
/// doubled vector with all-even entries encodes an integer quaternion, one
/// with all-odd entries a half-integer quaternion. Mixed parity never
/// occurs.
#[derive(Clone, PartialEq, Eq)]
pub struct HurwitzInt {
    dbl: [BigInt; 4],
}

/// The 24 units of the Hurwitz order: ±1, ±i, ±j, ±k and (±1±i±j±k)/2,
/// in doubled coordinates.
static UNITS: Lazy<Vec<HurwitzInt>> = Lazy::new(|| {
    let mut units = Vec::with_capacity(24);
    for axis in 0..4 {
        for sign in [2i64, -2] {
            let mut dbl = [0i64; 4];
            dbl[axis] = sign;
            units.push(HurwitzInt::from_doubled(dbl.map(BigInt::from)));
        }
    }
    for mask in 0..16u32 {
        let dbl = core::array::from_fn(|idx| {
            if mask & (1 << idx) == 0 {
                BigInt::from(1)
            } else {
                BigInt::from(-1)
            }
        });
        units.push(HurwitzInt::from_doubled(dbl));
    }
    units
});

impl HurwitzInt {
    /// Builds a quaternion with integer components.
    pub fn from_integers(a: BigInt, b: BigInt, c: BigInt, d: BigInt) -> Self {
        Self::from_doubled([a, b, c, d].map(|component| component << 1usize))
    }

    /// Embeds a Gaussian integer as `re + im·i`.
    pub fn from_gaussian(value: &GaussianInt) -> Self {
        Self::from_integers(
            value.re.clone(),
            value.im.clone(),
            BigInt::zero(),
            BigInt::zero(),
        )
    }

    pub(crate) fn from_doubled(dbl: [BigInt; 4]) -> Self {
        debug_assert!(
            dbl.iter().all(|component| component.is_even())
                || dbl.iter().all(|component| component.is_odd()),
            "hurwitz components must share parity"
        );
        Self { dbl }
    }

    pub fn zero() -> Self {
        Self::from_doubled(core::array::from_fn(|_| BigInt::zero()))
    }

    pub fn is_zero(&self) -> bool {
        self.dbl.iter().all(Zero::is_zero)
    }

    /// Whether the components are half-integers.
    pub fn is_half(&self) -> bool {
        self.dbl[0].is_odd()
    }

    /// Reduced norm `a² + b² + c² + d²`; always a non-negative integer.
    pub fn norm(&self) -> BigInt {
        let doubled_norm: BigInt = self.dbl.iter().map(|component| component * component).sum();
        debug_assert!((&doubled_norm % BigInt::from(4)).is_zero());
        doubled_norm >> 2usize
    }

    pub fn conj(&self) -> Self {
        Self::from_doubled([
            self.dbl[0].clone(),
            -&self.dbl[1],
            -&self.dbl[2],
            -&self.dbl[3],
        ])
    }

    pub fn add(&self, other: &Self) -> Self {
        Self::from_doubled(core::array::from_fn(|idx| {
            &self.dbl[idx] + &other.dbl[idx]
        }))
    }

    pub fn sub(&self, other: &Self) -> Self {
        Self::from_doubled(core::array::from_fn(|idx| {
            &self.dbl[idx] - &other.dbl[idx]
        }))
    }

    /// Quaternion product. Non-commutative: `a.mul(b)` is `a·b`.
    pub fn mul(&self, other: &Self) -> Self {
        let [a1, b1, c1, d1] = &self.dbl;
        let [a2, b2, c2, d2] = &other.dbl;
        // Products of doubled coordinates are quadrupled, so halving each
        // combination lands back on doubled coordinates.
        let doubled = [
            a1 * a2 - b1 * b2 - c1 * c2 - d1 * d2,
            a1 * b2 + b1 * a2 + c1 * d2 - d1 * c2,
            a1 * c2 - b1 * d2 + c1 * a2 + d1 * b2,
            a1 * d2 + b1 * c2 - c1 * b2 + d1 * a2,
        ];
        Self::from_doubled(doubled.map(|component| {
            debug_assert!(component.is_even());
            component >> 1usize
        }))
    }

    /// Left division with remainder: returns `(q, ρ)` with
    /// `self = q·other + ρ` and `N(ρ) < N(other)` strictly.
    ///
    /// The exact quotient `self·conj(other)/N(other)` is rounded to the
    /// nearest all-integer and nearest all-half-integer lattice points; the
    /// candidate with the smaller remainder norm wins. Whenever integer
    /// rounding is off by one half in every coordinate, the half-integer
    /// point matches the exact quotient, so the bound stays strict.
    pub fn div_rem_left(&self, other: &Self) -> (Self, Self) {
        assert!(!other.is_zero(), "hurwitz division by zero");
        let numerator = self.mul(&other.conj());
        let denominator = other.norm();
        let double_denominator: BigInt = &denominator << 1usize;

        let even = Self::from_doubled(core::array::from_fn(|idx| {
            round_div(&numerator.dbl[idx], &double_denominator) << 1usize
        }));
        let odd = Self::from_doubled(core::array::from_fn(|idx| {
            let shifted = &numerator.dbl[idx] - &denominator;
            (round_div(&shifted, &double_denominator) << 1usize) + BigInt::one()
        }));

        let remainder_even = self.sub(&even.mul(other));
        let remainder_odd = self.sub(&odd.mul(other));
        if remainder_even.norm() <= remainder_odd.norm() {
            (even, remainder_even)
        } else {
            (odd, remainder_odd)
        }
    }

    /// Greatest common right divisor by the right-Euclidean algorithm,
    /// normalized so all components are integers and the scalar component
    /// is non-negative.
    pub fn gcrd(&self, other: &Self) -> Self {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let (_, remainder) = a.div_rem_left(&b);
            a = b;
            b = remainder;
        }
        a.normalize()
    }

    /// Rotates by a unit so the components become integers with a
    /// non-negative scalar part. Unit multiplication preserves the norm, so
    /// the rotated components still decompose it into four squares.
    fn normalize(self) -> Self {
        if !self.is_half() && !self.dbl[0].is_negative() {
            return self;
        }
        for unit in UNITS.iter() {
            let candidate = self.mul(unit);
            if !candidate.is_half() && !candidate.dbl[0].is_negative() {
                return candidate;
            }
        }
        // Unreachable for well-formed inputs; the caller re-verifies the
        // decomposition and retries on mismatch.
        self
    }

    /// Integer components `(a, b, c, d)`; `None` for half-integer values.
    pub fn components(&self) -> Option<[BigInt; 4]> {
        if self.is_half() {
            return None;
        }
        Some(core::array::from_fn(|idx| &self.dbl[idx] >> 1usize))
    }
}

impl fmt::Debug for HurwitzInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HurwitzInt({}/2 + {}/2 i + {}/2 j + {}/2 k)",
            self.dbl[0], self.dbl[1], self.dbl[2], self.dbl[3]
        )
    }
}
