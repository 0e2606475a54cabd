use core::fmt;

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::arith::{gen_safe_prime, jacobi};

/// Modulus width produced by the default trusted setup.
pub const RSA_BIT_LENGTH: usize = 2048;

/// 2048-bit test modulus. Only for testing purposes, DO NOT use in
/// production; production deployments run [`trusted_setup`] (ideally as a
/// multi-party ceremony) and discard the factors.
const N_2048: &str = "22582513446883649683242153375773765418277977026848618150278436227443969113525388360965414596382292671632010154272027792498289390464326093128963474525925743125404187090638221587455285089494562751793489098182761320953828657439130044252338283109583198301789045090284695934345711523245381620643226632165168827411546661236460973389982263385406789443858985073091473529732325356098830825299275985202060852102775942940039443155227986748457261585440368528834910182851433705587223040610934954417065434756145769875043620201897615075786323297141320586481340831246603933018654794846594742280842668198512719618188992528830140149361";

/// Generator paired with [`N_2048`]; same caveat.
const G_2048: &str = "3734320578166922768976307305081280303658237303482921793243310032002132951325426885895423150554487167609218974062079302792001919827304933109188668552532361245089029380294384169787606911401094856511916709999954764232948323779503820860893459514928713744983707360078264267038900798843893405664990521531326919997106338139056096176409033756102908667173913246197068450150318832809948977367751025873698025220766782003611956130604742644746610708520581969538416206455665972248047959779079118036299417601968576259426648158714614452861031491553305187113545916330322686053758561416773919173504690956803771722726889946697788319929";

/// Second generator paired with [`N_2048`]; same caveat.
const H_2048: &str = "1582433196042535773898642856814926874501199844772808209798545765882857391073717631360065816613373509202691737458490830509979879771883168398785856056110736083435040549860024938378796318753064835110482441115760897524667343221753799849207723195729358565521753697076761550453675996906942484179834968386568757636433579938945322152073309477120701766107272148535093122238519340372766971216124175473667780382425281013570558875523373504108433319932127851859684947025440123382599601611460274335280822834972913253420025827402904805226163959418839188054187383250553791823431534564282919675786841775533806609995586228017407921459";

static TEST_SETUP: Lazy<Setup> = Lazy::new(|| Setup {
    n: parse_decimal(N_2048),
    g: parse_decimal(G_2048),
    h: parse_decimal(H_2048),
});

fn parse_decimal(digits: &str) -> BigUint {
    digits
        .parse()
        .expect("shipped setup constant is valid decimal")
}

/// Errors surfaced by trusted setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    /// The requested modulus width is too narrow or odd.
    InvalidBitLength { bits: usize },
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::InvalidBitLength { bits } => {
                write!(f, "invalid modulus bit length {bits}, expected an even length >= 32")
            }
        }
    }
}

impl std::error::Error for SetupError {}

/// Public parameters of the hidden-order group.
///
/// Immutable once created; share freely. `g` and `h` are quadratic residues
/// modulo both prime factors of `n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setup {
    /// RSA modulus `N = pq`, a product of two safe primes.
    pub n: BigUint,
    /// Default generator in `QR_N`.
    pub g: BigUint,
    /// Second generator, a random power of `g`.
    pub h: BigUint,
}

impl Setup {
    /// Shipped 2048-bit parameters for tests and benches. Only for testing
    /// purposes, DO NOT use in production.
    pub fn test_parameters() -> Setup {
        TEST_SETUP.clone()
    }
}

/// Output of a fresh trusted setup: the public [`Setup`] plus the factors,
/// which only the trusted party may hold.
#[derive(Clone)]
pub struct TrustedSetup {
    setup: Setup,
    p: BigUint,
    q: BigUint,
}

impl TrustedSetup {
    /// Public portion of the setup.
    pub fn setup(&self) -> &Setup {
        &self.setup
    }

    /// Discards the factors and keeps the public parameters.
    pub fn into_setup(self) -> Setup {
        self.setup
    }

    /// First safe-prime factor.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// Second safe-prime factor.
    pub fn q(&self) -> &BigUint {
        &self.q
    }
}

impl fmt::Debug for TrustedSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The factors are the trapdoor; never let them leak through logs.
        f.debug_struct("TrustedSetup")
            .field("setup", &self.setup)
            .field("p", &"<redacted>")
            .field("q", &"<redacted>")
            .finish()
    }
}

/// Runs a fresh 2048-bit trusted setup.
///
/// Generates two 1024-bit safe primes through the combined sieve, draws the
/// generator uniformly from `QR_N` by rejection on the Jacobi symbol, and
/// derives `h` as a random power of `g`. An unavailable OS RNG aborts.
pub fn trusted_setup() -> Result<TrustedSetup, SetupError> {
    trusted_setup_with_bits(RSA_BIT_LENGTH)
}

/// Runs a trusted setup with an explicit modulus width. Narrow widths are
/// for tests only.
pub fn trusted_setup_with_bits(bits: usize) -> Result<TrustedSetup, SetupError> {
    if bits < 32 || bits % 2 != 0 {
        return Err(SetupError::InvalidBitLength { bits });
    }
    let p = gen_safe_prime(bits / 2);
    let mut q = gen_safe_prime(bits / 2);
    while q == p {
        q = gen_safe_prime(bits / 2);
    }
    let n = &p * &q;

    let g = sample_quadratic_residue(&p, &q, bits);
    // |QR_N| = p'q' for safe primes p = 2p'+1, q = 2q'+1.
    let order = ((&p - BigUint::one()) >> 1usize) * ((&q - BigUint::one()) >> 1usize);
    let exponent = OsRng.gen_biguint_below(&order);
    let h = g.modpow(&exponent, &n);

    Ok(TrustedSetup {
        setup: Setup { n, g, h },
        p,
        q,
    })
}

/// Uniform quadratic residue: sample below `2^(bits−1)` and retain the
/// candidate iff its Jacobi symbol is one modulo both factors.
fn sample_quadratic_residue(p: &BigUint, q: &BigUint, bits: usize) -> BigUint {
    let bound = BigUint::one() << (bits - 1);
    let mut rng = OsRng;
    loop {
        let candidate = rng.gen_biguint_below(&bound);
        if candidate.is_zero() {
            continue;
        }
        if jacobi(&candidate, p) == 1 && jacobi(&candidate, q) == 1 {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arith::is_probable_prime;
    use num_integer::Integer;

    #[test]
    fn test_parameters_are_coprime_to_modulus() {
        let setup = Setup::test_parameters();
        assert_eq!(setup.g.gcd(&setup.n), BigUint::one());
        assert_eq!(setup.h.gcd(&setup.n), BigUint::one());
        assert_eq!(setup.n.bits(), 2048);
    }

    #[test]
    fn fresh_setup_structure_ok() {
        let trusted = trusted_setup_with_bits(128).expect("valid bit length");
        let setup = trusted.setup();
        assert_eq!(setup.n, trusted.p() * trusted.q());
        assert!(is_probable_prime(trusted.p(), 40));
        assert!(is_probable_prime(trusted.q(), 40));
        // Generators are quadratic residues modulo both factors.
        assert_eq!(jacobi(&setup.g, trusted.p()), 1);
        assert_eq!(jacobi(&setup.g, trusted.q()), 1);
        assert_eq!(setup.g.gcd(&setup.n), BigUint::one());
    }

    #[test]
    fn rejects_bad_bit_lengths() {
        assert_eq!(
            trusted_setup_with_bits(31).map(|_| ()),
            Err(SetupError::InvalidBitLength { bits: 31 })
        );
        assert_eq!(
            trusted_setup_with_bits(130).map(|_| ()),
            Ok(())
        );
    }
}
