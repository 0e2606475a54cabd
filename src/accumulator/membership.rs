use num_bigint::BigUint;
use num_traits::One;

use crate::precompute::{PrecomputeTable, TableError};
use crate::product::product_recursive_fast;

/// Batch membership proofs: for each `j`, `πⱼ = g^{Π_{i≠j} rᵢ} mod N`.
///
/// Divide and conquer with carried bases: split the set into halves, raise
/// the base to the product of the opposite half, recurse. Total work is
/// `O(n log n)` big-integer multiplications across the product tree plus
/// one exponentiation per internal node, against naive `O(n²)`.
///
/// Proofs are returned in the order of `representatives`.
pub fn prove_membership(
    g: &BigUint,
    modulus: &BigUint,
    representatives: &[BigUint],
) -> Vec<BigUint> {
    let mut proofs = Vec::with_capacity(representatives.len());
    let base = g % modulus;
    prove_with_base(&base, modulus, representatives, &mut proofs);
    proofs
}

fn prove_with_base(
    base: &BigUint,
    modulus: &BigUint,
    representatives: &[BigUint],
    proofs: &mut Vec<BigUint>,
) {
    match representatives.len() {
        0 => {}
        1 => proofs.push(base.clone()),
        _ => {
            let (left, right) = representatives.split_at(representatives.len() / 2);
            let left_base = base.modpow(&product_recursive_fast(right), modulus);
            let right_base = base.modpow(&product_recursive_fast(left), modulus);
            prove_with_base(&left_base, modulus, left, proofs);
            prove_with_base(&right_base, modulus, right, proofs);
        }
    }
}

/// Parallel batch membership proofs.
///
/// The recursion forks into `2^depth` independent subtrees; below the fork
/// budget (or with parallelism disabled) each subtree runs the sequential
/// algorithm. The result is identical to [`prove_membership`].
pub fn prove_membership_parallel(
    g: &BigUint,
    modulus: &BigUint,
    representatives: &[BigUint],
    depth: u32,
) -> Vec<BigUint> {
    #[cfg(feature = "parallel")]
    {
        if crate::utils::parallelism_enabled() {
            let base = g % modulus;
            return prove_parallel_inner(&base, modulus, representatives, depth);
        }
    }
    let _ = depth;
    prove_membership(g, modulus, representatives)
}

#[cfg(feature = "parallel")]
fn prove_parallel_inner(
    base: &BigUint,
    modulus: &BigUint,
    representatives: &[BigUint],
    depth: u32,
) -> Vec<BigUint> {
    if depth == 0 || representatives.len() <= 1 {
        let mut proofs = Vec::with_capacity(representatives.len());
        prove_with_base(base, modulus, representatives, &mut proofs);
        return proofs;
    }
    let (left, right) = representatives.split_at(representatives.len() / 2);
    let left_base = base.modpow(&product_recursive_fast(right), modulus);
    let right_base = base.modpow(&product_recursive_fast(left), modulus);
    let (mut left_proofs, right_proofs) = rayon::join(
        || prove_parallel_inner(&left_base, modulus, left, depth - 1),
        || prove_parallel_inner(&right_base, modulus, right, depth - 1),
    );
    left_proofs.extend(right_proofs);
    left_proofs
}

/// Batch membership proofs through one shared [`PrecomputeTable`].
///
/// Instead of carrying bases, the recursion carries the exponent (the
/// product of every representative outside the current subtree) down to
/// the `2^depth` subtree roots, then spends a single table evaluation per
/// root to materialise the subtree base `g^e mod N`. Every one of those
/// exponentiations runs against the table's fixed base, which is what lets
/// all subtrees share it. The table must cover
/// `bits(representative bound) · (len − 1)` exponent bits.
pub fn prove_membership_precomputed(
    table: &PrecomputeTable,
    representatives: &[BigUint],
    depth: u32,
) -> Result<Vec<BigUint>, TableError> {
    prove_precomputed_inner(table, representatives, &BigUint::one(), depth)
}

fn prove_precomputed_inner(
    table: &PrecomputeTable,
    representatives: &[BigUint],
    exponent: &BigUint,
    depth: u32,
) -> Result<Vec<BigUint>, TableError> {
    if representatives.is_empty() {
        return Ok(Vec::new());
    }
    if depth == 0 || representatives.len() == 1 {
        let base = table.compute(exponent, 1)?;
        let mut proofs = Vec::with_capacity(representatives.len());
        prove_with_base(&base, table.modulus(), representatives, &mut proofs);
        return Ok(proofs);
    }

    let (left, right) = representatives.split_at(representatives.len() / 2);
    let left_exponent = exponent * product_recursive_fast(right);
    let right_exponent = exponent * product_recursive_fast(left);

    #[cfg(feature = "parallel")]
    {
        if crate::utils::parallelism_enabled() {
            let (left_proofs, right_proofs) = rayon::join(
                || prove_precomputed_inner(table, left, &left_exponent, depth - 1),
                || prove_precomputed_inner(table, right, &right_exponent, depth - 1),
            );
            let mut proofs = left_proofs?;
            proofs.extend(right_proofs?);
            return Ok(proofs);
        }
    }

    let mut proofs = prove_precomputed_inner(table, left, &left_exponent, depth - 1)?;
    proofs.extend(prove_precomputed_inner(table, right, &right_exponent, depth - 1)?);
    Ok(proofs)
}

/// Checks a membership witness: `witness^{rep} ≡ accumulator (mod N)`.
pub fn verify_membership(
    witness: &BigUint,
    representative: &BigUint,
    modulus: &BigUint,
    accumulator: &BigUint,
) -> bool {
    witness.modpow(representative, modulus) == *accumulator
}
