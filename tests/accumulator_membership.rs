use num_bigint::BigUint;
use rsa_accumulator::{
    accumulate, accumulate_batch, gen_representatives, product_recursive_fast, prove_membership,
    prove_membership_parallel, prove_membership_precomputed, verify_membership, Element,
    EncodeType, PrecomputeTable, Setup,
};

fn batch() -> (Setup, Vec<BigUint>) {
    let setup = Setup::test_parameters();
    let items: Vec<Element> = (0..4)
        .map(|index| Element::from(format!("member-{index}").as_str()))
        .collect();
    let representatives = gen_representatives(&items, EncodeType::HashToPrime);
    (setup, representatives)
}

#[test]
fn membership_proofs_close_over_accumulator() {
    let (setup, reps) = batch();
    let accumulator = accumulate_batch(&setup.g, &reps, &setup.n).expect("non-empty batch");
    let proofs = prove_membership(&setup.g, &setup.n, &reps);
    assert_eq!(proofs.len(), reps.len());
    for (proof, rep) in proofs.iter().zip(&reps) {
        assert!(verify_membership(proof, rep, &setup.n, &accumulator));
    }
}

#[test]
fn accumulator_soundness_invariant() {
    // Accumulate(G, Π_{j≠i} rⱼ, N)^{rᵢ} ≡ Accumulate(G, Πrⱼ, N).
    let (setup, reps) = batch();
    let full = accumulate(&setup.g, &product_recursive_fast(&reps), &setup.n);
    for index in 0..reps.len() {
        let mut others = reps.clone();
        let rep = others.remove(index);
        let partial = accumulate(&setup.g, &product_recursive_fast(&others), &setup.n);
        assert_eq!(partial.modpow(&rep, &setup.n), full, "element {index}");
    }
}

#[test]
fn parallel_proofs_match_sequential() {
    let (setup, reps) = batch();
    let sequential = prove_membership(&setup.g, &setup.n, &reps);
    let parallel = prove_membership_parallel(&setup.g, &setup.n, &reps, 2);
    assert_eq!(sequential, parallel);
}

#[test]
fn precomputed_proofs_match_sequential() {
    let (setup, reps) = batch();
    // Representatives stay below 2^257; four of them bound the exponent.
    let bound = BigUint::from(1u8) << 257usize;
    let table =
        PrecomputeTable::new(&setup.g, &setup.n, &bound, reps.len(), 1).expect("table parameters");
    let sequential = prove_membership(&setup.g, &setup.n, &reps);
    let precomputed =
        prove_membership_precomputed(&table, &reps, 2).expect("table covers the batch");
    assert_eq!(sequential, precomputed);
}

#[test]
fn di_hash_encoding_accumulates() {
    let setup = Setup::test_parameters();
    let items: Vec<Element> = ["left", "right"].map(Element::from).to_vec();
    let reps = gen_representatives(&items, EncodeType::DiHash);
    let accumulator = accumulate_batch(&setup.g, &reps, &setup.n).expect("non-empty batch");
    let proofs = prove_membership(&setup.g, &setup.n, &reps);
    for (proof, rep) in proofs.iter().zip(&reps) {
        assert!(verify_membership(proof, rep, &setup.n, &accumulator));
    }
}

#[test]
fn mismatched_encoding_fails_verification() {
    let setup = Setup::test_parameters();
    let items: Vec<Element> = ["left", "right"].map(Element::from).to_vec();
    let accumulated = gen_representatives(&items, EncodeType::HashToPrime);
    let proved = gen_representatives(&items, EncodeType::DiHash);
    let accumulator = accumulate_batch(&setup.g, &accumulated, &setup.n).expect("non-empty");
    let proofs = prove_membership(&setup.g, &setup.n, &proved);
    assert!(!verify_membership(&proofs[0], &proved[0], &setup.n, &accumulator));
}
