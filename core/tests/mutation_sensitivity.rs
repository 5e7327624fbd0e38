//! Catalog sensitivity: the verifier must pass every reference and flag
//! every cataloged mutant. A mutant that slips through means the battery or
//! the invariant checks have a blind spot.

use veritas_core::{catalog, mutated_source, Registry, Verifier, VerifierConfig};

fn verifier() -> Verifier {
    Verifier::new(
        Registry::builtin(),
        VerifierConfig {
            cases: 60,
            seed: 0xA11CE,
            max_size: 32,
        },
    )
}

#[test]
fn every_reference_passes() {
    let verifier = verifier();
    for spec in verifier.registry().iter() {
        let result = verifier.verify(spec.id.as_str()).unwrap();
        assert!(
            result.all_passed(),
            "{} reference failed: {:?}",
            spec.id,
            result.failures
        );
        assert!(result.total_cases > 0);
    }
}

#[test]
fn every_cataloged_mutant_is_flagged() {
    let verifier = verifier();
    for (name, rule) in catalog() {
        let result = verifier.verify_mutant(name, rule).unwrap();
        assert!(
            !result.all_passed(),
            "{name} under {rule} slipped through {} cases",
            result.total_cases
        );
        assert_eq!(result.mutant_rule, Some(rule));
    }
}

#[test]
fn every_cataloged_mutant_has_source() {
    for (name, rule) in catalog() {
        let source = mutated_source(name, rule);
        assert!(source.is_some(), "no source snippet for {name} under {rule}");
        assert!(!source.unwrap().trim().is_empty());
    }
}

#[test]
fn failures_carry_shrunk_inputs_and_suspicions() {
    let verifier = verifier();
    let result = verifier
        .verify_mutant("merge_sort", veritas_core::MutationRule::ComparisonFlip)
        .unwrap();
    assert!(!result.failures.is_empty());
    // At least one failure should name the planted bug class.
    assert!(result
        .failures
        .iter()
        .any(|f| f.suspected == Some(veritas_core::MutationRule::ComparisonFlip)));
}
