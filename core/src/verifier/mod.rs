//! Property-based verification engine.
//!
//! A run generates a seeded battery of test cases for one algorithm, executes
//! the implementation under test against every case in parallel, checks each
//! output against the invariants the contract lists, and shrinks every
//! failing input before reporting. The same engine verifies trusted
//! references and cataloged mutants; only the verdict differs.

pub mod generator;
pub mod invariants;
pub mod report;
pub mod shrink;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::error::HarnessError;
use crate::implementation::{self, ImplKind, Implementation};
use crate::mutation::{self, MutationRule};
use crate::registry::Registry;

pub use report::{CaseFailure, Rationale, TestCase, VerificationResult, Violation};

/// Battery sizing and seeding for one verification run.
#[derive(Debug, Clone, Copy)]
pub struct VerifierConfig {
    /// Number of random cases on top of the fixed boundary and adversarial
    /// cases every battery carries.
    pub cases: usize,
    /// Seed for the battery generator; equal seeds give equal batteries.
    pub seed: u64,
    /// Upper bound on generated collection sizes.
    pub max_size: usize,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            cases: 100,
            seed: 0x5eed,
            max_size: 48,
        }
    }
}

/// Verification engine bound to a registry of contracts.
pub struct Verifier {
    registry: Registry,
    config: VerifierConfig,
}

impl Verifier {
    pub fn new(registry: Registry, config: VerifierConfig) -> Self {
        Self { registry, config }
    }

    /// Engine over the built-in registry with default battery sizing.
    pub fn with_defaults() -> Self {
        Self::new(Registry::builtin(), VerifierConfig::default())
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Verify the built-in reference implementation of `name`.
    pub fn verify(&self, name: &str) -> Result<VerificationResult, HarnessError> {
        self.registry.get(name)?;
        let imp = implementation::reference(name)
            .ok_or_else(|| HarnessError::invalid_input(format!("no implementation for {name}")))?;
        Ok(self.verify_implementation(&imp))
    }

    /// Verify the cataloged mutant of `name` under `rule`.
    pub fn verify_mutant(
        &self,
        name: &str,
        rule: MutationRule,
    ) -> Result<VerificationResult, HarnessError> {
        self.registry.get(name)?;
        let imp = mutation::mutant(name, rule).ok_or_else(|| {
            HarnessError::invalid_input(format!("no {rule} mutant is cataloged for {name}"))
        })?;
        Ok(self.verify_implementation(&imp))
    }

    /// Run the full battery against an arbitrary implementation. The name on
    /// the implementation must be registered; unknown names should be caught
    /// by the lookup paths above before reaching here.
    pub fn verify_implementation(&self, imp: &Implementation) -> VerificationResult {
        let spec = match self.registry.get(imp.id.as_str()) {
            Ok(spec) => spec,
            Err(_) => {
                return VerificationResult {
                    algorithm: imp.id.clone(),
                    mutant_rule: mutant_rule(imp),
                    total_cases: 0,
                    passed: 0,
                    failures: Vec::new(),
                };
            }
        };

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let cases = generator::battery(spec, &self.config, &mut rng);
        let total_cases = cases.len();
        log::debug!(
            "verifying {} against {} cases (seed {:#x})",
            imp.id,
            total_cases,
            self.config.seed
        );

        let per_case: Vec<Vec<CaseFailure>> = cases
            .par_iter()
            .map(|case| {
                let violations = invariants::check(spec, imp, &case.input);
                if violations.is_empty() {
                    return Vec::new();
                }
                let shrunk = shrink::shrink(spec, imp, case.input.clone());
                violations
                    .into_iter()
                    .map(|violation| CaseFailure {
                        rationale: case.rationale,
                        invariant: violation.invariant,
                        detail: violation.detail,
                        input: shrunk.clone(),
                        suspected: violation.suspected,
                    })
                    .collect()
            })
            .collect();

        let passed = per_case.iter().filter(|f| f.is_empty()).count();
        let failures: Vec<CaseFailure> = per_case.into_iter().flatten().collect();
        if failures.is_empty() {
            log::debug!("{}: all {} cases passed", imp.id, total_cases);
        } else {
            log::warn!(
                "{}: {} invariant violation(s) across {} failing case(s)",
                imp.id,
                failures.len(),
                total_cases - passed
            );
        }

        VerificationResult {
            algorithm: imp.id.clone(),
            mutant_rule: mutant_rule(imp),
            total_cases,
            passed,
            failures,
        }
    }
}

fn mutant_rule(imp: &Implementation) -> Option<MutationRule> {
    match imp.kind {
        ImplKind::Reference => None,
        ImplKind::Mutant(rule) => Some(rule),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_verifier() -> Verifier {
        Verifier::new(
            Registry::builtin(),
            VerifierConfig {
                cases: 30,
                seed: 7,
                max_size: 24,
            },
        )
    }

    #[test]
    fn test_reference_merge_sort_passes() {
        let result = small_verifier().verify("merge_sort").unwrap();
        assert!(result.all_passed(), "{:?}", result.failures);
        assert_eq!(result.mutant_rule, None);
    }

    #[test]
    fn test_flipped_merge_sort_fails() {
        let result = small_verifier()
            .verify_mutant("merge_sort", MutationRule::ComparisonFlip)
            .unwrap();
        assert!(!result.all_passed());
        assert_eq!(result.mutant_rule, Some(MutationRule::ComparisonFlip));
        assert!(result.passed < result.total_cases);
    }

    #[test]
    fn test_unknown_algorithm_is_an_error() {
        let err = small_verifier().verify("quantum_sort").unwrap_err();
        assert!(matches!(err, HarnessError::UnknownAlgorithm(_)));
    }

    #[test]
    fn test_same_seed_same_verdict() {
        let a = small_verifier().verify("binary_search").unwrap();
        let b = small_verifier().verify("binary_search").unwrap();
        assert_eq!(a.total_cases, b.total_cases);
        assert_eq!(a.passed, b.passed);
    }
}
