//! Verification outcome types.
//!
//! An incorrect implementation is the expected detection outcome of a run,
//! not a harness fault, so failures live inside the result value rather than
//! in the error channel. Results are serializable for machine-readable
//! reports; nothing here is persisted beyond the run.

use serde::Serialize;

use crate::mutation::MutationRule;
use crate::problem::TestInput;
use crate::spec::{AlgorithmId, InvariantKind};

/// Why a generated case is in the battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rationale {
    Random,
    Boundary(&'static str),
    Adversarial(&'static str),
}

/// One generated input plus the reason it was generated. Created per run and
/// discarded afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct TestCase {
    pub input: TestInput,
    pub rationale: Rationale,
}

impl TestCase {
    pub fn random(input: TestInput) -> Self {
        Self {
            input,
            rationale: Rationale::Random,
        }
    }

    pub fn boundary(input: TestInput, why: &'static str) -> Self {
        Self {
            input,
            rationale: Rationale::Boundary(why),
        }
    }

    pub fn adversarial(input: TestInput, why: &'static str) -> Self {
        Self {
            input,
            rationale: Rationale::Adversarial(why),
        }
    }
}

/// A single invariant violation, before it is attached to an input.
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    pub invariant: InvariantKind,
    pub detail: String,
    /// Bug-class tag when the observed deviation matches a cataloged
    /// mutation pattern.
    pub suspected: Option<MutationRule>,
}

impl Violation {
    pub fn new(invariant: InvariantKind, detail: impl Into<String>) -> Self {
        Self {
            invariant,
            detail: detail.into(),
            suspected: None,
        }
    }

    pub fn suspecting(mut self, rule: MutationRule) -> Self {
        self.suspected = Some(rule);
        self
    }
}

/// A failing case: the violated invariant plus the (shrunk) input that
/// triggered it.
#[derive(Debug, Clone, Serialize)]
pub struct CaseFailure {
    pub rationale: Rationale,
    pub invariant: InvariantKind,
    pub detail: String,
    pub input: TestInput,
    pub suspected: Option<MutationRule>,
}

/// Aggregated verdict for one implementation over one battery.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationResult {
    pub algorithm: AlgorithmId,
    pub mutant_rule: Option<MutationRule>,
    pub total_cases: usize,
    pub passed: usize,
    pub failures: Vec<CaseFailure>,
}

impl VerificationResult {
    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// One-line human summary.
    pub fn summary(&self) -> String {
        if self.all_passed() {
            format!(
                "{}: {} cases, all invariants held",
                self.algorithm, self.total_cases
            )
        } else {
            format!(
                "{}: {}/{} cases passed, {} invariant violation(s)",
                self.algorithm,
                self.passed,
                self.total_cases,
                self.failures.len()
            )
        }
    }
}
