//! Error taxonomy for the harness.
//!
//! Registry misuse and precondition violations are hard errors raised
//! immediately; a detected incorrect implementation is never an error here.
//! That outcome is recorded as a failure inside a
//! [`VerificationResult`](crate::verifier::VerificationResult) instead, so it
//! can be reported rather than swallowed by error plumbing.

use thiserror::Error;

use crate::spec::AlgorithmId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HarnessError {
    /// The caller violated a precondition (unsorted input to a sorted-array
    /// search, modulus below 2, empty key, malformed tree, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Lookup of a name the registry has never seen.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(AlgorithmId),

    /// Attempt to register the same algorithm name twice.
    #[error("duplicate spec: {0}")]
    DuplicateSpec(AlgorithmId),

    /// An iterative numeric method exhausted its iteration budget. The best
    /// iterate and its residual are carried so callers can decide whether
    /// near-convergence is acceptable.
    #[error("no convergence after {iterations} iterations (best iterate {best}, residual {residual})")]
    NonConvergence {
        best: f64,
        residual: f64,
        iterations: usize,
    },
}

impl HarnessError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        HarnessError::InvalidInput(msg.into())
    }
}
