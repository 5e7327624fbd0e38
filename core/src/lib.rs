//! VERITAS core: reference algorithms, contracts, and the verification
//! engine.
//!
//! The crate pairs a registry of algorithm contracts with trusted reference
//! implementations and a catalog of deliberately planted bugs. The verifier
//! generates seeded input batteries, checks every listed invariant, shrinks
//! counterexamples, and tags failures with the bug class they resemble. The
//! mutation catalog closes the loop: a verifier worth trusting must flag
//! every cataloged mutant.

pub mod algorithm;
pub mod error;
pub mod implementation;
pub mod mutation;
pub mod problem;
pub mod registry;
pub mod spec;
pub mod verifier;

pub use error::HarnessError;
pub use implementation::{execute, reference, ImplKind, Implementation, Runner};
pub use mutation::{catalog, mutant, mutated_source, MutationRule};
pub use problem::{RunOutput, SearchOutcome, TestInput};
pub use registry::Registry;
pub use spec::{AlgorithmId, AlgorithmSpec, Category, InvariantKind};
pub use verifier::{VerificationResult, Verifier, VerifierConfig};
