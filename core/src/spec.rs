//! Algorithm contract definitions for the VERITAS correctness observatory
//!
//! This module establishes the specification vocabulary shared by the whole
//! harness: algorithm identifiers, categories, and the named invariants an
//! implementation must uphold to be considered correct. A specification is
//! the single source of truth for correctness; implementations never get to
//! redefine what "correct" means, they either satisfy the registered
//! invariants or fail verification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Universal algorithm identifier for type-safe dispatch.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AlgorithmId(String);

impl AlgorithmId {
    pub fn new(name: &str) -> Self {
        Self(name.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Algorithm category used for registry grouping and verification dispatch.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sort,
    Search,
    Numeric,
    Cipher,
    Graph,
    Scheduling,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Sort,
        Category::Search,
        Category::Numeric,
        Category::Cipher,
        Category::Graph,
        Category::Scheduling,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Sort => "sort",
            Category::Search => "search",
            Category::Numeric => "numeric",
            Category::Cipher => "cipher",
            Category::Graph => "graph",
            Category::Scheduling => "scheduling",
        };
        f.write_str(name)
    }
}

/// Named postcondition an implementation must satisfy on every valid input.
///
/// The verifier knows how to check each of these for the category it applies
/// to; a specification simply lists which ones bind.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvariantKind {
    /// Output is a permutation of the input (no element lost or invented).
    Permutation,
    /// Output is in non-decreasing order.
    NonDecreasing,
    /// Equal elements retain their relative input order.
    Stable,
    /// A `Found(i)` outcome points at an actual occurrence of the target.
    FoundIndexValid,
    /// An absent target yields `NotFound`, never a fabricated index.
    AbsentMeansNotFound,
    /// A hit depth bound yields `Cutoff`, which is never conflated with
    /// `NotFound`.
    CutoffDistinct,
    /// The iterate returned by a numeric method lands within tolerance of
    /// the true answer, or the method reports non-convergence honestly.
    Converged,
    /// `decrypt(encrypt(x, k), k) == x` for every valid plaintext and key.
    RoundTrip,
    /// A generated check value validates, and any single-symbol corruption
    /// is rejected.
    ChecksumDetectsSingleError,
    /// Same input, same output, every time.
    Deterministic,
    /// The returned edge set is acyclic and spans every connected component.
    ValidForest,
    /// Total weight of the returned forest is minimal among all spanning
    /// forests.
    MinimalWeight,
    /// The returned job order achieves the minimum two-machine makespan.
    MinimalMakespan,
    /// Traversal emits nodes in the order the traversal discipline defines.
    VisitOrder,
}

impl fmt::Display for InvariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InvariantKind::Permutation => "permutation",
            InvariantKind::NonDecreasing => "non-decreasing",
            InvariantKind::Stable => "stable",
            InvariantKind::FoundIndexValid => "found-index-valid",
            InvariantKind::AbsentMeansNotFound => "absent-means-not-found",
            InvariantKind::CutoffDistinct => "cutoff-distinct",
            InvariantKind::Converged => "converged",
            InvariantKind::RoundTrip => "round-trip",
            InvariantKind::ChecksumDetectsSingleError => "checksum-detects-single-error",
            InvariantKind::Deterministic => "deterministic",
            InvariantKind::ValidForest => "valid-forest",
            InvariantKind::MinimalWeight => "minimal-weight",
            InvariantKind::MinimalMakespan => "minimal-makespan",
            InvariantKind::VisitOrder => "visit-order",
        };
        f.write_str(name)
    }
}

/// Immutable contract for one algorithm: what goes in, what comes out, and
/// which invariants bind the relationship.
///
/// Constructed once at registry initialization and never mutated afterwards.
/// The complexity note is informational only; verification checks functional
/// correctness, not asymptotics.
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmSpec {
    pub id: AlgorithmId,
    pub category: Category,
    /// Human-readable description of the accepted input shape.
    pub input_shape: &'static str,
    /// Human-readable description of the produced output shape.
    pub output_shape: &'static str,
    /// Invariants the verifier enforces for this algorithm.
    pub invariants: Vec<InvariantKind>,
    /// Non-binding asymptotic note, carried over from the source material.
    pub complexity_note: &'static str,
}

impl AlgorithmSpec {
    pub fn new(
        name: &str,
        category: Category,
        input_shape: &'static str,
        output_shape: &'static str,
        invariants: Vec<InvariantKind>,
        complexity_note: &'static str,
    ) -> Self {
        Self {
            id: AlgorithmId::new(name),
            category,
            input_shape,
            output_shape,
            invariants,
            complexity_note,
        }
    }

    pub fn requires(&self, invariant: InvariantKind) -> bool {
        self.invariants.contains(&invariant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_id_equality() {
        let id1 = AlgorithmId::new("merge_sort");
        let id2 = AlgorithmId::new("binary_search");
        let id3 = AlgorithmId::new("merge_sort");

        assert_ne!(id1, id2);
        assert_eq!(id1, id3);
        assert_eq!(id1.as_str(), "merge_sort");
    }

    #[test]
    fn test_spec_requires() {
        let spec = AlgorithmSpec::new(
            "merge_sort",
            Category::Sort,
            "sequence of comparable items",
            "sorted permutation of the input",
            vec![
                InvariantKind::Permutation,
                InvariantKind::NonDecreasing,
                InvariantKind::Stable,
            ],
            "O(n log n)",
        );

        assert!(spec.requires(InvariantKind::Stable));
        assert!(!spec.requires(InvariantKind::RoundTrip));
    }

    #[test]
    fn test_category_display_roundtrip() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            let back: Category = serde_json::from_str(&json).unwrap();
            assert_eq!(category, back);
        }
    }
}
