//! The algorithm specification registry.
//!
//! Populated once at startup with one [`AlgorithmSpec`] per supported
//! algorithm and read-only afterwards. Lookup misuse is a hard error;
//! an empty category is an ordinary empty listing, not an error.

use std::collections::BTreeMap;

use crate::error::HarnessError;
use crate::spec::{AlgorithmId, AlgorithmSpec, Category, InvariantKind};

#[derive(Debug, Default)]
pub struct Registry {
    specs: BTreeMap<AlgorithmId, AlgorithmSpec>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a spec. Fails with `DuplicateSpec` when the name is taken.
    pub fn register(&mut self, spec: AlgorithmSpec) -> Result<(), HarnessError> {
        if self.specs.contains_key(&spec.id) {
            return Err(HarnessError::DuplicateSpec(spec.id));
        }
        log::debug!("registering spec {} ({})", spec.id, spec.category);
        self.specs.insert(spec.id.clone(), spec);
        Ok(())
    }

    /// Look up a spec by name. Fails with `UnknownAlgorithm` when absent.
    pub fn get(&self, name: &str) -> Result<&AlgorithmSpec, HarnessError> {
        self.specs
            .get(&AlgorithmId::new(name))
            .ok_or_else(|| HarnessError::UnknownAlgorithm(AlgorithmId::new(name)))
    }

    /// Lazy, restartable listing of the specs in one category, in name order.
    pub fn list_by_category(
        &self,
        category: Category,
    ) -> impl Iterator<Item = &AlgorithmSpec> + '_ {
        self.specs
            .values()
            .filter(move |spec| spec.category == category)
    }

    /// All specs in name order.
    pub fn iter(&self) -> impl Iterator<Item = &AlgorithmSpec> + '_ {
        self.specs.values()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// The full built-in catalog. Registration of a fixed catalog cannot
    /// collide, so construction is infallible.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for spec in builtin_specs() {
            // Names in the builtin table are unique by construction.
            let id = spec.id.clone();
            if let Err(error) = registry.register(spec) {
                unreachable!("builtin catalog registered {id} twice: {error}");
            }
        }
        registry
    }
}

fn sort_invariants(stable: bool) -> Vec<InvariantKind> {
    let mut invariants = vec![InvariantKind::Permutation, InvariantKind::NonDecreasing];
    if stable {
        invariants.push(InvariantKind::Stable);
    }
    invariants
}

fn array_search_invariants() -> Vec<InvariantKind> {
    vec![
        InvariantKind::FoundIndexValid,
        InvariantKind::AbsentMeansNotFound,
    ]
}

fn builtin_specs() -> Vec<AlgorithmSpec> {
    vec![
        AlgorithmSpec::new(
            "merge_sort",
            Category::Sort,
            "sequence of comparable items",
            "sorted permutation of the input",
            sort_invariants(true),
            "O(n log n) time, O(n) space",
        ),
        AlgorithmSpec::new(
            "selection_sort",
            Category::Sort,
            "sequence of comparable items",
            "sorted permutation of the input",
            sort_invariants(false),
            "O(n^2) time, O(1) auxiliary space",
        ),
        AlgorithmSpec::new(
            "odd_even_sort",
            Category::Sort,
            "sequence of comparable items",
            "sorted permutation of the input",
            sort_invariants(true),
            "O(n^2) time",
        ),
        AlgorithmSpec::new(
            "batcher_odd_even_merge_sort",
            Category::Sort,
            "sequence of comparable items, any length",
            "sorted permutation of the input",
            sort_invariants(false),
            "O(n log^2 n) comparators",
        ),
        AlgorithmSpec::new(
            "counting_sort",
            Category::Sort,
            "sequence of integers from a bounded universe",
            "sorted permutation of the input",
            sort_invariants(false),
            "O(n + k) time and space for key span k",
        ),
        AlgorithmSpec::new(
            "binary_search",
            Category::Search,
            "sorted sequence plus target",
            "index of an occurrence, or not-found",
            array_search_invariants(),
            "O(log n)",
        ),
        AlgorithmSpec::new(
            "jump_search",
            Category::Search,
            "sorted sequence plus target",
            "index of an occurrence, or not-found",
            array_search_invariants(),
            "O(sqrt n)",
        ),
        AlgorithmSpec::new(
            "exponential_search",
            Category::Search,
            "sorted sequence plus target",
            "index of an occurrence, or not-found",
            array_search_invariants(),
            "O(log i) for match position i",
        ),
        AlgorithmSpec::new(
            "multiplicative_binary_search",
            Category::Search,
            "sorted sequence plus target",
            "index of an occurrence, or not-found",
            array_search_invariants(),
            "O(log n)",
        ),
        AlgorithmSpec::new(
            "depth_limited_search",
            Category::Search,
            "graph, start, goal, and depth bound",
            "found at depth d, cutoff, or not-found",
            vec![
                InvariantKind::FoundIndexValid,
                InvariantKind::AbsentMeansNotFound,
                InvariantKind::CutoffDistinct,
            ],
            "O(b^l) for branching factor b and limit l",
        ),
        AlgorithmSpec::new(
            "stack_search",
            Category::Search,
            "graph, start, and goal",
            "found at depth d, or not-found",
            vec![
                InvariantKind::FoundIndexValid,
                InvariantKind::AbsentMeansNotFound,
            ],
            "O(V + E)",
        ),
        AlgorithmSpec::new(
            "trigram_search",
            Category::Search,
            "text haystack plus needle",
            "byte offset of first occurrence, or not-found",
            array_search_invariants(),
            "O(n) indexing, candidate-confirm lookups",
        ),
        AlgorithmSpec::new(
            "bisection",
            Category::Numeric,
            "continuous f with a sign change on [a, b], tolerance, budget",
            "approximate root",
            vec![InvariantKind::Converged, InvariantKind::Deterministic],
            "O(log((b-a)/tol)) iterations",
        ),
        AlgorithmSpec::new(
            "fixed_point",
            Category::Numeric,
            "contraction g, starting point, tolerance, budget",
            "approximate fixed point",
            vec![InvariantKind::Converged, InvariantKind::Deterministic],
            "linear convergence for contractions",
        ),
        AlgorithmSpec::new(
            "householder",
            Category::Numeric,
            "f with two derivatives, starting point, tolerance, budget",
            "approximate root",
            vec![InvariantKind::Converged, InvariantKind::Deterministic],
            "cubic convergence near simple roots",
        ),
        AlgorithmSpec::new(
            "heron_sqrt",
            Category::Numeric,
            "non-negative number, tolerance, budget",
            "approximate square root",
            vec![InvariantKind::Converged, InvariantKind::Deterministic],
            "quadratic convergence",
        ),
        AlgorithmSpec::new(
            "rk4",
            Category::Numeric,
            "ODE right-hand side, initial value, interval, step count",
            "approximate terminal value",
            vec![InvariantKind::Converged, InvariantKind::Deterministic],
            "O(h^4) local truncation error",
        ),
        AlgorithmSpec::new(
            "lentz_sqrt",
            Category::Numeric,
            "positive target, tolerance, budget",
            "continued-fraction value of sqrt(target)",
            vec![InvariantKind::Converged, InvariantKind::Deterministic],
            "linear convergence per partial quotient",
        ),
        AlgorithmSpec::new(
            "polybius",
            Category::Cipher,
            "uppercase plaintext without J, plus key",
            "digit-pair ciphertext",
            vec![InvariantKind::RoundTrip, InvariantKind::Deterministic],
            "O(n)",
        ),
        AlgorithmSpec::new(
            "autokey",
            Category::Cipher,
            "uppercase plaintext plus non-empty key",
            "uppercase ciphertext",
            vec![InvariantKind::RoundTrip, InvariantKind::Deterministic],
            "O(n)",
        ),
        AlgorithmSpec::new(
            "luhn_mod_n",
            Category::Cipher,
            "symbol values below modulus N >= 2",
            "check digit",
            vec![
                InvariantKind::ChecksumDetectsSingleError,
                InvariantKind::Deterministic,
            ],
            "O(n)",
        ),
        AlgorithmSpec::new(
            "one_key_mac",
            Category::Cipher,
            "non-empty key plus message bytes",
            "64-bit authentication tag",
            vec![InvariantKind::Deterministic],
            "O(n)",
        ),
        AlgorithmSpec::new(
            "kruskal",
            Category::Graph,
            "weighted undirected edge list",
            "minimum spanning forest",
            vec![InvariantKind::ValidForest, InvariantKind::MinimalWeight],
            "O(E log E)",
        ),
        AlgorithmSpec::new(
            "preorder_traversal",
            Category::Graph,
            "binary tree",
            "node values, node before children",
            vec![InvariantKind::VisitOrder],
            "O(n)",
        ),
        AlgorithmSpec::new(
            "inorder_traversal",
            Category::Graph,
            "binary tree",
            "node values, left subtree before node before right",
            vec![InvariantKind::VisitOrder],
            "O(n)",
        ),
        AlgorithmSpec::new(
            "postorder_traversal",
            Category::Graph,
            "binary tree",
            "node values, children before node",
            vec![InvariantKind::VisitOrder],
            "O(n)",
        ),
        AlgorithmSpec::new(
            "johnson_rule",
            Category::Scheduling,
            "two-machine processing-time pairs",
            "job order minimizing makespan",
            vec![InvariantKind::MinimalMakespan],
            "O(n log n)",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_populated() {
        let registry = Registry::builtin();
        assert_eq!(registry.len(), 27);
        assert!(registry.get("merge_sort").is_ok());
        assert!(registry.get("kruskal").is_ok());
    }

    #[test]
    fn test_unknown_algorithm() {
        let registry = Registry::builtin();
        let err = registry.get("bogo_sort").unwrap_err();
        assert!(matches!(err, HarnessError::UnknownAlgorithm(_)));
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = Registry::builtin();
        let spec = registry.get("merge_sort").unwrap().clone();
        let err = registry.register(spec).unwrap_err();
        assert!(matches!(err, HarnessError::DuplicateSpec(_)));
    }

    #[test]
    fn test_list_by_category_is_restartable() {
        let registry = Registry::builtin();
        let listing = registry.list_by_category(Category::Sort);
        assert_eq!(listing.count(), 5);
        // Restart: a fresh iterator sees the same specs.
        assert_eq!(registry.list_by_category(Category::Sort).count(), 5);
    }

    #[test]
    fn test_every_spec_has_a_reference_implementation() {
        let registry = Registry::builtin();
        for spec in registry.iter() {
            assert!(
                crate::implementation::reference(spec.id.as_str()).is_some(),
                "no reference implementation for {}",
                spec.id
            );
        }
    }
}
