//! Problem and outcome shapes shared by runners, the verifier, and the CLI.
//!
//! Every implementation is a pure function over one of these immutable input
//! shapes. Generated test cases, the one-shot `run` surface, and the mutation
//! catalog all speak this vocabulary, which keeps the per-category dispatch in
//! one place.

use serde::{Deserialize, Serialize};

/// Outcome of a search. `Cutoff` is a first-class outcome, distinct from
/// `NotFound`: it means a depth or resource bound was hit before the search
/// space was exhausted, so absence was never established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchOutcome {
    /// For array searches the payload is the matching index; for graph
    /// searches it is the depth at which the goal was reached.
    Found(usize),
    NotFound,
    Cutoff,
}

/// Input to a search implementation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchProblem {
    /// Sorted haystack plus target, for the dichotomic family.
    Sorted { haystack: Vec<i64>, target: i64 },
    /// Unweighted directed graph given as adjacency lists, with an optional
    /// depth bound for depth-limited search.
    Graph {
        adjacency: Vec<Vec<usize>>,
        start: usize,
        goal: usize,
        depth_limit: Option<usize>,
    },
    /// Substring search over text.
    Text { haystack: String, needle: String },
}

/// Input to a numeric implementation. Root-finding problems carry polynomial
/// coefficients (constant term first) so generated instances have checkable
/// answers; the runners wrap these into the function handles the algorithms
/// actually take.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumericProblem {
    Bisection {
        poly: Vec<f64>,
        a: f64,
        b: f64,
        tol: f64,
        max_iter: usize,
    },
    /// Iterates x <- g(x) where g is the given polynomial.
    FixedPoint {
        poly: Vec<f64>,
        x0: f64,
        tol: f64,
        max_iter: usize,
    },
    /// Householder's method of order two (Halley) on the given polynomial.
    Householder {
        poly: Vec<f64>,
        x0: f64,
        tol: f64,
        max_iter: usize,
    },
    /// Heron's square-root iteration for `value`.
    Heron {
        value: f64,
        tol: f64,
        max_iter: usize,
    },
    /// Classic fourth-order Runge-Kutta on y' = lambda * y, which has the
    /// closed form y(t) = y0 * exp(lambda * (t - t0)).
    Rk4 {
        lambda: f64,
        y0: f64,
        t0: f64,
        t1: f64,
        steps: usize,
    },
    /// Lentz evaluation of the continued fraction for sqrt(target):
    /// m + r/(2m + r/(2m + ...)) with m = floor(sqrt(target)), r = target - m^2.
    LentzSqrt {
        target: f64,
        tol: f64,
        max_iter: usize,
    },
}

/// Result of a numeric implementation that converged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericOutcome {
    pub value: f64,
    pub iterations: usize,
}

/// Weighted undirected graph for spanning-forest problems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphProblem {
    pub nodes: usize,
    /// Undirected weighted edges (u, v, weight).
    pub edges: Vec<(usize, usize, f64)>,
}

/// An edge set selected from a [`GraphProblem`], plus its total weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forest {
    /// Indices into the problem's edge list.
    pub edge_indices: Vec<usize>,
    pub total_weight: f64,
}

/// Binary tree given as an arena of nodes plus a root index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeProblem {
    pub nodes: Vec<TreeNode>,
    pub root: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub value: i64,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

impl TreeProblem {
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Every input shape the harness understands, used by generated test cases
/// and the one-shot `run` surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestInput {
    /// Plain sequence for sorting.
    Sequence(Vec<i64>),
    /// Value plus original-position tag, for stability checks.
    Keyed(Vec<(i64, u32)>),
    Search(SearchProblem),
    Numeric(NumericProblem),
    /// Plaintext and key for a round-trip cipher.
    CipherText { plaintext: String, key: String },
    /// Symbol values and modulus for a check-digit scheme.
    CheckDigits { digits: Vec<u32>, modulus: u32 },
    /// Key and message for a one-key MAC.
    MacMessage { key: Vec<u8>, message: Vec<u8> },
    Graph(GraphProblem),
    Tree(TreeProblem),
    /// Two-machine job durations (machine A, machine B).
    Jobs(Vec<(u32, u32)>),
}

/// Every output shape an implementation can produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunOutput {
    Sorted(Vec<i64>),
    KeyedSorted(Vec<(i64, u32)>),
    Search(SearchOutcome),
    Numeric(NumericOutcome),
    Ciphertext(String),
    CheckDigit(u32),
    Mac(u64),
    Forest(Forest),
    Visits(Vec<i64>),
    JobOrder(Vec<usize>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_outcome_serde() {
        let json = serde_json::to_string(&SearchOutcome::Found(3)).unwrap();
        let back: SearchOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SearchOutcome::Found(3));

        assert_ne!(SearchOutcome::NotFound, SearchOutcome::Cutoff);
    }

    #[test]
    fn test_test_input_json_shape() {
        let input = TestInput::Sequence(vec![5, 3, 8, 1]);
        let json = serde_json::to_string(&input).unwrap();
        let back: TestInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, back);
    }
}
