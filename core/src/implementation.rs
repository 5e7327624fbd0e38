//! Implementation handles: per-category typed runners plus the catalog of
//! built-in references.
//!
//! An [`Implementation`] is a pure function behind a uniform dispatch shape.
//! The runner functions validate that the supplied problem matches the
//! algorithm's input shape and translate it into the typed call the reference
//! module exposes; nothing here holds state across calls, so a single
//! implementation can be exercised from any number of threads.

use crate::algorithm::{cipher, graph, numeric, scheduling, searching, sorting};
use crate::error::HarnessError;
use crate::mutation::MutationRule;
use crate::problem::{
    Forest, GraphProblem, NumericOutcome, NumericProblem, RunOutput, SearchOutcome, SearchProblem,
    TestInput, TreeProblem,
};
use crate::spec::AlgorithmId;

pub type SortFn = fn(&[i64]) -> Result<Vec<i64>, HarnessError>;
pub type KeyedSortFn = fn(&[(i64, u32)]) -> Result<Vec<(i64, u32)>, HarnessError>;
pub type SearchFn = fn(&SearchProblem) -> Result<SearchOutcome, HarnessError>;
pub type NumericFn = fn(&NumericProblem) -> Result<NumericOutcome, HarnessError>;
pub type CipherTextFn = fn(&str, &str) -> Result<String, HarnessError>;
pub type CheckDigitFn = fn(&[u32], u32) -> Result<u32, HarnessError>;
pub type ValidateFn = fn(&[u32], u32) -> Result<bool, HarnessError>;
pub type MacFn = fn(&[u8], &[u8]) -> Result<u64, HarnessError>;
pub type GraphFn = fn(&GraphProblem) -> Result<Forest, HarnessError>;
pub type TraversalFn = fn(&TreeProblem) -> Result<Vec<i64>, HarnessError>;
pub type ScheduleFn = fn(&[(u32, u32)]) -> Result<Vec<usize>, HarnessError>;

/// Cipher runners come in three shapes: invertible text ciphers, check-digit
/// schemes, and one-way authentication codes.
#[derive(Debug, Clone, Copy)]
pub enum CipherRunner {
    RoundTrip {
        encrypt: CipherTextFn,
        decrypt: CipherTextFn,
    },
    CheckDigit {
        generate: CheckDigitFn,
        validate: ValidateFn,
    },
    Mac(MacFn),
}

/// Typed entry point for one implementation, dispatched by category.
#[derive(Debug, Clone, Copy)]
pub enum Runner {
    Sort {
        plain: SortFn,
        /// Tag-preserving variant used for stability checking; absent for
        /// sorts that make no stability promise.
        keyed: Option<KeyedSortFn>,
    },
    Search(SearchFn),
    Numeric(NumericFn),
    Cipher(CipherRunner),
    Graph(GraphFn),
    Traversal(TraversalFn),
    Schedule(ScheduleFn),
}

/// Whether an implementation is trusted or a cataloged mutant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImplKind {
    Reference,
    Mutant(MutationRule),
}

/// A named, pure implementation under a fixed contract.
#[derive(Debug, Clone)]
pub struct Implementation {
    pub id: AlgorithmId,
    pub kind: ImplKind,
    pub runner: Runner,
}

impl Implementation {
    pub fn reference(name: &str, runner: Runner) -> Self {
        Self {
            id: AlgorithmId::new(name),
            kind: ImplKind::Reference,
            runner,
        }
    }

    pub fn mutant(name: &str, rule: MutationRule, runner: Runner) -> Self {
        Self {
            id: AlgorithmId::new(name),
            kind: ImplKind::Mutant(rule),
            runner,
        }
    }
}

fn shape_mismatch(expected: &str) -> HarnessError {
    HarnessError::invalid_input(format!("input does not match expected shape: {expected}"))
}

// Sorting runners.

fn run_merge_sort(input: &[i64]) -> Result<Vec<i64>, HarnessError> {
    Ok(sorting::merge_sort(input))
}

fn run_merge_sort_keyed(input: &[(i64, u32)]) -> Result<Vec<(i64, u32)>, HarnessError> {
    Ok(sorting::merge_sort_by(input, &|a, b| a.0.cmp(&b.0)))
}

fn run_selection_sort(input: &[i64]) -> Result<Vec<i64>, HarnessError> {
    Ok(sorting::selection_sort(input))
}

fn run_odd_even_sort(input: &[i64]) -> Result<Vec<i64>, HarnessError> {
    Ok(sorting::odd_even_sort(input))
}

fn run_odd_even_sort_keyed(input: &[(i64, u32)]) -> Result<Vec<(i64, u32)>, HarnessError> {
    Ok(sorting::odd_even_sort_by(input, &|a, b| a.0.cmp(&b.0)))
}

fn run_batcher_sort(input: &[i64]) -> Result<Vec<i64>, HarnessError> {
    Ok(sorting::batcher_odd_even_merge_sort(input))
}

fn run_counting_sort(input: &[i64]) -> Result<Vec<i64>, HarnessError> {
    sorting::counting_sort(input)
}

// Search runners.

fn sorted_parts(problem: &SearchProblem) -> Result<(&[i64], i64), HarnessError> {
    match problem {
        SearchProblem::Sorted { haystack, target } => Ok((haystack, *target)),
        _ => Err(shape_mismatch("sorted haystack plus target")),
    }
}

fn run_binary_search(problem: &SearchProblem) -> Result<SearchOutcome, HarnessError> {
    let (haystack, target) = sorted_parts(problem)?;
    searching::binary_search(haystack, target)
}

fn run_jump_search(problem: &SearchProblem) -> Result<SearchOutcome, HarnessError> {
    let (haystack, target) = sorted_parts(problem)?;
    searching::jump_search(haystack, target)
}

fn run_exponential_search(problem: &SearchProblem) -> Result<SearchOutcome, HarnessError> {
    let (haystack, target) = sorted_parts(problem)?;
    searching::exponential_search(haystack, target)
}

fn run_multiplicative_binary_search(
    problem: &SearchProblem,
) -> Result<SearchOutcome, HarnessError> {
    let (haystack, target) = sorted_parts(problem)?;
    searching::multiplicative_binary_search(haystack, target)
}

fn run_depth_limited_search(problem: &SearchProblem) -> Result<SearchOutcome, HarnessError> {
    match problem {
        SearchProblem::Graph {
            adjacency,
            start,
            goal,
            depth_limit: Some(limit),
        } => searching::depth_limited_search(adjacency, *start, *goal, *limit),
        SearchProblem::Graph {
            depth_limit: None, ..
        } => Err(shape_mismatch("graph problem with a depth limit")),
        _ => Err(shape_mismatch("graph plus start, goal, and depth limit")),
    }
}

fn run_stack_search(problem: &SearchProblem) -> Result<SearchOutcome, HarnessError> {
    match problem {
        SearchProblem::Graph {
            adjacency,
            start,
            goal,
            ..
        } => searching::stack_search(adjacency, *start, *goal),
        _ => Err(shape_mismatch("graph plus start and goal")),
    }
}

fn run_trigram_search(problem: &SearchProblem) -> Result<SearchOutcome, HarnessError> {
    match problem {
        SearchProblem::Text { haystack, needle } => searching::trigram_search(haystack, needle),
        _ => Err(shape_mismatch("text haystack plus needle")),
    }
}

// Numeric runners. Root-finding problems arrive as polynomial coefficients
// and are wrapped into the closures the algorithms take.

fn run_bisection(problem: &NumericProblem) -> Result<NumericOutcome, HarnessError> {
    match problem {
        NumericProblem::Bisection {
            poly,
            a,
            b,
            tol,
            max_iter,
        } => {
            let f = |x: f64| numeric::eval_poly(poly, x);
            let (value, iterations) = numeric::bisection(f, *a, *b, *tol, *max_iter)?;
            Ok(NumericOutcome { value, iterations })
        }
        _ => Err(shape_mismatch("bisection problem")),
    }
}

fn run_fixed_point(problem: &NumericProblem) -> Result<NumericOutcome, HarnessError> {
    match problem {
        NumericProblem::FixedPoint {
            poly,
            x0,
            tol,
            max_iter,
        } => {
            let g = |x: f64| numeric::eval_poly(poly, x);
            let (value, iterations) = numeric::fixed_point(g, *x0, *tol, *max_iter)?;
            Ok(NumericOutcome { value, iterations })
        }
        _ => Err(shape_mismatch("fixed-point problem")),
    }
}

fn run_householder(problem: &NumericProblem) -> Result<NumericOutcome, HarnessError> {
    match problem {
        NumericProblem::Householder {
            poly,
            x0,
            tol,
            max_iter,
        } => {
            let d1 = numeric::poly_derivative(poly);
            let d2 = numeric::poly_derivative(&d1);
            let (value, iterations) = numeric::householder(
                |x| numeric::eval_poly(poly, x),
                |x| numeric::eval_poly(&d1, x),
                |x| numeric::eval_poly(&d2, x),
                *x0,
                *tol,
                *max_iter,
            )?;
            Ok(NumericOutcome { value, iterations })
        }
        _ => Err(shape_mismatch("householder problem")),
    }
}

fn run_heron(problem: &NumericProblem) -> Result<NumericOutcome, HarnessError> {
    match problem {
        NumericProblem::Heron {
            value,
            tol,
            max_iter,
        } => {
            let (root, iterations) = numeric::heron_sqrt(*value, *tol, *max_iter)?;
            Ok(NumericOutcome {
                value: root,
                iterations,
            })
        }
        _ => Err(shape_mismatch("heron problem")),
    }
}

fn run_rk4(problem: &NumericProblem) -> Result<NumericOutcome, HarnessError> {
    match problem {
        NumericProblem::Rk4 {
            lambda,
            y0,
            t0,
            t1,
            steps,
        } => {
            let value = numeric::rk4(|_, y| lambda * y, *y0, *t0, *t1, *steps)?;
            Ok(NumericOutcome {
                value,
                iterations: *steps,
            })
        }
        _ => Err(shape_mismatch("rk4 problem")),
    }
}

fn run_lentz(problem: &NumericProblem) -> Result<NumericOutcome, HarnessError> {
    match problem {
        NumericProblem::LentzSqrt {
            target,
            tol,
            max_iter,
        } => {
            let (value, iterations) = numeric::lentz_sqrt(*target, *tol, *max_iter)?;
            Ok(NumericOutcome { value, iterations })
        }
        _ => Err(shape_mismatch("continued-fraction problem")),
    }
}

// Graph, traversal, and scheduling runners.

fn run_kruskal(problem: &GraphProblem) -> Result<Forest, HarnessError> {
    graph::kruskal(problem)
}

fn run_preorder(tree: &TreeProblem) -> Result<Vec<i64>, HarnessError> {
    graph::preorder(tree)
}

fn run_inorder(tree: &TreeProblem) -> Result<Vec<i64>, HarnessError> {
    graph::inorder(tree)
}

fn run_postorder(tree: &TreeProblem) -> Result<Vec<i64>, HarnessError> {
    graph::postorder(tree)
}

fn run_johnson(jobs: &[(u32, u32)]) -> Result<Vec<usize>, HarnessError> {
    scheduling::johnson_rule(jobs)
}

/// Look up the built-in reference implementation for an algorithm name.
pub fn reference(name: &str) -> Option<Implementation> {
    let runner = match name {
        "merge_sort" => Runner::Sort {
            plain: run_merge_sort,
            keyed: Some(run_merge_sort_keyed),
        },
        "selection_sort" => Runner::Sort {
            plain: run_selection_sort,
            keyed: None,
        },
        "odd_even_sort" => Runner::Sort {
            plain: run_odd_even_sort,
            keyed: Some(run_odd_even_sort_keyed),
        },
        "batcher_odd_even_merge_sort" => Runner::Sort {
            plain: run_batcher_sort,
            keyed: None,
        },
        "counting_sort" => Runner::Sort {
            plain: run_counting_sort,
            keyed: None,
        },
        "binary_search" => Runner::Search(run_binary_search),
        "jump_search" => Runner::Search(run_jump_search),
        "exponential_search" => Runner::Search(run_exponential_search),
        "multiplicative_binary_search" => Runner::Search(run_multiplicative_binary_search),
        "depth_limited_search" => Runner::Search(run_depth_limited_search),
        "stack_search" => Runner::Search(run_stack_search),
        "trigram_search" => Runner::Search(run_trigram_search),
        "bisection" => Runner::Numeric(run_bisection),
        "fixed_point" => Runner::Numeric(run_fixed_point),
        "householder" => Runner::Numeric(run_householder),
        "heron_sqrt" => Runner::Numeric(run_heron),
        "rk4" => Runner::Numeric(run_rk4),
        "lentz_sqrt" => Runner::Numeric(run_lentz),
        "polybius" => Runner::Cipher(CipherRunner::RoundTrip {
            encrypt: cipher::polybius_encrypt,
            decrypt: cipher::polybius_decrypt,
        }),
        "autokey" => Runner::Cipher(CipherRunner::RoundTrip {
            encrypt: cipher::autokey_encrypt,
            decrypt: cipher::autokey_decrypt,
        }),
        "luhn_mod_n" => Runner::Cipher(CipherRunner::CheckDigit {
            generate: cipher::luhn_mod_n_check_digit,
            validate: cipher::luhn_mod_n_validate,
        }),
        "one_key_mac" => Runner::Cipher(CipherRunner::Mac(cipher::one_key_mac)),
        "kruskal" => Runner::Graph(run_kruskal),
        "preorder_traversal" => Runner::Traversal(run_preorder),
        "inorder_traversal" => Runner::Traversal(run_inorder),
        "postorder_traversal" => Runner::Traversal(run_postorder),
        "johnson_rule" => Runner::Schedule(run_johnson),
        _ => return None,
    };
    Some(Implementation::reference(name, runner))
}

/// Execute an implementation against a generic input, the one-shot
/// `run(name, inputs)` surface. Shape mismatches fail with `InvalidInput`.
pub fn execute(imp: &Implementation, input: &TestInput) -> Result<RunOutput, HarnessError> {
    match (&imp.runner, input) {
        (Runner::Sort { plain, .. }, TestInput::Sequence(values)) => {
            plain(values).map(RunOutput::Sorted)
        }
        (Runner::Sort { keyed: Some(keyed), .. }, TestInput::Keyed(values)) => {
            keyed(values).map(RunOutput::KeyedSorted)
        }
        (Runner::Search(search), TestInput::Search(problem)) => {
            search(problem).map(RunOutput::Search)
        }
        (Runner::Numeric(run), TestInput::Numeric(problem)) => {
            run(problem).map(RunOutput::Numeric)
        }
        (
            Runner::Cipher(CipherRunner::RoundTrip { encrypt, .. }),
            TestInput::CipherText { plaintext, key },
        ) => encrypt(plaintext, key).map(RunOutput::Ciphertext),
        (
            Runner::Cipher(CipherRunner::CheckDigit { generate, .. }),
            TestInput::CheckDigits { digits, modulus },
        ) => generate(digits, *modulus).map(RunOutput::CheckDigit),
        (Runner::Cipher(CipherRunner::Mac(mac)), TestInput::MacMessage { key, message }) => {
            mac(key, message).map(RunOutput::Mac)
        }
        (Runner::Graph(run), TestInput::Graph(problem)) => run(problem).map(RunOutput::Forest),
        (Runner::Traversal(run), TestInput::Tree(tree)) => run(tree).map(RunOutput::Visits),
        (Runner::Schedule(run), TestInput::Jobs(jobs)) => run(jobs).map(RunOutput::JobOrder),
        _ => Err(shape_mismatch("input shape for this algorithm's category")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_lookup() {
        assert!(reference("merge_sort").is_some());
        assert!(reference("kruskal").is_some());
        assert!(reference("quantum_sort").is_none());
    }

    #[test]
    fn test_execute_sort() {
        let imp = reference("merge_sort").unwrap();
        let output = execute(&imp, &TestInput::Sequence(vec![5, 3, 8, 1])).unwrap();
        assert_eq!(output, RunOutput::Sorted(vec![1, 3, 5, 8]));
    }

    #[test]
    fn test_execute_shape_mismatch() {
        let imp = reference("merge_sort").unwrap();
        let err = execute(
            &imp,
            &TestInput::CipherText {
                plaintext: "A".into(),
                key: "B".into(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, HarnessError::InvalidInput(_)));
    }

    #[test]
    fn test_execute_search() {
        let imp = reference("binary_search").unwrap();
        let input = TestInput::Search(SearchProblem::Sorted {
            haystack: vec![1, 3, 5, 7, 9],
            target: 7,
        });
        assert_eq!(
            execute(&imp, &input).unwrap(),
            RunOutput::Search(SearchOutcome::Found(3))
        );
    }
}
