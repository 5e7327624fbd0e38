//! Invariant checks.
//!
//! Each check takes the contract, the implementation under test, and one
//! input, runs the implementation, and reports every invariant the output
//! breaks. Where a violation matches the signature of a cataloged bug class,
//! the check attaches the suspected rule; the suspicion is a diagnostic hint,
//! not part of the pass/fail verdict.

use std::collections::VecDeque;

use crate::algorithm::{graph, numeric, scheduling};
use crate::error::HarnessError;
use crate::implementation::{execute, CipherRunner, Implementation, Runner};
use crate::mutation::MutationRule;
use crate::problem::{
    GraphProblem, NumericProblem, RunOutput, SearchOutcome, SearchProblem, TestInput, TreeProblem,
};
use crate::spec::{AlgorithmSpec, Category, InvariantKind};
use crate::verifier::report::Violation;

/// Residual bound for root-style numeric checks. Generated instances use
/// tolerances far below this, so only genuinely wrong iterates trip it.
const NUMERIC_RESIDUAL_BOUND: f64 = 1e-4;

/// Relative error bound for the Runge-Kutta closed-form comparison.
const RK4_RELATIVE_BOUND: f64 = 1e-4;

/// Run one implementation against one input and collect every invariant
/// violation the output exhibits.
pub fn check(spec: &AlgorithmSpec, imp: &Implementation, input: &TestInput) -> Vec<Violation> {
    let mut violations = match spec.category {
        Category::Sort => check_sort(spec, imp, input),
        Category::Search => check_search(spec, imp, input),
        Category::Numeric => check_numeric(spec, input, execute(imp, input)),
        Category::Cipher => check_cipher(spec, imp, input),
        Category::Graph => check_graph(spec, imp, input),
        Category::Scheduling => check_scheduling(spec, imp, input),
    };
    if spec.requires(InvariantKind::Deterministic) {
        violations.extend(check_deterministic(imp, input));
    }
    violations
}

fn unexpected_error(spec: &AlgorithmSpec, err: &HarnessError) -> Violation {
    let invariant = spec
        .invariants
        .first()
        .copied()
        .unwrap_or(InvariantKind::Deterministic);
    Violation::new(invariant, format!("failed on a valid input: {err}"))
}

fn check_deterministic(imp: &Implementation, input: &TestInput) -> Vec<Violation> {
    let first = execute(imp, input);
    let second = execute(imp, input);
    match (first, second) {
        (Ok(a), Ok(b)) if a != b => vec![Violation::new(
            InvariantKind::Deterministic,
            "two runs on the same input disagreed",
        )],
        _ => Vec::new(),
    }
}

// Sorting.

fn multiset_matches(input: &[i64], output: &[i64]) -> bool {
    let mut a = input.to_vec();
    let mut b = output.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

fn check_sort(spec: &AlgorithmSpec, imp: &Implementation, input: &TestInput) -> Vec<Violation> {
    let values = match input {
        TestInput::Sequence(values) => values,
        _ => return Vec::new(),
    };
    let output = match execute(imp, input) {
        Ok(RunOutput::Sorted(out)) => out,
        Ok(_) => return Vec::new(),
        Err(err) => return vec![unexpected_error(spec, &err)],
    };

    let mut violations = Vec::new();
    if output.len() != values.len() {
        violations.push(
            Violation::new(
                InvariantKind::Permutation,
                format!("input has {} elements, output has {}", values.len(), output.len()),
            )
            .suspecting(MutationRule::OffByOneBound),
        );
    } else if !multiset_matches(values, &output) {
        violations.push(
            Violation::new(
                InvariantKind::Permutation,
                "output is not a rearrangement of the input",
            )
            .suspecting(MutationRule::OffByOneBound),
        );
    }

    if let Some(pos) = output.windows(2).position(|w| w[0] > w[1]) {
        let descending = output.windows(2).all(|w| w[0] >= w[1]);
        let suspect = if descending && output.len() > 1 {
            MutationRule::ComparisonFlip
        } else {
            MutationRule::OffByOneBound
        };
        violations.push(
            Violation::new(
                InvariantKind::NonDecreasing,
                format!("order breaks at index {pos}: {} > {}", output[pos], output[pos + 1]),
            )
            .suspecting(suspect),
        );
    }

    if spec.requires(InvariantKind::Stable) {
        if let Runner::Sort { keyed: Some(_), .. } = imp.runner {
            let tagged: Vec<(i64, u32)> = values
                .iter()
                .enumerate()
                .map(|(i, &v)| (v, i as u32))
                .collect();
            match execute(imp, &TestInput::Keyed(tagged)) {
                Ok(RunOutput::KeyedSorted(sorted)) => {
                    let unstable = sorted
                        .windows(2)
                        .any(|w| w[0].0 == w[1].0 && w[0].1 > w[1].1);
                    if unstable {
                        violations.push(
                            Violation::new(
                                InvariantKind::Stable,
                                "equal elements swapped their input order",
                            )
                            .suspecting(MutationRule::OrderReversal),
                        );
                    }
                }
                Ok(_) => {}
                Err(err) => violations.push(unexpected_error(spec, &err)),
            }
        }
    }
    violations
}

// Searching.

fn check_search(spec: &AlgorithmSpec, imp: &Implementation, input: &TestInput) -> Vec<Violation> {
    let problem = match input {
        TestInput::Search(problem) => problem,
        _ => return Vec::new(),
    };
    let outcome = match execute(imp, input) {
        Ok(RunOutput::Search(outcome)) => outcome,
        Ok(_) => return Vec::new(),
        Err(err) => return vec![unexpected_error(spec, &err)],
    };
    match problem {
        SearchProblem::Sorted { haystack, target } => {
            check_array_search(haystack, *target, outcome)
        }
        SearchProblem::Graph {
            adjacency,
            start,
            goal,
            depth_limit,
        } => check_graph_search(spec, adjacency, *start, *goal, *depth_limit, outcome),
        SearchProblem::Text { haystack, needle } => check_text_search(haystack, needle, outcome),
    }
}

fn check_array_search(haystack: &[i64], target: i64, outcome: SearchOutcome) -> Vec<Violation> {
    let present = haystack.contains(&target);
    match outcome {
        SearchOutcome::Found(index) => {
            if haystack.get(index) != Some(&target) {
                vec![Violation::new(
                    InvariantKind::FoundIndexValid,
                    format!("Found({index}) does not point at the target"),
                )
                .suspecting(MutationRule::ComparisonFlip)]
            } else {
                Vec::new()
            }
        }
        SearchOutcome::NotFound if present => {
            // Missing the final occupied slot is the classic short-bound slip.
            let at_edge = haystack.last() == Some(&target);
            let suspect = if at_edge {
                MutationRule::OffByOneBound
            } else {
                MutationRule::ComparisonFlip
            };
            vec![Violation::new(
                InvariantKind::FoundIndexValid,
                "target is present but the search reported NotFound",
            )
            .suspecting(suspect)]
        }
        SearchOutcome::NotFound => Vec::new(),
        SearchOutcome::Cutoff => vec![Violation::new(
            InvariantKind::AbsentMeansNotFound,
            "array search has no depth bound, Cutoff is never a valid outcome",
        )],
    }
}

/// Breadth-first shortest hop count, the oracle for graph searches.
fn bfs_distance(adjacency: &[Vec<usize>], start: usize, goal: usize) -> Option<usize> {
    if start >= adjacency.len() {
        return None;
    }
    let mut dist = vec![None; adjacency.len()];
    dist[start] = Some(0);
    let mut queue = VecDeque::from([start]);
    while let Some(node) = queue.pop_front() {
        if node == goal {
            return dist[node];
        }
        for &next in &adjacency[node] {
            if next < adjacency.len() && dist[next].is_none() {
                dist[next] = Some(dist[node].unwrap_or(0) + 1);
                queue.push_back(next);
            }
        }
    }
    None
}

fn check_graph_search(
    spec: &AlgorithmSpec,
    adjacency: &[Vec<usize>],
    start: usize,
    goal: usize,
    depth_limit: Option<usize>,
    outcome: SearchOutcome,
) -> Vec<Violation> {
    let distance = bfs_distance(adjacency, start, goal);
    let mut violations = Vec::new();
    match (distance, depth_limit, outcome) {
        (Some(d), Some(limit), SearchOutcome::Found(depth)) => {
            if depth < d || depth > limit {
                violations.push(
                    Violation::new(
                        InvariantKind::FoundIndexValid,
                        format!(
                            "goal found at depth {depth}, outside the feasible range {d}..={limit}"
                        ),
                    )
                    .suspecting(MutationRule::OffByOneBound),
                );
            }
        }
        (Some(d), Some(limit), SearchOutcome::NotFound) if d <= limit => {
            violations.push(
                Violation::new(
                    InvariantKind::FoundIndexValid,
                    format!("goal is reachable at depth {d} within the bound {limit}"),
                )
                .suspecting(MutationRule::OffByOneBound),
            );
        }
        (Some(d), Some(limit), SearchOutcome::Cutoff) if d <= limit => {
            violations.push(
                Violation::new(
                    InvariantKind::CutoffDistinct,
                    format!("goal at depth {d} is within the bound {limit}, yet Cutoff"),
                )
                .suspecting(MutationRule::OffByOneBound),
            );
        }
        (Some(d), Some(limit), SearchOutcome::NotFound) if d > limit => {
            if spec.requires(InvariantKind::CutoffDistinct) {
                violations.push(Violation::new(
                    InvariantKind::CutoffDistinct,
                    format!(
                        "bound {limit} truncated the search below the goal depth {d}, \
                         which must surface as Cutoff"
                    ),
                ));
            }
        }
        (None, Some(limit), SearchOutcome::Found(depth)) => {
            violations.push(Violation::new(
                InvariantKind::FoundIndexValid,
                format!("unreachable goal reported found at depth {depth} under bound {limit}"),
            ));
        }
        (None, Some(limit), SearchOutcome::Cutoff) if limit >= adjacency.len() => {
            // Simple paths are shorter than the node count, so a bound that
            // large can never truncate anything.
            violations.push(Violation::new(
                InvariantKind::AbsentMeansNotFound,
                "unreachable goal with a bound wider than any simple path must be NotFound",
            ));
        }
        (Some(d), None, outcome) => {
            if !matches!(outcome, SearchOutcome::Found(_)) {
                violations.push(Violation::new(
                    InvariantKind::FoundIndexValid,
                    format!("goal is reachable at depth {d} but was not found"),
                ));
            }
        }
        (None, None, outcome) => {
            if outcome != SearchOutcome::NotFound {
                violations.push(Violation::new(
                    InvariantKind::AbsentMeansNotFound,
                    "unreachable goal in an unbounded search must be NotFound",
                ));
            }
        }
        _ => {}
    }
    violations
}

fn check_text_search(haystack: &str, needle: &str, outcome: SearchOutcome) -> Vec<Violation> {
    let expected = haystack.find(needle);
    match (expected, outcome) {
        (_, SearchOutcome::Found(index)) => {
            let valid = haystack
                .get(index..index + needle.len())
                .map(|slice| slice == needle)
                .unwrap_or(false);
            if valid {
                Vec::new()
            } else {
                vec![Violation::new(
                    InvariantKind::FoundIndexValid,
                    format!("Found({index}) is not a match position"),
                )
                .suspecting(MutationRule::OffByOneBound)]
            }
        }
        (Some(at), SearchOutcome::NotFound) => vec![Violation::new(
            InvariantKind::FoundIndexValid,
            format!("needle occurs at byte {at} but was reported absent"),
        )],
        (None, SearchOutcome::NotFound) => Vec::new(),
        (_, SearchOutcome::Cutoff) => vec![Violation::new(
            InvariantKind::AbsentMeansNotFound,
            "substring search has no depth bound, Cutoff is never a valid outcome",
        )],
    }
}

// Numeric methods. The generator only emits instances whose true answer is
// recoverable, so a residual beyond the bound means the iterate is wrong, and
// a NonConvergence report on such an instance means the iteration itself is.

fn check_numeric(
    spec: &AlgorithmSpec,
    input: &TestInput,
    outcome: Result<RunOutput, HarnessError>,
) -> Vec<Violation> {
    let problem = match input {
        TestInput::Numeric(problem) => problem,
        _ => return Vec::new(),
    };
    let result = match outcome {
        Ok(RunOutput::Numeric(result)) => result,
        Ok(_) => return Vec::new(),
        Err(HarnessError::NonConvergence {
            best, residual, ..
        }) => {
            return vec![Violation::new(
                InvariantKind::Converged,
                format!(
                    "did not converge on a convergent instance (best {best:.6}, residual {residual:.3e})"
                ),
            )
            .suspecting(MutationRule::WrongRecurrenceTerm)];
        }
        Err(err) => return vec![unexpected_error(spec, &err)],
    };

    let value = result.value;
    if !value.is_finite() {
        return vec![Violation::new(
            InvariantKind::Converged,
            format!("iterate is not finite: {value}"),
        )
        .suspecting(MutationRule::WrongRecurrenceTerm)];
    }

    let residual = match problem {
        NumericProblem::Bisection { poly, .. } | NumericProblem::Householder { poly, .. } => {
            Some(numeric::eval_poly(poly, value).abs())
        }
        NumericProblem::FixedPoint { poly, .. } => {
            Some((numeric::eval_poly(poly, value) - value).abs())
        }
        NumericProblem::Heron { value: target, .. }
        | NumericProblem::LentzSqrt { target, .. } => {
            Some((value * value - target).abs() / target.max(1.0))
        }
        NumericProblem::Rk4 {
            lambda,
            y0,
            t0,
            t1,
            ..
        } => {
            let exact = y0 * (lambda * (t1 - t0)).exp();
            let error = (value - exact).abs() / exact.abs().max(1.0);
            if error > RK4_RELATIVE_BOUND {
                return vec![Violation::new(
                    InvariantKind::Converged,
                    format!("integrated value {value:.6} differs from the closed form {exact:.6}"),
                )
                .suspecting(MutationRule::WrongRecurrenceTerm)];
            }
            None
        }
    };

    match residual {
        Some(residual) if residual > NUMERIC_RESIDUAL_BOUND => vec![Violation::new(
            InvariantKind::Converged,
            format!("iterate {value:.6} has residual {residual:.3e}"),
        )
        .suspecting(MutationRule::WrongRecurrenceTerm)],
        _ => Vec::new(),
    }
}

// Ciphers and checksums.

fn check_cipher(spec: &AlgorithmSpec, imp: &Implementation, input: &TestInput) -> Vec<Violation> {
    match (&imp.runner, input) {
        (
            Runner::Cipher(CipherRunner::RoundTrip { encrypt, decrypt }),
            TestInput::CipherText { plaintext, key },
        ) => {
            let ciphertext = match encrypt(plaintext, key) {
                Ok(c) => c,
                Err(err) => return vec![unexpected_error(spec, &err)],
            };
            match decrypt(&ciphertext, key) {
                Ok(recovered) if &recovered == plaintext => Vec::new(),
                Ok(recovered) => vec![Violation::new(
                    InvariantKind::RoundTrip,
                    format!("decrypt(encrypt(p)) recovered {recovered:?}, not the plaintext"),
                )
                .suspecting(MutationRule::WrongRecurrenceTerm)],
                Err(err) => vec![Violation::new(
                    InvariantKind::RoundTrip,
                    format!("decryption of own ciphertext failed: {err}"),
                )],
            }
        }
        (
            Runner::Cipher(CipherRunner::CheckDigit { generate, validate }),
            TestInput::CheckDigits { digits, modulus },
        ) => check_check_digit(*generate, *validate, digits, *modulus),
        (Runner::Cipher(CipherRunner::Mac(mac)), TestInput::MacMessage { key, message }) => {
            match mac(key, message) {
                Ok(_) => Vec::new(),
                Err(err) => vec![unexpected_error(spec, &err)],
            }
        }
        _ => Vec::new(),
    }
}

fn check_check_digit(
    generate: fn(&[u32], u32) -> Result<u32, HarnessError>,
    validate: fn(&[u32], u32) -> Result<bool, HarnessError>,
    digits: &[u32],
    modulus: u32,
) -> Vec<Violation> {
    let check = match generate(digits, modulus) {
        Ok(check) => check,
        Err(err) => {
            return vec![Violation::new(
                InvariantKind::ChecksumDetectsSingleError,
                format!("check digit generation failed: {err}"),
            )];
        }
    };
    let mut full: Vec<u32> = digits.to_vec();
    full.push(check);

    let mut violations = Vec::new();
    match validate(&full, modulus) {
        Ok(true) => {}
        Ok(false) => violations.push(
            Violation::new(
                InvariantKind::ChecksumDetectsSingleError,
                "freshly generated check digit does not validate",
            )
            .suspecting(MutationRule::WrongRecurrenceTerm),
        ),
        Err(err) => violations.push(Violation::new(
            InvariantKind::ChecksumDetectsSingleError,
            format!("validation failed: {err}"),
        )),
    }

    // Every single-symbol substitution must be rejected. Even moduli make the
    // doubled-position map injective, and the generator only emits even ones.
    for position in 0..full.len() {
        for delta in [1, modulus - 1] {
            let original = full[position];
            let corrupted_symbol = (original + delta) % modulus;
            if corrupted_symbol == original {
                continue;
            }
            let mut corrupted = full.clone();
            corrupted[position] = corrupted_symbol;
            if let Ok(true) = validate(&corrupted, modulus) {
                violations.push(
                    Violation::new(
                        InvariantKind::ChecksumDetectsSingleError,
                        format!(
                            "substituting {original} with {corrupted_symbol} at position \
                             {position} went undetected"
                        ),
                    )
                    .suspecting(MutationRule::OffByOneBound),
                );
            }
        }
    }
    violations
}

// Spanning forests, traversals, and schedules.

fn check_graph(spec: &AlgorithmSpec, imp: &Implementation, input: &TestInput) -> Vec<Violation> {
    match input {
        TestInput::Graph(problem) => check_forest(spec, imp, problem),
        TestInput::Tree(tree) => check_traversal(spec, imp, tree),
        _ => Vec::new(),
    }
}

fn check_forest(
    spec: &AlgorithmSpec,
    imp: &Implementation,
    problem: &GraphProblem,
) -> Vec<Violation> {
    let forest = match execute(imp, &TestInput::Graph(problem.clone())) {
        Ok(RunOutput::Forest(forest)) => forest,
        Ok(_) => return Vec::new(),
        Err(err) => return vec![unexpected_error(spec, &err)],
    };

    let mut violations = Vec::new();
    match graph::is_spanning_forest(problem, &forest) {
        Ok(true) => {}
        Ok(false) => violations.push(
            Violation::new(
                InvariantKind::ValidForest,
                "edge set is cyclic or fails to span every component",
            )
            .suspecting(MutationRule::OffByOneBound),
        ),
        Err(err) => violations.push(Violation::new(
            InvariantKind::ValidForest,
            format!("forest refers outside the edge list: {err}"),
        )),
    }

    if spec.requires(InvariantKind::MinimalWeight) {
        match graph::brute_force_min_forest_weight(problem) {
            Ok(minimum) => {
                if forest.total_weight > minimum + 1e-9 {
                    let suspect = if forest.total_weight > minimum * 1.5 + 1e-9 {
                        MutationRule::ComparisonFlip
                    } else {
                        MutationRule::OffByOneBound
                    };
                    violations.push(
                        Violation::new(
                            InvariantKind::MinimalWeight,
                            format!(
                                "forest weighs {}, the minimum is {minimum}",
                                forest.total_weight
                            ),
                        )
                        .suspecting(suspect),
                    );
                }
            }
            // Too many edges for exhaustive comparison; the structural check
            // above still binds.
            Err(HarnessError::InvalidInput(_)) => {}
            Err(err) => violations.push(Violation::new(
                InvariantKind::MinimalWeight,
                format!("oracle failed: {err}"),
            )),
        }
    }
    violations
}

fn traversal_oracle(name: &str, tree: &TreeProblem) -> Option<Result<Vec<i64>, HarnessError>> {
    // Independent iterative renditions serve as the oracle for the recursive
    // references and their mutants alike.
    match name {
        "preorder_traversal" => Some(graph::preorder_iterative(tree)),
        "inorder_traversal" => Some(graph::inorder_iterative(tree)),
        "postorder_traversal" => Some(graph::postorder_iterative(tree)),
        _ => None,
    }
}

fn check_traversal(
    spec: &AlgorithmSpec,
    imp: &Implementation,
    tree: &TreeProblem,
) -> Vec<Violation> {
    let visits = match execute(imp, &TestInput::Tree(tree.clone())) {
        Ok(RunOutput::Visits(visits)) => visits,
        Ok(_) => return Vec::new(),
        Err(err) => return vec![unexpected_error(spec, &err)],
    };
    let expected = match traversal_oracle(spec.id.as_str(), tree) {
        Some(Ok(expected)) => expected,
        Some(Err(err)) => {
            return vec![Violation::new(
                InvariantKind::VisitOrder,
                format!("oracle rejected the tree: {err}"),
            )];
        }
        None => return Vec::new(),
    };
    if visits == expected {
        return Vec::new();
    }
    let suspect = if visits.len() != expected.len() {
        MutationRule::WrongRecurrenceTerm
    } else {
        MutationRule::OrderReversal
    };
    vec![Violation::new(
        InvariantKind::VisitOrder,
        format!("visited {visits:?}, the discipline requires {expected:?}"),
    )
    .suspecting(suspect)]
}

fn check_scheduling(
    spec: &AlgorithmSpec,
    imp: &Implementation,
    input: &TestInput,
) -> Vec<Violation> {
    let jobs = match input {
        TestInput::Jobs(jobs) => jobs,
        _ => return Vec::new(),
    };
    let order = match execute(imp, input) {
        Ok(RunOutput::JobOrder(order)) => order,
        Ok(_) => return Vec::new(),
        Err(err) => return vec![unexpected_error(spec, &err)],
    };
    let achieved = match scheduling::makespan(jobs, &order) {
        Ok(achieved) => achieved,
        Err(err) => {
            return vec![Violation::new(
                InvariantKind::MinimalMakespan,
                format!("returned order is not a permutation of the jobs: {err}"),
            )
            .suspecting(MutationRule::OffByOneBound)];
        }
    };
    if spec.requires(InvariantKind::MinimalMakespan) {
        match scheduling::brute_force_min_makespan(jobs) {
            Ok(minimum) => {
                if achieved > minimum {
                    return vec![Violation::new(
                        InvariantKind::MinimalMakespan,
                        format!("schedule finishes at {achieved}, the optimum is {minimum}"),
                    )
                    .suspecting(MutationRule::ComparisonFlip)];
                }
            }
            // Too many jobs to enumerate; permutation validity still binds.
            Err(HarnessError::InvalidInput(_)) => {}
            Err(err) => {
                return vec![Violation::new(
                    InvariantKind::MinimalMakespan,
                    format!("oracle failed: {err}"),
                )];
            }
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::implementation::reference;
    use crate::mutation;
    use crate::registry::Registry;

    fn spec_for(name: &str) -> crate::spec::AlgorithmSpec {
        Registry::builtin().get(name).unwrap().clone()
    }

    #[test]
    fn test_reference_sort_clean() {
        let spec = spec_for("merge_sort");
        let imp = reference("merge_sort").unwrap();
        let input = TestInput::Sequence(vec![5, 3, 8, 1, 3]);
        assert!(check(&spec, &imp, &input).is_empty());
    }

    #[test]
    fn test_flipped_sort_flagged_on_spec_example() {
        let spec = spec_for("merge_sort");
        let imp = mutation::mutant("merge_sort", MutationRule::ComparisonFlip).unwrap();
        let input = TestInput::Sequence(vec![1, 2, 3]);
        let violations = check(&spec, &imp, &input);
        assert!(violations
            .iter()
            .any(|v| v.invariant == InvariantKind::NonDecreasing));
        assert!(violations
            .iter()
            .any(|v| v.suspected == Some(MutationRule::ComparisonFlip)));
    }

    #[test]
    fn test_short_hi_flagged_at_last_slot() {
        let spec = spec_for("binary_search");
        let imp = mutation::mutant("binary_search", MutationRule::OffByOneBound).unwrap();
        let input = TestInput::Search(SearchProblem::Sorted {
            haystack: vec![1, 3, 5, 7, 9],
            target: 9,
        });
        let violations = check(&spec, &imp, &input);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].suspected, Some(MutationRule::OffByOneBound));
    }

    #[test]
    fn test_depth_limited_cutoff_respected() {
        let spec = spec_for("depth_limited_search");
        let imp = reference("depth_limited_search").unwrap();
        let adjacency = vec![vec![1], vec![2], vec![3], vec![]];
        let input = TestInput::Search(SearchProblem::Graph {
            adjacency,
            start: 0,
            goal: 3,
            depth_limit: Some(2),
        });
        assert!(check(&spec, &imp, &input).is_empty());
    }

    #[test]
    fn test_luhn_corruption_detection() {
        let spec = spec_for("luhn_mod_n");
        let imp = reference("luhn_mod_n").unwrap();
        let input = TestInput::CheckDigits {
            digits: vec![7, 9, 9, 2, 7, 3, 9, 8, 7, 1],
            modulus: 10,
        };
        assert!(check(&spec, &imp, &input).is_empty());
    }

    #[test]
    fn test_descending_kruskal_flagged() {
        let spec = spec_for("kruskal");
        let imp = mutation::mutant("kruskal", MutationRule::ComparisonFlip).unwrap();
        let input = TestInput::Graph(GraphProblem {
            nodes: 3,
            edges: vec![(0, 1, 1.0), (1, 2, 2.0), (0, 2, 10.0)],
        });
        let violations = check(&spec, &imp, &input);
        assert!(violations
            .iter()
            .any(|v| v.invariant == InvariantKind::MinimalWeight));
    }
}
