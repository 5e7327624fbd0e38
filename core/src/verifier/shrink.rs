//! Greedy counterexample shrinking.
//!
//! A failing input is reduced by deleting pieces and damping magnitudes, one
//! candidate at a time, keeping each change only if the candidate still fails
//! at least one invariant. The loop is bounded by the input size, so it
//! terminates without a step budget.

use crate::implementation::Implementation;
use crate::problem::{GraphProblem, SearchProblem, TestInput};
use crate::spec::AlgorithmSpec;
use crate::verifier::invariants;

/// Shrink a failing input to a smaller one that still fails. Inputs with no
/// shrinking strategy are returned unchanged.
pub fn shrink(spec: &AlgorithmSpec, imp: &Implementation, input: TestInput) -> TestInput {
    let fails = |candidate: &TestInput| !invariants::check(spec, imp, candidate).is_empty();
    debug_assert!(fails(&input));

    match input {
        TestInput::Sequence(values) => {
            let values = shrink_vec(values, |v| fails(&TestInput::Sequence(v.to_vec())));
            let values = damp_magnitudes(values, |v| fails(&TestInput::Sequence(v.to_vec())));
            TestInput::Sequence(values)
        }
        TestInput::Search(SearchProblem::Sorted { haystack, target }) => {
            let haystack = shrink_vec(haystack, |h| {
                fails(&TestInput::Search(SearchProblem::Sorted {
                    haystack: h.to_vec(),
                    target,
                }))
            });
            TestInput::Search(SearchProblem::Sorted { haystack, target })
        }
        TestInput::Graph(GraphProblem { nodes, edges }) => {
            let edges = shrink_vec(edges, |e| {
                fails(&TestInput::Graph(GraphProblem {
                    nodes,
                    edges: e.to_vec(),
                }))
            });
            TestInput::Graph(GraphProblem { nodes, edges })
        }
        TestInput::Jobs(jobs) => {
            let jobs = shrink_vec(jobs, |j| fails(&TestInput::Jobs(j.to_vec())));
            TestInput::Jobs(jobs)
        }
        other => other,
    }
}

/// Remove elements one at a time while the predicate keeps failing, sweeping
/// until a full pass removes nothing.
fn shrink_vec<T: Clone>(mut values: Vec<T>, still_fails: impl Fn(&[T]) -> bool) -> Vec<T> {
    loop {
        let mut removed_any = false;
        let mut index = 0;
        while index < values.len() {
            let mut candidate = values.clone();
            candidate.remove(index);
            if still_fails(&candidate) {
                values = candidate;
                removed_any = true;
            } else {
                index += 1;
            }
        }
        if !removed_any {
            return values;
        }
    }
}

/// Halve each element toward zero while the predicate keeps failing.
fn damp_magnitudes(mut values: Vec<i64>, still_fails: impl Fn(&[i64]) -> bool) -> Vec<i64> {
    for index in 0..values.len() {
        while values[index] != 0 {
            let mut candidate = values.clone();
            candidate[index] /= 2;
            if still_fails(&candidate) {
                values = candidate;
            } else {
                break;
            }
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::{self, MutationRule};
    use crate::registry::Registry;

    #[test]
    fn test_flipped_sort_shrinks_to_a_pair() {
        let registry = Registry::builtin();
        let spec = registry.get("merge_sort").unwrap();
        let imp = mutation::mutant("merge_sort", MutationRule::ComparisonFlip).unwrap();
        let input = TestInput::Sequence(vec![9, 1, 7, 3, 5, 2, 8]);
        assert!(!invariants::check(spec, &imp, &input).is_empty());

        let shrunk = shrink(spec, &imp, input);
        match shrunk {
            TestInput::Sequence(values) => {
                // Two distinct elements are enough to exhibit a flipped order.
                assert_eq!(values.len(), 2);
                assert!(!invariants::check(spec, &imp, &TestInput::Sequence(values)).is_empty());
            }
            other => panic!("unexpected shrunk shape: {other:?}"),
        }
    }
}
