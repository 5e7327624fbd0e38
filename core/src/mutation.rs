//! Bug-pattern catalog: the mistake classes observed in the source corpus,
//! encoded as reusable mutation rules with hand-written mutant runners.
//!
//! Each cataloged mutant is a reference implementation with exactly one
//! deliberate bug of the tagged class. The catalog exists to mutation-test
//! the harness itself: the verifier must flag every mutant with at least one
//! invariant failure. A mutant the battery misses indicates a gap in the
//! battery, never a correct mutant.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::algorithm::graph::UnionFind;
use crate::algorithm::{cipher, numeric, sorting};
use crate::error::HarnessError;
use crate::implementation::{CipherRunner, Implementation, Runner};
use crate::problem::{Forest, GraphProblem, NumericOutcome, NumericProblem, SearchOutcome, SearchProblem, TreeProblem};

/// The bug classes harvested from the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MutationRule {
    /// A loop or range boundary shifted by one (`<` vs `<=`, `n` vs `n-1`).
    OffByOneBound,
    /// A comparison direction swapped (`<` vs `>`), turning ascending into
    /// descending or breaking a branch.
    ComparisonFlip,
    /// The wrong prior state variable used in an iterative update, such as a
    /// stale iterate that keeps a fixed-point loop from ever advancing.
    WrongRecurrenceTerm,
    /// Output emitted in reversed order, the `add(0, x)` pattern.
    OrderReversal,
}

impl MutationRule {
    pub const ALL: [MutationRule; 4] = [
        MutationRule::OffByOneBound,
        MutationRule::ComparisonFlip,
        MutationRule::WrongRecurrenceTerm,
        MutationRule::OrderReversal,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            MutationRule::OffByOneBound => "off-by-one-bound",
            MutationRule::ComparisonFlip => "comparison-flip",
            MutationRule::WrongRecurrenceTerm => "wrong-recurrence-term",
            MutationRule::OrderReversal => "order-reversal",
        }
    }
}

impl fmt::Display for MutationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for MutationRule {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MutationRule::ALL
            .into_iter()
            .find(|rule| rule.tag() == s)
            .ok_or_else(|| HarnessError::invalid_input(format!("unknown mutation rule: {s}")))
    }
}

// Sorting mutants.

/// Merge sort with the merge comparison flipped: takes the larger head
/// first, producing a non-increasing output.
fn merge_sort_flipped(input: &[i64]) -> Result<Vec<i64>, HarnessError> {
    Ok(sorting::merge_sort_by(input, &|a, b| b.cmp(a)))
}

/// Merge sort whose left-tail copy stops one element early.
fn merge_sort_dropped_tail(input: &[i64]) -> Result<Vec<i64>, HarnessError> {
    fn sort(input: &[i64]) -> Vec<i64> {
        if input.len() <= 1 {
            return input.to_vec();
        }
        let mid = input.len() / 2;
        let left = sort(&input[..mid]);
        let right = sort(&input[mid..]);
        let mut out = Vec::with_capacity(left.len() + right.len());
        let (mut i, mut j) = (0, 0);
        while i < left.len() && j < right.len() {
            if left[i] <= right[j] {
                out.push(left[i]);
                i += 1;
            } else {
                out.push(right[j]);
                j += 1;
            }
        }
        if i < left.len() {
            // BUG: upper bound excludes the final element of the left run.
            out.extend_from_slice(&left[i..left.len() - 1]);
        }
        out.extend_from_slice(&right[j..]);
        out
    }
    Ok(sort(input))
}

/// Merge sort followed by a result reversal, the `add(0, x)` pattern.
fn merge_sort_reversed(input: &[i64]) -> Result<Vec<i64>, HarnessError> {
    let mut out = sorting::merge_sort(input);
    out.reverse();
    Ok(out)
}

/// Selection sort that selects the maximum instead of the minimum.
fn selection_sort_max(input: &[i64]) -> Result<Vec<i64>, HarnessError> {
    let mut v = input.to_vec();
    let n = v.len();
    for i in 0..n {
        let mut pick = i;
        for j in (i + 1)..n {
            // BUG: comparison direction flipped; this finds the maximum.
            if v[j] > v[pick] {
                pick = j;
            }
        }
        v.swap(i, pick);
    }
    Ok(v)
}

/// Odd-even transposition sort whose phases stop one pair early, so the last
/// element never participates in an exchange.
fn odd_even_sort_short_phase(input: &[i64]) -> Result<Vec<i64>, HarnessError> {
    let mut v = input.to_vec();
    let n = v.len();
    if n < 2 {
        return Ok(v);
    }
    for _pass in 0..n {
        let mut i = 0;
        // BUG: `i + 1 < n - 1` excludes the final adjacent pair.
        while i + 1 < n - 1 {
            if v[i] > v[i + 1] {
                v.swap(i, i + 1);
            }
            i += 2;
        }
        let mut i = 1;
        while i + 1 < n - 1 {
            if v[i] > v[i + 1] {
                v.swap(i, i + 1);
            }
            i += 2;
        }
    }
    Ok(v)
}

// Search mutants.

fn sorted_parts(problem: &SearchProblem) -> Result<(&[i64], i64), HarnessError> {
    match problem {
        SearchProblem::Sorted { haystack, target } => Ok((haystack, *target)),
        _ => Err(HarnessError::invalid_input(
            "input does not match expected shape: sorted haystack plus target",
        )),
    }
}

/// Binary search initialized with `hi = n - 1` under an exclusive loop, so
/// the final element is never examined.
fn binary_search_short_hi(problem: &SearchProblem) -> Result<SearchOutcome, HarnessError> {
    let (haystack, target) = sorted_parts(problem)?;
    if haystack.windows(2).any(|w| w[0] > w[1]) {
        return Err(HarnessError::invalid_input(
            "haystack must be sorted in non-decreasing order",
        ));
    }
    let mut lo = 0usize;
    // BUG: exclusive upper bound seeded with n - 1 instead of n.
    let mut hi = haystack.len().saturating_sub(1);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if haystack[mid] == target {
            return Ok(SearchOutcome::Found(mid));
        } else if haystack[mid] < target {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    Ok(SearchOutcome::NotFound)
}

/// Binary search with the descent branches swapped.
fn binary_search_flipped_branch(problem: &SearchProblem) -> Result<SearchOutcome, HarnessError> {
    let (haystack, target) = sorted_parts(problem)?;
    if haystack.windows(2).any(|w| w[0] > w[1]) {
        return Err(HarnessError::invalid_input(
            "haystack must be sorted in non-decreasing order",
        ));
    }
    let (mut lo, mut hi) = (0usize, haystack.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if haystack[mid] == target {
            return Ok(SearchOutcome::Found(mid));
        } else if haystack[mid] < target {
            // BUG: smaller midpoint value should move lo upward, not hi.
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    Ok(SearchOutcome::NotFound)
}

/// Jump search whose in-block scan stops one element early.
fn jump_search_short_block(problem: &SearchProblem) -> Result<SearchOutcome, HarnessError> {
    let (haystack, target) = sorted_parts(problem)?;
    if haystack.windows(2).any(|w| w[0] > w[1]) {
        return Err(HarnessError::invalid_input(
            "haystack must be sorted in non-decreasing order",
        ));
    }
    let n = haystack.len();
    if n == 0 {
        return Ok(SearchOutcome::NotFound);
    }
    let step = (n as f64).sqrt().floor().max(1.0) as usize;
    let mut block_start = 0usize;
    while block_start < n && haystack[(block_start + step - 1).min(n - 1)] < target {
        block_start += step;
    }
    let block_end = (block_start + step).min(n);
    // BUG: scan excludes the final element of the block.
    for i in block_start..block_end.saturating_sub(1) {
        if haystack[i] == target {
            return Ok(SearchOutcome::Found(i));
        }
    }
    Ok(SearchOutcome::NotFound)
}

// Numeric mutants.

/// Fixed-point iteration that keeps evaluating g at the stale starting
/// iterate, so the loop never advances.
fn fixed_point_stale_iterate(problem: &NumericProblem) -> Result<NumericOutcome, HarnessError> {
    match problem {
        NumericProblem::FixedPoint {
            poly,
            x0,
            tol,
            max_iter,
        } => {
            if *tol <= 0.0 {
                return Err(HarnessError::invalid_input("tolerance must be positive"));
            }
            let mut x = *x0;
            for iteration in 1..=*max_iter {
                // BUG: g is applied to x0 instead of the current iterate.
                let next = numeric::eval_poly(poly, *x0);
                if (next - x).abs() < *tol {
                    return Ok(NumericOutcome {
                        value: next,
                        iterations: iteration,
                    });
                }
                x = next;
            }
            Err(HarnessError::NonConvergence {
                best: x,
                residual: (numeric::eval_poly(poly, *x0) - x).abs(),
                iterations: *max_iter,
            })
        }
        _ => Err(HarnessError::invalid_input(
            "input does not match expected shape: fixed-point problem",
        )),
    }
}

/// Heron iteration dividing by the starting estimate instead of the current
/// one, converging to value/x0 rather than sqrt(value).
fn heron_stale_divisor(problem: &NumericProblem) -> Result<NumericOutcome, HarnessError> {
    match problem {
        NumericProblem::Heron {
            value,
            tol,
            max_iter,
        } => {
            if *value < 0.0 {
                return Err(HarnessError::invalid_input(
                    "square root of a negative number",
                ));
            }
            if *tol <= 0.0 {
                return Err(HarnessError::invalid_input("tolerance must be positive"));
            }
            if *value == 0.0 {
                return Ok(NumericOutcome {
                    value: 0.0,
                    iterations: 0,
                });
            }
            let x0 = if *value >= 1.0 { *value } else { 1.0 };
            let mut x = x0;
            for iteration in 1..=*max_iter {
                // BUG: divides by the initial estimate, not the current one.
                let next = 0.5 * (x + value / x0);
                if (next - x).abs() < *tol {
                    return Ok(NumericOutcome {
                        value: next,
                        iterations: iteration,
                    });
                }
                x = next;
            }
            Err(HarnessError::NonConvergence {
                best: x,
                residual: (x * x - value).abs(),
                iterations: *max_iter,
            })
        }
        _ => Err(HarnessError::invalid_input(
            "input does not match expected shape: heron problem",
        )),
    }
}

/// Bisection that keeps the half without the sign change.
fn bisection_flipped_half(problem: &NumericProblem) -> Result<NumericOutcome, HarnessError> {
    match problem {
        NumericProblem::Bisection {
            poly,
            a,
            b,
            tol,
            max_iter,
        } => {
            let f = |x: f64| numeric::eval_poly(poly, x);
            if !(*a < *b) {
                return Err(HarnessError::invalid_input("interval requires a < b"));
            }
            if *tol <= 0.0 {
                return Err(HarnessError::invalid_input("tolerance must be positive"));
            }
            let (mut lo, mut hi) = (*a, *b);
            let (mut f_lo, f_hi) = (f(lo), f(hi));
            if f_lo == 0.0 {
                return Ok(NumericOutcome {
                    value: lo,
                    iterations: 0,
                });
            }
            if f_hi == 0.0 {
                return Ok(NumericOutcome {
                    value: hi,
                    iterations: 0,
                });
            }
            if f_lo.signum() == f_hi.signum() {
                return Err(HarnessError::invalid_input(
                    "f(a) and f(b) must differ in sign",
                ));
            }
            let mut mid = lo;
            for iteration in 1..=*max_iter {
                mid = lo + (hi - lo) / 2.0;
                let f_mid = f(mid);
                if f_mid.abs() < *tol || (hi - lo) / 2.0 < *tol {
                    return Ok(NumericOutcome {
                        value: mid,
                        iterations: iteration,
                    });
                }
                // BUG: comparison flipped; the retained half has no root.
                if f_mid.signum() != f_lo.signum() {
                    lo = mid;
                    f_lo = f_mid;
                } else {
                    hi = mid;
                }
            }
            Err(HarnessError::NonConvergence {
                best: mid,
                residual: f(mid).abs(),
                iterations: *max_iter,
            })
        }
        _ => Err(HarnessError::invalid_input(
            "input does not match expected shape: bisection problem",
        )),
    }
}

// Cipher mutants.

/// Autokey encryption whose keystream extends with ciphertext instead of
/// plaintext; the paired plaintext-autokey decryption cannot invert it.
fn autokey_encrypt_ciphertext_keystream(
    plaintext: &str,
    key: &str,
) -> Result<String, HarnessError> {
    cipher::ensure_uppercase_letters(plaintext, "plaintext")?;
    cipher::ensure_uppercase_letters(key, "key")?;
    if key.is_empty() {
        return Err(HarnessError::invalid_input("key must be non-empty"));
    }
    let plain = plaintext.as_bytes();
    let key = key.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(plain.len());
    for (i, &p) in plain.iter().enumerate() {
        let k = if i < key.len() {
            key[i]
        } else {
            // BUG: the keystream should continue with the plaintext.
            out[i - key.len()]
        };
        out.push(b'A' + ((p - b'A') + (k - b'A')) % 26);
    }
    Ok(String::from_utf8(out).unwrap_or_default())
}

/// Luhn validation whose loop skips the final (check) symbol.
fn luhn_validate_skips_check(sequence: &[u32], modulus: u32) -> Result<bool, HarnessError> {
    cipher::ensure_luhn_input(sequence, modulus)?;
    if sequence.is_empty() {
        return Err(HarnessError::invalid_input(
            "sequence must contain at least a check digit",
        ));
    }
    let modulus = u64::from(modulus);
    let mut sum = 0u64;
    // BUG: iteration starts past the check digit.
    for (distance, &digit) in sequence.iter().rev().skip(1).enumerate() {
        let weighted = if distance % 2 == 1 {
            u64::from(digit) * 2
        } else {
            u64::from(digit)
        };
        sum += weighted / modulus + weighted % modulus;
    }
    Ok(sum % modulus == 0)
}

// Graph and scheduling mutants.

fn ensure_graph_problem(problem: &GraphProblem) -> Result<(), HarnessError> {
    for &(u, v, w) in &problem.edges {
        if u >= problem.nodes || v >= problem.nodes {
            return Err(HarnessError::invalid_input(format!(
                "edge ({u}, {v}) outside graph of {} nodes",
                problem.nodes
            )));
        }
        if !w.is_finite() {
            return Err(HarnessError::invalid_input(format!(
                "edge ({u}, {v}) has non-finite weight {w}"
            )));
        }
    }
    Ok(())
}

fn kruskal_with_order(
    problem: &GraphProblem,
    order: Vec<usize>,
    skip_last: bool,
) -> Result<Forest, HarnessError> {
    let mut forest = UnionFind::new(problem.nodes);
    let mut edge_indices = Vec::new();
    let mut total_weight = 0.0;
    let take = if skip_last {
        order.len().saturating_sub(1)
    } else {
        order.len()
    };
    for &index in &order[..take] {
        let (u, v, w) = problem.edges[index];
        if forest.union(u, v) {
            edge_indices.push(index);
            total_weight += w;
        }
    }
    edge_indices.sort_unstable();
    Ok(Forest {
        edge_indices,
        total_weight,
    })
}

/// Kruskal scanning edges in descending weight order, producing a maximum
/// spanning forest.
fn kruskal_descending(problem: &GraphProblem) -> Result<Forest, HarnessError> {
    ensure_graph_problem(problem)?;
    let mut order: Vec<usize> = (0..problem.edges.len()).collect();
    order.sort_by(|&i, &j| {
        let wi = problem.edges[i].2;
        let wj = problem.edges[j].2;
        // BUG: descending instead of ascending.
        wj.partial_cmp(&wi).unwrap_or(Ordering::Equal).then(i.cmp(&j))
    });
    kruskal_with_order(problem, order, false)
}

/// Kruskal whose edge scan stops one edge short of the end.
fn kruskal_skips_last_edge(problem: &GraphProblem) -> Result<Forest, HarnessError> {
    ensure_graph_problem(problem)?;
    let mut order: Vec<usize> = (0..problem.edges.len()).collect();
    order.sort_by(|&i, &j| {
        let wi = problem.edges[i].2;
        let wj = problem.edges[j].2;
        wi.partial_cmp(&wj).unwrap_or(Ordering::Equal).then(i.cmp(&j))
    });
    // BUG: the heaviest candidate edge is never examined.
    kruskal_with_order(problem, order, true)
}

/// Post-order that visits right before left and prepends, as seen in the
/// corpus.
fn postorder_right_first_prepend(tree: &TreeProblem) -> Result<Vec<i64>, HarnessError> {
    // Reuse the reference validation so only the order is mutated.
    crate::algorithm::graph::postorder(tree)?;
    fn recurse(tree: &TreeProblem, node: Option<usize>, out: &mut Vec<i64>) {
        if let Some(index) = node {
            // BUG: right subtree first, and the value is prepended.
            recurse(tree, tree.nodes[index].right, out);
            recurse(tree, tree.nodes[index].left, out);
            out.insert(0, tree.nodes[index].value);
        }
    }
    let mut out = Vec::with_capacity(tree.len());
    recurse(tree, tree.root, &mut out);
    Ok(out)
}

/// Pre-order that recurses into the left subtree twice.
fn preorder_left_twice(tree: &TreeProblem) -> Result<Vec<i64>, HarnessError> {
    crate::algorithm::graph::preorder(tree)?;
    fn recurse(tree: &TreeProblem, node: Option<usize>, out: &mut Vec<i64>) {
        if let Some(index) = node {
            out.push(tree.nodes[index].value);
            recurse(tree, tree.nodes[index].left, out);
            // BUG: the second recursion should take the right child.
            recurse(tree, tree.nodes[index].left, out);
        }
    }
    let mut out = Vec::with_capacity(tree.len());
    recurse(tree, tree.root, &mut out);
    Ok(out)
}

/// Johnson's rule with the first group sorted descending.
fn johnson_head_descending(jobs: &[(u32, u32)]) -> Result<Vec<usize>, HarnessError> {
    let mut head: Vec<usize> = Vec::new();
    let mut tail: Vec<usize> = Vec::new();
    for (index, &(a, b)) in jobs.iter().enumerate() {
        if a < b {
            head.push(index);
        } else {
            tail.push(index);
        }
    }
    // BUG: the short-on-A group must run in ascending A order.
    head.sort_by(|&i, &j| jobs[j].0.cmp(&jobs[i].0).then(i.cmp(&j)));
    tail.sort_by(|&i, &j| jobs[j].1.cmp(&jobs[i].1).then(i.cmp(&j)));
    head.extend(tail);
    Ok(head)
}

/// Every (algorithm, rule) pair the catalog can produce.
pub fn catalog() -> Vec<(&'static str, MutationRule)> {
    vec![
        ("merge_sort", MutationRule::ComparisonFlip),
        ("merge_sort", MutationRule::OffByOneBound),
        ("merge_sort", MutationRule::OrderReversal),
        ("selection_sort", MutationRule::ComparisonFlip),
        ("odd_even_sort", MutationRule::OffByOneBound),
        ("binary_search", MutationRule::OffByOneBound),
        ("binary_search", MutationRule::ComparisonFlip),
        ("jump_search", MutationRule::OffByOneBound),
        ("bisection", MutationRule::ComparisonFlip),
        ("fixed_point", MutationRule::WrongRecurrenceTerm),
        ("heron_sqrt", MutationRule::WrongRecurrenceTerm),
        ("autokey", MutationRule::WrongRecurrenceTerm),
        ("luhn_mod_n", MutationRule::OffByOneBound),
        ("kruskal", MutationRule::ComparisonFlip),
        ("kruskal", MutationRule::OffByOneBound),
        ("preorder_traversal", MutationRule::WrongRecurrenceTerm),
        ("postorder_traversal", MutationRule::OrderReversal),
        ("johnson_rule", MutationRule::ComparisonFlip),
    ]
}

/// Build the mutant implementation for an (algorithm, rule) pair, or `None`
/// when the rule does not apply to that algorithm's shape.
pub fn mutant(name: &str, rule: MutationRule) -> Option<Implementation> {
    use MutationRule::*;
    let runner = match (name, rule) {
        ("merge_sort", ComparisonFlip) => Runner::Sort {
            plain: merge_sort_flipped,
            keyed: None,
        },
        ("merge_sort", OffByOneBound) => Runner::Sort {
            plain: merge_sort_dropped_tail,
            keyed: None,
        },
        ("merge_sort", OrderReversal) => Runner::Sort {
            plain: merge_sort_reversed,
            keyed: None,
        },
        ("selection_sort", ComparisonFlip) => Runner::Sort {
            plain: selection_sort_max,
            keyed: None,
        },
        ("odd_even_sort", OffByOneBound) => Runner::Sort {
            plain: odd_even_sort_short_phase,
            keyed: None,
        },
        ("binary_search", OffByOneBound) => Runner::Search(binary_search_short_hi),
        ("binary_search", ComparisonFlip) => Runner::Search(binary_search_flipped_branch),
        ("jump_search", OffByOneBound) => Runner::Search(jump_search_short_block),
        ("bisection", ComparisonFlip) => Runner::Numeric(bisection_flipped_half),
        ("fixed_point", WrongRecurrenceTerm) => Runner::Numeric(fixed_point_stale_iterate),
        ("heron_sqrt", WrongRecurrenceTerm) => Runner::Numeric(heron_stale_divisor),
        ("autokey", WrongRecurrenceTerm) => Runner::Cipher(CipherRunner::RoundTrip {
            encrypt: autokey_encrypt_ciphertext_keystream,
            decrypt: cipher::autokey_decrypt,
        }),
        ("luhn_mod_n", OffByOneBound) => Runner::Cipher(CipherRunner::CheckDigit {
            generate: cipher::luhn_mod_n_check_digit,
            validate: luhn_validate_skips_check,
        }),
        ("kruskal", ComparisonFlip) => Runner::Graph(kruskal_descending),
        ("kruskal", OffByOneBound) => Runner::Graph(kruskal_skips_last_edge),
        ("preorder_traversal", WrongRecurrenceTerm) => Runner::Traversal(preorder_left_twice),
        ("postorder_traversal", OrderReversal) => Runner::Traversal(postorder_right_first_prepend),
        ("johnson_rule", ComparisonFlip) => Runner::Schedule(johnson_head_descending),
        _ => return None,
    };
    Some(Implementation::mutant(name, rule, runner))
}

/// The mutated source for an (algorithm, rule) pair, for the CLI `mutate`
/// command and for eyeballing what each rule means in context.
pub fn mutated_source(name: &str, rule: MutationRule) -> Option<&'static str> {
    use MutationRule::*;
    let source = match (name, rule) {
        ("merge_sort", ComparisonFlip) => {
            "// merge step, comparison flipped\n\
             if left[i] >= right[j] { out.push(left[i]); i += 1; } // BUG: takes larger head\n\
             else { out.push(right[j]); j += 1; }\n"
        }
        ("merge_sort", OffByOneBound) => {
            "// left-tail copy after the merge loop\n\
             out.extend_from_slice(&left[i..left.len() - 1]); // BUG: drops the final element\n"
        }
        ("merge_sort", OrderReversal) => {
            "let mut out = merge_sort(input);\n\
             out.reverse(); // BUG: result reversed before returning\n"
        }
        ("selection_sort", ComparisonFlip) => {
            "for j in (i + 1)..n {\n\
                 if v[j] > v[pick] { pick = j; } // BUG: selects the maximum\n\
             }\n"
        }
        ("odd_even_sort", OffByOneBound) => {
            "while i + 1 < n - 1 { // BUG: final adjacent pair never compared\n\
                 if v[i] > v[i + 1] { v.swap(i, i + 1); }\n\
                 i += 2;\n\
             }\n"
        }
        ("binary_search", OffByOneBound) => {
            "let mut hi = haystack.len() - 1; // BUG: exclusive bound seeded one short\n\
             while lo < hi { ... }\n"
        }
        ("binary_search", ComparisonFlip) => {
            "if haystack[mid] < target { hi = mid; } // BUG: branches swapped\n\
             else { lo = mid + 1; }\n"
        }
        ("jump_search", OffByOneBound) => {
            "for i in block_start..block_end - 1 { // BUG: skips the block's last slot\n\
                 if haystack[i] == target { return Ok(SearchOutcome::Found(i)); }\n\
             }\n"
        }
        ("bisection", ComparisonFlip) => {
            "if f_mid.signum() != f_lo.signum() { // BUG: keeps the rootless half\n\
                 lo = mid; f_lo = f_mid;\n\
             } else { hi = mid; }\n"
        }
        ("fixed_point", WrongRecurrenceTerm) => {
            "let next = g(x0); // BUG: stale iterate; should be g(x)\n"
        }
        ("heron_sqrt", WrongRecurrenceTerm) => {
            "let next = 0.5 * (x + value / x0); // BUG: stale divisor; should be value / x\n"
        }
        ("autokey", WrongRecurrenceTerm) => {
            "let k = if i < key.len() { key[i] }\n\
             else { out[i - key.len()] }; // BUG: keystream from ciphertext, not plaintext\n"
        }
        ("luhn_mod_n", OffByOneBound) => {
            "for (distance, &digit) in sequence.iter().rev().skip(1).enumerate() {\n\
                 // BUG: the check symbol is excluded from the weighted sum\n"
        }
        ("kruskal", ComparisonFlip) => {
            "order.sort_by(|&i, &j| wj.partial_cmp(&wi) ...); // BUG: descending weights\n"
        }
        ("kruskal", OffByOneBound) => {
            "for &index in &order[..order.len() - 1] { // BUG: last edge never examined\n"
        }
        ("preorder_traversal", WrongRecurrenceTerm) => {
            "out.push(node.value);\n\
             recurse(node.left);\n\
             recurse(node.left); // BUG: should recurse into node.right\n"
        }
        ("postorder_traversal", OrderReversal) => {
            "recurse(node.right); // BUG: right before left\n\
             recurse(node.left);\n\
             out.insert(0, node.value); // BUG: prepends instead of appending\n"
        }
        ("johnson_rule", ComparisonFlip) => {
            "head.sort_by(|&i, &j| jobs[j].0.cmp(&jobs[i].0)); // BUG: descending A-times\n"
        }
        _ => return None,
    };
    Some(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_entries_all_resolve() {
        for (name, rule) in catalog() {
            assert!(mutant(name, rule).is_some(), "{name}/{rule} has no runner");
            assert!(
                mutated_source(name, rule).is_some(),
                "{name}/{rule} has no source"
            );
        }
    }

    #[test]
    fn test_inapplicable_pair_is_none() {
        assert!(mutant("merge_sort", MutationRule::WrongRecurrenceTerm).is_none());
        assert!(mutated_source("kruskal", MutationRule::OrderReversal).is_none());
    }

    #[test]
    fn test_rule_round_trips_through_str() {
        for rule in MutationRule::ALL {
            assert_eq!(rule.tag().parse::<MutationRule>().unwrap(), rule);
        }
        assert!("spooky-rule".parse::<MutationRule>().is_err());
    }

    #[test]
    fn test_selection_sort_max_is_descending() {
        let out = selection_sort_max(&[1, 3, 2]).unwrap();
        assert_eq!(out, vec![3, 2, 1]);
    }

    #[test]
    fn test_binary_search_short_hi_misses_last() {
        let problem = SearchProblem::Sorted {
            haystack: vec![1, 3, 5],
            target: 5,
        };
        assert_eq!(
            binary_search_short_hi(&problem).unwrap(),
            SearchOutcome::NotFound
        );
    }

    #[test]
    fn test_autokey_mutant_breaks_round_trip() {
        let cipher_text = autokey_encrypt_ciphertext_keystream("MEETMEATDAWN", "KEY").unwrap();
        let decrypted = cipher::autokey_decrypt(&cipher_text, "KEY").unwrap();
        assert_ne!(decrypted, "MEETMEATDAWN");
    }
}
