//! Reference sorting implementations.
//!
//! Each sort is a pure function from an input slice to a freshly allocated,
//! non-decreasing permutation of it. Comparison-based sorts are generic over
//! an explicit comparator so callers supply the total order as a capability
//! rather than the sorts assuming one concrete element type.
//!
//! Stability contracts follow the prose of the source material: merge sort
//! and odd-even transposition sort are stable; selection sort and the Batcher
//! network make no stability promise.

use std::cmp::Ordering;

use crate::error::HarnessError;

/// Stable merge sort. O(n log n) comparisons, O(n) auxiliary space.
///
/// Empty and singleton inputs come back unchanged.
pub fn merge_sort<T: Ord + Clone>(input: &[T]) -> Vec<T> {
    merge_sort_by(input, &|a, b| a.cmp(b))
}

/// Merge sort over a caller-supplied total order.
pub fn merge_sort_by<T: Clone, F>(input: &[T], cmp: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    if input.len() <= 1 {
        return input.to_vec();
    }
    let mid = input.len() / 2;
    let left = merge_sort_by(&input[..mid], cmp);
    let right = merge_sort_by(&input[mid..], cmp);
    merge(&left, &right, cmp)
}

/// Stable two-way merge: ties are taken from the left run.
fn merge<T: Clone, F>(left: &[T], right: &[T], cmp: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut out = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        if cmp(&left[i], &right[j]) != Ordering::Greater {
            out.push(left[i].clone());
            i += 1;
        } else {
            out.push(right[j].clone());
            j += 1;
        }
    }
    out.extend_from_slice(&left[i..]);
    out.extend_from_slice(&right[j..]);
    out
}

/// Selection sort by repeated minimum selection. O(n^2); not stable.
pub fn selection_sort<T: Ord + Clone>(input: &[T]) -> Vec<T> {
    selection_sort_by(input, &|a, b| a.cmp(b))
}

pub fn selection_sort_by<T: Clone, F>(input: &[T], cmp: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut v = input.to_vec();
    let n = v.len();
    for i in 0..n {
        let mut min_idx = i;
        for j in (i + 1)..n {
            if cmp(&v[j], &v[min_idx]) == Ordering::Less {
                min_idx = j;
            }
        }
        v.swap(i, min_idx);
    }
    v
}

/// Odd-even transposition sort. Alternates even- and odd-indexed
/// compare-exchange phases; n phases always suffice, and only strictly
/// out-of-order neighbors swap, so the sort is stable.
pub fn odd_even_sort<T: Ord + Clone>(input: &[T]) -> Vec<T> {
    odd_even_sort_by(input, &|a, b| a.cmp(b))
}

pub fn odd_even_sort_by<T: Clone, F>(input: &[T], cmp: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut v = input.to_vec();
    let n = v.len();
    if n < 2 {
        return v;
    }
    let mut sorted = false;
    while !sorted {
        sorted = true;
        let mut i = 0;
        while i + 1 < n {
            if cmp(&v[i], &v[i + 1]) == Ordering::Greater {
                v.swap(i, i + 1);
                sorted = false;
            }
            i += 2;
        }
        let mut i = 1;
        while i + 1 < n {
            if cmp(&v[i], &v[i + 1]) == Ordering::Greater {
                v.swap(i, i + 1);
                sorted = false;
            }
            i += 2;
        }
    }
    v
}

/// Batcher's odd-even mergesort as a data-independent comparison network,
/// valid for any length (compare-exchanges whose partner index falls outside
/// the array are skipped). O(n log^2 n) comparators; not stable.
pub fn batcher_odd_even_merge_sort<T: Ord + Clone>(input: &[T]) -> Vec<T> {
    batcher_odd_even_merge_sort_by(input, &|a, b| a.cmp(b))
}

pub fn batcher_odd_even_merge_sort_by<T: Clone, F>(input: &[T], cmp: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut v = input.to_vec();
    let n = v.len();
    if n < 2 {
        return v;
    }
    let mut p = 1;
    while p < n {
        let mut k = p;
        loop {
            let mut j = k % p;
            while j + k < n {
                let span = k.min(n - j - k);
                for i in 0..span {
                    let a = i + j;
                    let b = a + k;
                    // Only exchange within the same 2p-block.
                    if a / (2 * p) == b / (2 * p) && cmp(&v[a], &v[b]) == Ordering::Greater {
                        v.swap(a, b);
                    }
                }
                j += 2 * k;
            }
            if k == 1 {
                break;
            }
            k /= 2;
        }
        p *= 2;
    }
    v
}

/// Bound on the key span `counting_sort` will allocate a count table for.
const COUNTING_SORT_MAX_SPAN: i64 = 1 << 22;

/// Counting sort over bounded integer keys, the radix building block of the
/// Kirkpatrick-Reisch construction. O(n + span) time and space.
///
/// Fails with `InvalidInput` when the key span exceeds the table bound, since
/// the algorithm is only defined for bounded universes.
pub fn counting_sort(input: &[i64]) -> Result<Vec<i64>, HarnessError> {
    if input.is_empty() {
        return Ok(Vec::new());
    }
    let lo = *input.iter().min().unwrap_or(&0);
    let hi = *input.iter().max().unwrap_or(&0);
    // Widen before subtracting; the span of an arbitrary i64 pair does not
    // fit in i64 (consider i64::MIN..=i64::MAX).
    let span = i128::from(hi) - i128::from(lo) + 1;
    if span > i128::from(COUNTING_SORT_MAX_SPAN) {
        return Err(HarnessError::invalid_input(format!(
            "counting sort key span {span} exceeds bound {COUNTING_SORT_MAX_SPAN}"
        )));
    }
    let mut counts = vec![0usize; span as usize];
    for &x in input {
        counts[(x - lo) as usize] += 1;
    }
    let mut out = Vec::with_capacity(input.len());
    for (offset, &count) in counts.iter().enumerate() {
        for _ in 0..count {
            out.push(lo + offset as i64);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_non_decreasing(v: &[i64]) -> bool {
        v.windows(2).all(|w| w[0] <= w[1])
    }

    #[test]
    fn test_merge_sort_scenario() {
        assert_eq!(merge_sort(&[5, 3, 8, 1]), vec![1, 3, 5, 8]);
    }

    #[test]
    fn test_merge_sort_empty_and_singleton() {
        assert_eq!(merge_sort::<i64>(&[]), Vec::<i64>::new());
        assert_eq!(merge_sort(&[7]), vec![7]);
    }

    #[test]
    fn test_merge_sort_stability() {
        // Sort pairs by value only; tags must keep input order among equals.
        let input: Vec<(i64, u32)> = vec![(2, 0), (1, 1), (2, 2), (1, 3), (2, 4)];
        let sorted = merge_sort_by(&input, &|a, b| a.0.cmp(&b.0));
        assert_eq!(sorted, vec![(1, 1), (1, 3), (2, 0), (2, 2), (2, 4)]);
    }

    #[test]
    fn test_selection_sort_finds_minimum_not_maximum() {
        // The source corpus had a selection sort that selected the maximum.
        assert_eq!(selection_sort(&[3, 1, 2]), vec![1, 2, 3]);
        assert_eq!(selection_sort(&[9, -4, 0, 9, -4]), vec![-4, -4, 0, 9, 9]);
    }

    #[test]
    fn test_odd_even_sort_stability() {
        let input: Vec<(i64, u32)> = vec![(5, 0), (5, 1), (1, 2), (5, 3), (1, 4)];
        let sorted = odd_even_sort_by(&input, &|a, b| a.0.cmp(&b.0));
        assert_eq!(sorted, vec![(1, 2), (1, 4), (5, 0), (5, 1), (5, 3)]);
    }

    #[test]
    fn test_batcher_non_power_of_two_lengths() {
        for n in 0..33usize {
            let input: Vec<i64> = (0..n as i64).rev().collect();
            let sorted = batcher_odd_even_merge_sort(&input);
            assert!(is_non_decreasing(&sorted), "length {n}: {sorted:?}");
            assert_eq!(sorted.len(), n);
        }
    }

    #[test]
    fn test_counting_sort_negative_keys() {
        assert_eq!(
            counting_sort(&[3, -1, 2, -1, 0]).unwrap(),
            vec![-1, -1, 0, 2, 3]
        );
    }

    #[test]
    fn test_counting_sort_span_bound() {
        let err = counting_sort(&[0, i64::MAX / 2]).unwrap_err();
        assert!(matches!(err, HarnessError::InvalidInput(_)));
    }

    #[test]
    fn test_counting_sort_extreme_span_rejected() {
        // Spans wider than i64 itself must be rejected, not wrap around.
        let err = counting_sort(&[i64::MIN, 1]).unwrap_err();
        assert!(matches!(err, HarnessError::InvalidInput(_)));
        let err = counting_sort(&[i64::MIN, i64::MAX]).unwrap_err();
        assert!(matches!(err, HarnessError::InvalidInput(_)));
    }

    #[test]
    fn test_counting_sort_near_min_keys() {
        let base = i64::MIN;
        assert_eq!(
            counting_sort(&[base + 3, base, base + 1]).unwrap(),
            vec![base, base + 1, base + 3]
        );
    }

    #[test]
    fn test_all_sorts_agree() {
        let input = vec![12, -3, 12, 0, 7, 7, -3, 5, 100, 1];
        let expected = {
            let mut v = input.clone();
            v.sort();
            v
        };
        assert_eq!(merge_sort(&input), expected);
        assert_eq!(selection_sort(&input), expected);
        assert_eq!(odd_even_sort(&input), expected);
        assert_eq!(batcher_odd_even_merge_sort(&input), expected);
        assert_eq!(counting_sort(&input).unwrap(), expected);
    }
}
