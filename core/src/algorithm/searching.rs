//! Reference search implementations.
//!
//! Array searches take a sorted haystack and return an explicit
//! [`SearchOutcome`] rather than signaling absence through errors; errors are
//! reserved for genuine precondition violations such as an unsorted haystack.
//! Graph searches return the depth at which the goal was reached, and
//! depth-limited search keeps `Cutoff` strictly distinct from `NotFound`.

use crate::error::HarnessError;
use crate::problem::SearchOutcome;

fn ensure_sorted(haystack: &[i64]) -> Result<(), HarnessError> {
    if haystack.windows(2).any(|w| w[0] > w[1]) {
        return Err(HarnessError::invalid_input(
            "haystack must be sorted in non-decreasing order",
        ));
    }
    Ok(())
}

/// Dichotomic (binary) search on a sorted slice. O(log n).
///
/// Returns the index of an occurrence of `target` (any occurrence when
/// duplicates exist) or `NotFound`.
pub fn binary_search(haystack: &[i64], target: i64) -> Result<SearchOutcome, HarnessError> {
    ensure_sorted(haystack)?;
    let (mut lo, mut hi) = (0usize, haystack.len());
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

/// Jump search: probe in blocks of floor(sqrt(n)), then scan the block that
/// could contain the target. O(sqrt n).
pub fn jump_search(haystack: &[i64], target: i64) -> Result<SearchOutcome, HarnessError> {
    ensure_sorted(haystack)?;
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
    for i in block_start..block_end {
        if haystack[i] == target {
            return Ok(SearchOutcome::Found(i));
        }
    }
    Ok(SearchOutcome::NotFound)
}

/// Exponential search: grow the probe bound geometrically, then binary-search
/// the bracketed range. O(log i) where i is the match position.
pub fn exponential_search(haystack: &[i64], target: i64) -> Result<SearchOutcome, HarnessError> {
    ensure_sorted(haystack)?;
    let n = haystack.len();
    if n == 0 {
        return Ok(SearchOutcome::NotFound);
    }
    if haystack[0] == target {
        return Ok(SearchOutcome::Found(0));
    }
    let mut bound = 1usize;
    while bound < n && haystack[bound] < target {
        bound *= 2;
    }
    let lo = bound / 2;
    let hi = bound.min(n - 1);
    match binary_search(&haystack[lo..=hi], target)? {
        SearchOutcome::Found(i) => Ok(SearchOutcome::Found(lo + i)),
        other => Ok(other),
    }
}

/// Multiplicative binary search: descend the implicit balanced BST of the
/// sorted haystack, moving to child 2i+1 or 2i+2 at each step. The level-order
/// layout is built internally so the returned index still refers to the
/// original haystack.
pub fn multiplicative_binary_search(
    haystack: &[i64],
    target: i64,
) -> Result<SearchOutcome, HarnessError> {
    ensure_sorted(haystack)?;
    let n = haystack.len();
    if n == 0 {
        return Ok(SearchOutcome::NotFound);
    }
    // Slot count for a balanced tree of n nodes: the deepest slot index is
    // below 2^(ceil(log2(n+1)) + 1).
    let mut slots = 1usize;
    while slots < n + 1 {
        slots *= 2;
    }
    let mut layout: Vec<Option<(i64, usize)>> = vec![None; slots * 2];
    fill_level_order(haystack, 0, n, 0, &mut layout);

    let mut k = 0usize;
    while k < layout.len() {
        match layout[k] {
            None => return Ok(SearchOutcome::NotFound),
            Some((value, index)) => {
                if value == target {
                    return Ok(SearchOutcome::Found(index));
                } else if target < value {
                    k = 2 * k + 1;
                } else {
                    k = 2 * k + 2;
                }
            }
        }
    }
    Ok(SearchOutcome::NotFound)
}

/// Place the midpoint of haystack[lo..hi) at `slot`, then recurse into the
/// halves at the child slots.
fn fill_level_order(
    haystack: &[i64],
    lo: usize,
    hi: usize,
    slot: usize,
    layout: &mut Vec<Option<(i64, usize)>>,
) {
    if lo >= hi {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    if slot >= layout.len() {
        layout.resize(slot + 1, None);
    }
    layout[slot] = Some((haystack[mid], mid));
    fill_level_order(haystack, lo, mid, 2 * slot + 1, layout);
    fill_level_order(haystack, mid + 1, hi, 2 * slot + 2, layout);
}

fn ensure_graph(adjacency: &[Vec<usize>], start: usize, goal: usize) -> Result<(), HarnessError> {
    let n = adjacency.len();
    if start >= n || goal >= n {
        return Err(HarnessError::invalid_input(format!(
            "start {start} or goal {goal} outside graph of {n} nodes"
        )));
    }
    for (node, neighbors) in adjacency.iter().enumerate() {
        if let Some(&bad) = neighbors.iter().find(|&&v| v >= n) {
            return Err(HarnessError::invalid_input(format!(
                "node {node} has out-of-range neighbor {bad}"
            )));
        }
    }
    Ok(())
}

/// Depth-limited depth-first search.
///
/// Returns `Found(d)` when the goal is reached at depth d <= limit,
/// `Cutoff` when the bound was hit somewhere before the reachable space was
/// exhausted, and `NotFound` only when exhaustion was established. The three
/// outcomes are never conflated.
pub fn depth_limited_search(
    adjacency: &[Vec<usize>],
    start: usize,
    goal: usize,
    limit: usize,
) -> Result<SearchOutcome, HarnessError> {
    ensure_graph(adjacency, start, goal)?;
    let mut on_path = vec![false; adjacency.len()];
    Ok(dls_recurse(adjacency, start, goal, limit, &mut on_path))
}

fn dls_recurse(
    adjacency: &[Vec<usize>],
    node: usize,
    goal: usize,
    limit: usize,
    on_path: &mut [bool],
) -> SearchOutcome {
    if node == goal {
        return SearchOutcome::Found(0);
    }
    if limit == 0 {
        return SearchOutcome::Cutoff;
    }
    on_path[node] = true;
    let mut cutoff_seen = false;
    for &next in &adjacency[node] {
        if on_path[next] {
            continue;
        }
        match dls_recurse(adjacency, next, goal, limit - 1, on_path) {
            SearchOutcome::Found(d) => {
                on_path[node] = false;
                return SearchOutcome::Found(d + 1);
            }
            SearchOutcome::Cutoff => cutoff_seen = true,
            SearchOutcome::NotFound => {}
        }
    }
    on_path[node] = false;
    if cutoff_seen {
        SearchOutcome::Cutoff
    } else {
        SearchOutcome::NotFound
    }
}

/// Iterative depth-first search with an explicit owned stack and visited
/// markers, replacing call-stack recursion. Returns the depth at which the
/// goal was first popped.
pub fn stack_search(
    adjacency: &[Vec<usize>],
    start: usize,
    goal: usize,
) -> Result<SearchOutcome, HarnessError> {
    ensure_graph(adjacency, start, goal)?;
    let mut visited = vec![false; adjacency.len()];
    let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
    while let Some((node, depth)) = stack.pop() {
        if visited[node] {
            continue;
        }
        visited[node] = true;
        if node == goal {
            return Ok(SearchOutcome::Found(depth));
        }
        // Push in reverse so neighbors are explored in adjacency order.
        for &next in adjacency[node].iter().rev() {
            if !visited[next] {
                stack.push((next, depth + 1));
            }
        }
    }
    Ok(SearchOutcome::NotFound)
}

/// Trigram substring search: index every 3-gram of the haystack, use the
/// needle's first 3-gram to pick candidate offsets, then confirm with a direct
/// comparison. Needles shorter than three bytes fall back to a linear scan.
///
/// Returns the byte offset of the first occurrence.
pub fn trigram_search(haystack: &str, needle: &str) -> Result<SearchOutcome, HarnessError> {
    if needle.is_empty() {
        return Err(HarnessError::invalid_input("needle must be non-empty"));
    }
    let hay = haystack.as_bytes();
    let pat = needle.as_bytes();
    if pat.len() > hay.len() {
        return Ok(SearchOutcome::NotFound);
    }
    if pat.len() < 3 {
        let found = hay
            .windows(pat.len())
            .position(|w| w == pat)
            .map(SearchOutcome::Found);
        return Ok(found.unwrap_or(SearchOutcome::NotFound));
    }

    let mut index: std::collections::HashMap<[u8; 3], Vec<usize>> =
        std::collections::HashMap::new();
    for (offset, gram) in hay.windows(3).enumerate() {
        index
            .entry([gram[0], gram[1], gram[2]])
            .or_default()
            .push(offset);
    }
    let lead = [pat[0], pat[1], pat[2]];
    if let Some(candidates) = index.get(&lead) {
        for &offset in candidates {
            if offset + pat.len() <= hay.len() && &hay[offset..offset + pat.len()] == pat {
                return Ok(SearchOutcome::Found(offset));
            }
        }
    }
    Ok(SearchOutcome::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SORTED: [i64; 5] = [1, 3, 5, 7, 9];

    #[test]
    fn test_binary_search_scenario() {
        assert_eq!(
            binary_search(&SORTED, 7).unwrap(),
            SearchOutcome::Found(3)
        );
        assert_eq!(binary_search(&SORTED, 4).unwrap(), SearchOutcome::NotFound);
    }

    #[test]
    fn test_binary_search_rejects_unsorted() {
        let err = binary_search(&[3, 1, 2], 2).unwrap_err();
        assert!(matches!(err, HarnessError::InvalidInput(_)));
    }

    #[test]
    fn test_binary_search_boundaries() {
        assert_eq!(binary_search(&[], 1).unwrap(), SearchOutcome::NotFound);
        assert_eq!(binary_search(&SORTED, 1).unwrap(), SearchOutcome::Found(0));
        assert_eq!(binary_search(&SORTED, 9).unwrap(), SearchOutcome::Found(4));
    }

    #[test]
    fn test_array_searches_agree_with_scan() {
        let haystack: Vec<i64> = (0..40).map(|i| i * 3).collect();
        for target in -2..125 {
            let expected = haystack.iter().position(|&x| x == target);
            for search in [
                binary_search,
                jump_search,
                exponential_search,
                multiplicative_binary_search,
            ] {
                let outcome = search(&haystack, target).unwrap();
                match expected {
                    Some(i) => assert_eq!(outcome, SearchOutcome::Found(i), "target {target}"),
                    None => assert_eq!(outcome, SearchOutcome::NotFound, "target {target}"),
                }
            }
        }
    }

    #[test]
    fn test_jump_search_non_square_lengths() {
        for n in [1usize, 2, 3, 10, 15, 16, 17, 26] {
            let haystack: Vec<i64> = (0..n as i64).collect();
            for target in 0..n as i64 {
                assert_eq!(
                    jump_search(&haystack, target).unwrap(),
                    SearchOutcome::Found(target as usize),
                    "n={n}"
                );
            }
            assert_eq!(
                jump_search(&haystack, n as i64).unwrap(),
                SearchOutcome::NotFound
            );
        }
    }

    // 0 -> 1 -> 2 -> 3, plus a side branch 0 -> 4.
    fn chain_graph() -> Vec<Vec<usize>> {
        vec![vec![1, 4], vec![2], vec![3], vec![], vec![]]
    }

    #[test]
    fn test_depth_limited_outcomes_are_distinct() {
        let g = chain_graph();
        // Goal at depth 3.
        assert_eq!(
            depth_limited_search(&g, 0, 3, 3).unwrap(),
            SearchOutcome::Found(3)
        );
        // Bound too small: cutoff, not "not found".
        assert_eq!(
            depth_limited_search(&g, 0, 3, 2).unwrap(),
            SearchOutcome::Cutoff
        );
        // Unreachable goal with a generous bound: genuinely not found.
        let disconnected = vec![vec![1], vec![0], vec![]];
        assert_eq!(
            depth_limited_search(&disconnected, 0, 2, 10).unwrap(),
            SearchOutcome::NotFound
        );
    }

    #[test]
    fn test_stack_search_matches_reachability() {
        let g = chain_graph();
        assert!(matches!(
            stack_search(&g, 0, 3).unwrap(),
            SearchOutcome::Found(_)
        ));
        assert_eq!(stack_search(&g, 3, 0).unwrap(), SearchOutcome::NotFound);
    }

    #[test]
    fn test_trigram_search() {
        assert_eq!(
            trigram_search("the quick brown fox", "brown").unwrap(),
            SearchOutcome::Found(10)
        );
        assert_eq!(
            trigram_search("the quick brown fox", "crown").unwrap(),
            SearchOutcome::NotFound
        );
        // Short needle falls back to a scan.
        assert_eq!(
            trigram_search("abcabc", "bc").unwrap(),
            SearchOutcome::Found(1)
        );
        assert!(trigram_search("abc", "").is_err());
    }
}
