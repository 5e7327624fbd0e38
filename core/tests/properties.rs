//! Property tests over the reference implementations.

use proptest::collection::vec;
use proptest::prelude::*;

use veritas_core::algorithm::{cipher, graph, scheduling, searching, sorting};
use veritas_core::problem::GraphProblem;
use veritas_core::SearchOutcome;

fn is_non_decreasing(values: &[i64]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

fn same_multiset(a: &[i64], b: &[i64]) -> bool {
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

proptest! {
    #[test]
    fn prop_merge_sort_sorts_a_permutation(input in vec(-100_i64..=100, 0..64)) {
        let output = sorting::merge_sort(&input);
        prop_assert!(is_non_decreasing(&output));
        prop_assert!(same_multiset(&input, &output));
    }

    #[test]
    fn prop_all_sorts_agree(input in vec(-100_i64..=100, 0..48)) {
        let expected = sorting::merge_sort(&input);
        prop_assert_eq!(sorting::selection_sort(&input), expected.clone());
        prop_assert_eq!(sorting::odd_even_sort(&input), expected.clone());
        prop_assert_eq!(sorting::batcher_odd_even_merge_sort(&input), expected.clone());
        prop_assert_eq!(sorting::counting_sort(&input).unwrap(), expected);
    }

    #[test]
    fn prop_merge_sort_is_stable(input in vec(-5_i64..=5, 0..48)) {
        let tagged: Vec<(i64, u32)> = input
            .iter()
            .enumerate()
            .map(|(i, &v)| (v, i as u32))
            .collect();
        let sorted = sorting::merge_sort_by(&tagged, &|a, b| a.0.cmp(&b.0));
        prop_assert!(sorted.windows(2).all(|w| w[0].0 < w[1].0 || w[0].1 < w[1].1));
    }

    #[test]
    fn prop_binary_search_matches_scan(
        mut haystack in vec(-100_i64..=100, 0..64),
        target in -110_i64..=110,
    ) {
        haystack.sort_unstable();
        let outcome = searching::binary_search(&haystack, target).unwrap();
        match outcome {
            SearchOutcome::Found(index) => prop_assert_eq!(haystack[index], target),
            SearchOutcome::NotFound => prop_assert!(!haystack.contains(&target)),
            SearchOutcome::Cutoff => prop_assert!(false, "array search produced Cutoff"),
        }
    }

    #[test]
    fn prop_array_searches_agree_on_presence(
        mut haystack in vec(-100_i64..=100, 0..64),
        target in -110_i64..=110,
    ) {
        haystack.sort_unstable();
        let expectation = haystack.contains(&target);
        for outcome in [
            searching::binary_search(&haystack, target).unwrap(),
            searching::jump_search(&haystack, target).unwrap(),
            searching::exponential_search(&haystack, target).unwrap(),
            searching::multiplicative_binary_search(&haystack, target).unwrap(),
        ] {
            match outcome {
                SearchOutcome::Found(index) => {
                    prop_assert!(expectation);
                    prop_assert_eq!(haystack[index], target);
                }
                SearchOutcome::NotFound => prop_assert!(!expectation),
                SearchOutcome::Cutoff => prop_assert!(false, "array search produced Cutoff"),
            }
        }
    }

    #[test]
    fn prop_autokey_round_trips(
        plaintext in "[A-Z]{0,24}",
        key in "[A-Z]{1,8}",
    ) {
        let ciphertext = cipher::autokey_encrypt(&plaintext, &key).unwrap();
        let recovered = cipher::autokey_decrypt(&ciphertext, &key).unwrap();
        prop_assert_eq!(recovered, plaintext);
    }

    #[test]
    fn prop_polybius_round_trips(
        plaintext in "[A-IK-Z]{0,24}",
        key in "[A-IK-Z]{1,8}",
    ) {
        let ciphertext = cipher::polybius_encrypt(&plaintext, &key).unwrap();
        let recovered = cipher::polybius_decrypt(&ciphertext, &key).unwrap();
        prop_assert_eq!(recovered, plaintext);
    }

    #[test]
    fn prop_luhn_detects_single_substitutions(payload in vec(0_u32..10, 1..16)) {
        let modulus = 10;
        let check = cipher::luhn_mod_n_check_digit(&payload, modulus).unwrap();
        let mut full = payload.clone();
        full.push(check);
        prop_assert!(cipher::luhn_mod_n_validate(&full, modulus).unwrap());

        for position in 0..full.len() {
            for delta in 1..modulus {
                let mut corrupted = full.clone();
                corrupted[position] = (corrupted[position] + delta) % modulus;
                prop_assert!(
                    !cipher::luhn_mod_n_validate(&corrupted, modulus).unwrap(),
                    "substitution at {} went undetected",
                    position
                );
            }
        }
    }

    #[test]
    fn prop_one_key_mac_is_key_and_message_bound(
        key in vec(any::<u8>(), 1..24),
        message in vec(any::<u8>(), 0..48),
        flip in any::<u8>(),
    ) {
        let tag = cipher::one_key_mac(&key, &message).unwrap();
        prop_assert_eq!(cipher::one_key_mac(&key, &message).unwrap(), tag);

        let mut other_key = key.clone();
        other_key[0] ^= flip | 1;
        prop_assert_ne!(cipher::one_key_mac(&other_key, &message).unwrap(), tag);
    }

    #[test]
    fn prop_kruskal_is_minimal_on_small_graphs(
        nodes in 2_usize..6,
        weights in vec(1_u32..20, 0..10),
    ) {
        let mut edges = Vec::new();
        let mut next = weights.iter();
        'outer: for u in 0..nodes {
            for v in (u + 1)..nodes {
                match next.next() {
                    Some(&w) => edges.push((u, v, f64::from(w))),
                    None => break 'outer,
                }
            }
        }
        let problem = GraphProblem { nodes, edges };
        let forest = graph::kruskal(&problem).unwrap();
        prop_assert!(graph::is_spanning_forest(&problem, &forest).unwrap());
        let minimum = graph::brute_force_min_forest_weight(&problem).unwrap();
        prop_assert!((forest.total_weight - minimum).abs() < 1e-9);
    }

    #[test]
    fn prop_johnson_rule_is_optimal(jobs in vec((0_u32..10, 0_u32..10), 0..7)) {
        let order = scheduling::johnson_rule(&jobs).unwrap();
        let achieved = scheduling::makespan(&jobs, &order).unwrap();
        let minimum = scheduling::brute_force_min_makespan(&jobs).unwrap();
        prop_assert_eq!(achieved, minimum);
    }
}
