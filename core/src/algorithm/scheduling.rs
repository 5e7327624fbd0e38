//! Johnson's rule for two-machine flow-shop scheduling.
//!
//! Jobs are (machine A, machine B) processing-time pairs. Johnson's rule:
//! jobs whose A-time is strictly smaller than their B-time run first, in
//! ascending A-time; the rest run last, in descending B-time. The resulting
//! order minimizes makespan, which a brute-force oracle confirms on small
//! instances.

use crate::error::HarnessError;

/// Job order minimizing two-machine makespan. Returns indices into `jobs`.
/// O(n log n).
pub fn johnson_rule(jobs: &[(u32, u32)]) -> Result<Vec<usize>, HarnessError> {
    let mut head: Vec<usize> = Vec::new();
    let mut tail: Vec<usize> = Vec::new();
    for (index, &(a, b)) in jobs.iter().enumerate() {
        if a < b {
            head.push(index);
        } else {
            tail.push(index);
        }
    }
    head.sort_by_key(|&i| (jobs[i].0, i));
    tail.sort_by(|&i, &j| jobs[j].1.cmp(&jobs[i].1).then(i.cmp(&j)));
    head.extend(tail);
    Ok(head)
}

/// Simulate the two machines for a given order and return the makespan, the
/// completion time of the last job on machine B.
pub fn makespan(jobs: &[(u32, u32)], order: &[usize]) -> Result<u64, HarnessError> {
    if order.len() != jobs.len() {
        return Err(HarnessError::invalid_input(format!(
            "order length {} does not match job count {}",
            order.len(),
            jobs.len()
        )));
    }
    let mut seen = vec![false; jobs.len()];
    let mut machine_a: u64 = 0;
    let mut machine_b: u64 = 0;
    for &index in order {
        let Some(&(a, b)) = jobs.get(index) else {
            return Err(HarnessError::invalid_input(format!(
                "order references unknown job {index}"
            )));
        };
        if seen[index] {
            return Err(HarnessError::invalid_input(format!(
                "order repeats job {index}"
            )));
        }
        seen[index] = true;
        machine_a += u64::from(a);
        machine_b = machine_b.max(machine_a) + u64::from(b);
    }
    Ok(machine_b)
}

/// Job-count ceiling for the factorial oracle.
const BRUTE_FORCE_MAX_JOBS: usize = 8;

/// Minimum makespan over every permutation, for differential checks on small
/// instances.
pub fn brute_force_min_makespan(jobs: &[(u32, u32)]) -> Result<u64, HarnessError> {
    if jobs.len() > BRUTE_FORCE_MAX_JOBS {
        return Err(HarnessError::invalid_input(format!(
            "brute-force oracle capped at {BRUTE_FORCE_MAX_JOBS} jobs, got {}",
            jobs.len()
        )));
    }
    if jobs.is_empty() {
        return Ok(0);
    }
    let mut order: Vec<usize> = (0..jobs.len()).collect();
    let mut best = u64::MAX;
    permute(&mut order, 0, jobs, &mut best)?;
    Ok(best)
}

fn permute(
    order: &mut Vec<usize>,
    depth: usize,
    jobs: &[(u32, u32)],
    best: &mut u64,
) -> Result<(), HarnessError> {
    if depth == order.len() {
        *best = (*best).min(makespan(jobs, order)?);
        return Ok(());
    }
    for i in depth..order.len() {
        order.swap(depth, i);
        permute(order, depth + 1, jobs, best)?;
        order.swap(depth, i);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_johnson_textbook_instance() {
        // Classic five-job instance.
        let jobs = [(3, 6), (7, 2), (4, 7), (5, 3), (1, 5)];
        let order = johnson_rule(&jobs).unwrap();

        // a < b jobs ascending by a: 4 (1), 0 (3), 2 (4); then a >= b
        // descending by b: 3 (3), 1 (2).
        assert_eq!(order, vec![4, 0, 2, 3, 1]);
        assert_eq!(
            makespan(&jobs, &order).unwrap(),
            brute_force_min_makespan(&jobs).unwrap()
        );
    }

    #[test]
    fn test_johnson_empty_and_singleton() {
        assert!(johnson_rule(&[]).unwrap().is_empty());
        let jobs = [(4, 9)];
        assert_eq!(johnson_rule(&jobs).unwrap(), vec![0]);
        assert_eq!(makespan(&jobs, &[0]).unwrap(), 13);
    }

    #[test]
    fn test_johnson_is_optimal_on_ties() {
        let jobs = [(2, 2), (2, 2), (1, 3), (3, 1)];
        let order = johnson_rule(&jobs).unwrap();
        assert_eq!(
            makespan(&jobs, &order).unwrap(),
            brute_force_min_makespan(&jobs).unwrap()
        );
    }

    #[test]
    fn test_makespan_rejects_non_permutations() {
        let jobs = [(1, 1), (2, 2)];
        assert!(makespan(&jobs, &[0]).is_err());
        assert!(makespan(&jobs, &[0, 0]).is_err());
        assert!(makespan(&jobs, &[0, 7]).is_err());
    }
}
