//! Reference graph implementations: Kruskal's minimum spanning forest with
//! union-find, a brute-force optimality oracle for small instances, and
//! binary tree traversals in both recursive and explicit-stack form.
//!
//! Kruskal's correctness rests on the cycle property: for any cycle, the
//! maximum-weight edge is in no minimum spanning forest, so greedily taking
//! the lightest non-cycle-forming edge is safe.

use std::cmp::Ordering;

use crate::error::HarnessError;
use crate::problem::{Forest, GraphProblem, TreeProblem};

/// Union-find with path compression and union by rank. Amortized O(alpha(n))
/// per operation.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
    components: usize,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            components: n,
        }
    }

    /// Find the set representative for x, flattening the path on the way up.
    pub fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    /// Merge the sets containing x and y. Returns false when they were
    /// already joined, which is exactly the cycle-forming case.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return false;
        }
        match self.rank[root_x].cmp(&self.rank[root_y]) {
            Ordering::Less => self.parent[root_x] = root_y,
            Ordering::Greater => self.parent[root_y] = root_x,
            Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] += 1;
            }
        }
        self.components -= 1;
        true
    }

    pub fn connected(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    pub fn components(&self) -> usize {
        self.components
    }
}

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

/// Kruskal's minimum spanning forest.
///
/// Edges are taken in ascending weight order (ties broken by endpoints and
/// index so the result is deterministic); an edge joins the forest exactly
/// when its endpoints lie in different components. Disconnected graphs
/// produce a forest with one tree per component, which is why no
/// connectivity precondition exists. O(E log E).
pub fn kruskal(problem: &GraphProblem) -> Result<Forest, HarnessError> {
    ensure_graph_problem(problem)?;
    let mut order: Vec<usize> = (0..problem.edges.len()).collect();
    order.sort_by(|&i, &j| {
        let (ui, vi, wi) = problem.edges[i];
        let (uj, vj, wj) = problem.edges[j];
        wi.partial_cmp(&wj)
            .unwrap_or(Ordering::Equal)
            .then_with(|| (ui, vi, i).cmp(&(uj, vj, j)))
    });

    let mut forest = UnionFind::new(problem.nodes);
    let mut edge_indices = Vec::new();
    let mut total_weight = 0.0;
    for index in order {
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

/// Number of connected components induced by the full edge set.
pub fn component_count(problem: &GraphProblem) -> Result<usize, HarnessError> {
    ensure_graph_problem(problem)?;
    let mut sets = UnionFind::new(problem.nodes);
    for &(u, v, _) in &problem.edges {
        sets.union(u, v);
    }
    Ok(sets.components())
}

/// Check that a candidate edge selection is a spanning forest: acyclic, built
/// from real edge indices, and connecting exactly what the graph connects.
pub fn is_spanning_forest(problem: &GraphProblem, forest: &Forest) -> Result<bool, HarnessError> {
    ensure_graph_problem(problem)?;
    let mut sets = UnionFind::new(problem.nodes);
    let mut seen = vec![false; problem.edges.len()];
    for &index in &forest.edge_indices {
        let Some(&(u, v, _)) = problem.edges.get(index) else {
            return Ok(false);
        };
        if seen[index] {
            return Ok(false);
        }
        seen[index] = true;
        if !sets.union(u, v) {
            return Ok(false); // cycle
        }
    }
    Ok(sets.components() == component_count(problem)?)
}

/// Edge-count ceiling for the exhaustive oracle; 2^20 subsets at most.
const BRUTE_FORCE_MAX_EDGES: usize = 20;

/// Exhaustively find the minimum spanning forest weight. Intended as the
/// optimality oracle for small instances.
pub fn brute_force_min_forest_weight(problem: &GraphProblem) -> Result<f64, HarnessError> {
    ensure_graph_problem(problem)?;
    if problem.edges.len() > BRUTE_FORCE_MAX_EDGES {
        return Err(HarnessError::invalid_input(format!(
            "brute-force oracle capped at {BRUTE_FORCE_MAX_EDGES} edges, got {}",
            problem.edges.len()
        )));
    }
    let target_components = component_count(problem)?;
    let mut best = f64::INFINITY;
    for mask in 0u32..(1u32 << problem.edges.len()) {
        let mut sets = UnionFind::new(problem.nodes);
        let mut weight = 0.0;
        let mut acyclic = true;
        for (index, &(u, v, w)) in problem.edges.iter().enumerate() {
            if mask & (1 << index) != 0 {
                if !sets.union(u, v) {
                    acyclic = false;
                    break;
                }
                weight += w;
            }
        }
        if acyclic && sets.components() == target_components && weight < best {
            best = weight;
        }
    }
    Ok(best)
}

fn ensure_tree(tree: &TreeProblem) -> Result<(), HarnessError> {
    let n = tree.nodes.len();
    if let Some(root) = tree.root {
        if root >= n {
            return Err(HarnessError::invalid_input(format!(
                "root {root} outside arena of {n} nodes"
            )));
        }
    } else if n > 0 {
        return Err(HarnessError::invalid_input(
            "non-empty arena requires a root",
        ));
    }
    // Every node may be referenced as a child at most once, and the links
    // must stay inside the arena; anything else is a shared subtree or cycle.
    let mut referenced = vec![false; n];
    for (index, node) in tree.nodes.iter().enumerate() {
        for child in [node.left, node.right].into_iter().flatten() {
            if child >= n {
                return Err(HarnessError::invalid_input(format!(
                    "node {index} links to out-of-range child {child}"
                )));
            }
            if child == index || referenced[child] || Some(child) == tree.root {
                return Err(HarnessError::invalid_input(format!(
                    "node {child} is referenced more than once"
                )));
            }
            referenced[child] = true;
        }
    }
    Ok(())
}

/// Pre-order traversal: node, then left subtree, then right subtree.
pub fn preorder(tree: &TreeProblem) -> Result<Vec<i64>, HarnessError> {
    ensure_tree(tree)?;
    let mut out = Vec::with_capacity(tree.len());
    preorder_recurse(tree, tree.root, &mut out);
    Ok(out)
}

fn preorder_recurse(tree: &TreeProblem, node: Option<usize>, out: &mut Vec<i64>) {
    if let Some(index) = node {
        out.push(tree.nodes[index].value);
        preorder_recurse(tree, tree.nodes[index].left, out);
        preorder_recurse(tree, tree.nodes[index].right, out);
    }
}

/// Pre-order with an explicit owned stack instead of call-stack recursion.
/// Children are pushed right-first so the left subtree pops first.
pub fn preorder_iterative(tree: &TreeProblem) -> Result<Vec<i64>, HarnessError> {
    ensure_tree(tree)?;
    let mut out = Vec::with_capacity(tree.len());
    let mut stack: Vec<usize> = Vec::new();
    stack.extend(tree.root);
    while let Some(index) = stack.pop() {
        let node = &tree.nodes[index];
        out.push(node.value);
        stack.extend(node.right);
        stack.extend(node.left);
    }
    Ok(out)
}

/// In-order traversal: left subtree, node, right subtree.
pub fn inorder(tree: &TreeProblem) -> Result<Vec<i64>, HarnessError> {
    ensure_tree(tree)?;
    let mut out = Vec::with_capacity(tree.len());
    inorder_recurse(tree, tree.root, &mut out);
    Ok(out)
}

fn inorder_recurse(tree: &TreeProblem, node: Option<usize>, out: &mut Vec<i64>) {
    if let Some(index) = node {
        inorder_recurse(tree, tree.nodes[index].left, out);
        out.push(tree.nodes[index].value);
        inorder_recurse(tree, tree.nodes[index].right, out);
    }
}

/// In-order with an explicit stack: slide down left spines, then visit and
/// step into the right child.
pub fn inorder_iterative(tree: &TreeProblem) -> Result<Vec<i64>, HarnessError> {
    ensure_tree(tree)?;
    let mut out = Vec::with_capacity(tree.len());
    let mut stack: Vec<usize> = Vec::new();
    let mut cursor = tree.root;
    while cursor.is_some() || !stack.is_empty() {
        while let Some(index) = cursor {
            stack.push(index);
            cursor = tree.nodes[index].left;
        }
        if let Some(index) = stack.pop() {
            out.push(tree.nodes[index].value);
            cursor = tree.nodes[index].right;
        }
    }
    Ok(out)
}

/// Post-order traversal: left subtree, right subtree, then node. The source
/// corpus had a variant that visited right before left and prepended each
/// value; this one appends, left before right.
pub fn postorder(tree: &TreeProblem) -> Result<Vec<i64>, HarnessError> {
    ensure_tree(tree)?;
    let mut out = Vec::with_capacity(tree.len());
    postorder_recurse(tree, tree.root, &mut out);
    Ok(out)
}

fn postorder_recurse(tree: &TreeProblem, node: Option<usize>, out: &mut Vec<i64>) {
    if let Some(index) = node {
        postorder_recurse(tree, tree.nodes[index].left, out);
        postorder_recurse(tree, tree.nodes[index].right, out);
        out.push(tree.nodes[index].value);
    }
}

/// Post-order with two explicit stacks: the first produces a reverse
/// post-order, the second reverses it.
pub fn postorder_iterative(tree: &TreeProblem) -> Result<Vec<i64>, HarnessError> {
    ensure_tree(tree)?;
    let mut reversed = Vec::with_capacity(tree.len());
    let mut stack: Vec<usize> = Vec::new();
    stack.extend(tree.root);
    while let Some(index) = stack.pop() {
        let node = &tree.nodes[index];
        reversed.push(node.value);
        stack.extend(node.left);
        stack.extend(node.right);
    }
    reversed.reverse();
    Ok(reversed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::TreeNode;

    fn spec_graph() -> GraphProblem {
        GraphProblem {
            nodes: 4,
            edges: vec![
                (0, 1, 4.0),
                (0, 2, 3.0),
                (1, 2, 1.0),
                (1, 3, 2.0),
                (2, 3, 4.0),
            ],
        }
    }

    #[test]
    fn test_kruskal_scenario_weight_six() {
        let forest = kruskal(&spec_graph()).unwrap();
        assert_eq!(forest.total_weight, 6.0);
        // Edges (1,2,1), (1,3,2), (0,2,3).
        assert_eq!(forest.edge_indices, vec![1, 2, 3]);
    }

    #[test]
    fn test_kruskal_matches_brute_force() {
        let problem = spec_graph();
        let forest = kruskal(&problem).unwrap();
        assert!(is_spanning_forest(&problem, &forest).unwrap());
        assert_eq!(
            forest.total_weight,
            brute_force_min_forest_weight(&problem).unwrap()
        );
    }

    #[test]
    fn test_kruskal_disconnected_graph_yields_forest() {
        let problem = GraphProblem {
            nodes: 5,
            edges: vec![(0, 1, 1.0), (1, 2, 2.0), (3, 4, 1.5)],
        };
        let forest = kruskal(&problem).unwrap();
        assert_eq!(forest.edge_indices.len(), 3);
        assert_eq!(forest.total_weight, 4.5);
        assert!(is_spanning_forest(&problem, &forest).unwrap());
        assert_eq!(component_count(&problem).unwrap(), 2);
    }

    #[test]
    fn test_kruskal_rejects_bad_edges() {
        let problem = GraphProblem {
            nodes: 2,
            edges: vec![(0, 5, 1.0)],
        };
        assert!(kruskal(&problem).is_err());
    }

    #[test]
    fn test_union_find_components() {
        let mut sets = UnionFind::new(4);
        assert_eq!(sets.components(), 4);
        assert!(sets.union(0, 1));
        assert!(sets.union(2, 3));
        assert!(!sets.union(1, 0));
        assert_eq!(sets.components(), 2);
        assert!(sets.connected(0, 1));
        assert!(!sets.connected(0, 2));
    }

    //       1
    //      / \
    //     2   3
    //    / \
    //   4   5
    fn sample_tree() -> TreeProblem {
        TreeProblem {
            nodes: vec![
                TreeNode { value: 1, left: Some(1), right: Some(2) },
                TreeNode { value: 2, left: Some(3), right: Some(4) },
                TreeNode { value: 3, left: None, right: None },
                TreeNode { value: 4, left: None, right: None },
                TreeNode { value: 5, left: None, right: None },
            ],
            root: Some(0),
        }
    }

    #[test]
    fn test_traversal_orders() {
        let tree = sample_tree();
        assert_eq!(preorder(&tree).unwrap(), vec![1, 2, 4, 5, 3]);
        assert_eq!(inorder(&tree).unwrap(), vec![4, 2, 5, 1, 3]);
        assert_eq!(postorder(&tree).unwrap(), vec![4, 5, 2, 3, 1]);
    }

    #[test]
    fn test_iterative_matches_recursive() {
        let tree = sample_tree();
        assert_eq!(preorder_iterative(&tree).unwrap(), preorder(&tree).unwrap());
        assert_eq!(inorder_iterative(&tree).unwrap(), inorder(&tree).unwrap());
        assert_eq!(
            postorder_iterative(&tree).unwrap(),
            postorder(&tree).unwrap()
        );

        let empty = TreeProblem::empty();
        assert!(preorder(&empty).unwrap().is_empty());
        assert!(postorder_iterative(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_tree_validation_rejects_shared_child() {
        let tree = TreeProblem {
            nodes: vec![
                TreeNode { value: 1, left: Some(1), right: Some(1) },
                TreeNode { value: 2, left: None, right: None },
            ],
            root: Some(0),
        };
        assert!(preorder(&tree).is_err());
    }
}
