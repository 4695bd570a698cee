//! Structural graph equality.
//!
//! Two graphs are structurally equal if some bijection between their vertices preserves
//! vertex payloads and, for every ordered vertex pair, the multiset of edge payloads
//! between them. Indices do not matter, so graphs stay comparable across rebuilds and
//! simplification runs that renumber everything.

use crate::index::NodeIndex;
use crate::interface::StaticGraph;

/// Checks whether the two graphs are structurally equal.
///
/// This searches for a payload-preserving vertex bijection by backtracking. Candidates
/// are restricted to vertices with equal payloads and degrees, and every assignment is
/// checked against all earlier assignments immediately, which keeps the search shallow
/// on assembly graphs where most sequences are distinct. The worst case is still
/// exponential, as graph isomorphism has no known polynomial algorithm.
pub fn structurally_equal<Graph1, Graph2>(first: &Graph1, second: &Graph2) -> bool
where
    Graph1: StaticGraph,
    Graph2: StaticGraph<NodeData = Graph1::NodeData, EdgeData = Graph1::EdgeData>,
    Graph1::NodeData: Eq,
    Graph1::EdgeData: Eq,
{
    if first.node_count() != second.node_count() || first.edge_count() != second.edge_count() {
        return false;
    }
    if first.node_count() == 0 {
        return true;
    }

    let first_nodes: Vec<NodeIndex> = first.node_indices().collect();
    let second_nodes: Vec<NodeIndex> = second.node_indices().collect();

    let mut candidates: Vec<Vec<usize>> = Vec::with_capacity(first_nodes.len());
    for &first_node in &first_nodes {
        let node_candidates: Vec<usize> = second_nodes
            .iter()
            .enumerate()
            .filter(|&(_, &second_node)| {
                first.node_data(first_node) == second.node_data(second_node)
                    && first.out_degree(first_node) == second.out_degree(second_node)
                    && first.in_degree(first_node) == second.in_degree(second_node)
            })
            .map(|(position, _)| position)
            .collect();
        if node_candidates.is_empty() {
            return false;
        }
        candidates.push(node_candidates);
    }

    // Assigning the most constrained vertices first prunes the search earliest.
    let mut order: Vec<usize> = (0..first_nodes.len()).collect();
    order.sort_unstable_by_key(|&position| candidates[position].len());

    let mut search = Search {
        first,
        second,
        first_nodes: &first_nodes,
        second_nodes: &second_nodes,
        candidates: &candidates,
        order: &order,
        mapping: vec![usize::MAX; first_nodes.len()],
        used: vec![false; second_nodes.len()],
    };
    search.assign(0)
}

struct Search<'a, Graph1: StaticGraph, Graph2: StaticGraph> {
    first: &'a Graph1,
    second: &'a Graph2,
    first_nodes: &'a [NodeIndex],
    second_nodes: &'a [NodeIndex],
    candidates: &'a [Vec<usize>],
    order: &'a [usize],
    /// For each position in `first_nodes`, the mapped position in `second_nodes`, or
    /// `usize::MAX` while unassigned.
    mapping: Vec<usize>,
    used: Vec<bool>,
}

impl<'a, Graph1, Graph2> Search<'a, Graph1, Graph2>
where
    Graph1: StaticGraph,
    Graph2: StaticGraph<NodeData = Graph1::NodeData, EdgeData = Graph1::EdgeData>,
    Graph1::EdgeData: Eq,
{
    fn assign(&mut self, depth: usize) -> bool {
        if depth == self.order.len() {
            return true;
        }
        let first_position = self.order[depth];
        for candidate_index in 0..self.candidates[first_position].len() {
            let second_position = self.candidates[first_position][candidate_index];
            if self.used[second_position] {
                continue;
            }
            if self.edges_consistent(depth, first_position, second_position) {
                self.mapping[first_position] = second_position;
                self.used[second_position] = true;
                if self.assign(depth + 1) {
                    return true;
                }
                self.mapping[first_position] = usize::MAX;
                self.used[second_position] = false;
            }
        }
        false
    }

    /// Checks the edges between the new pair and every already assigned pair, in both
    /// directions, including the self-loops of the new pair. Every ordered vertex pair
    /// is checked exactly once over the whole search, when its later vertex is assigned.
    fn edges_consistent(
        &self,
        depth: usize,
        first_position: usize,
        second_position: usize,
    ) -> bool {
        let first_node = self.first_nodes[first_position];
        let second_node = self.second_nodes[second_position];
        if !self.edge_multiset_equal(first_node, first_node, second_node, second_node) {
            return false;
        }
        for &assigned_position in &self.order[..depth] {
            let assigned_first = self.first_nodes[assigned_position];
            let assigned_second = self.second_nodes[self.mapping[assigned_position]];
            if !self.edge_multiset_equal(first_node, assigned_first, second_node, assigned_second)
                || !self.edge_multiset_equal(
                    assigned_first,
                    first_node,
                    assigned_second,
                    second_node,
                )
            {
                return false;
            }
        }
        true
    }

    fn edge_multiset_equal(
        &self,
        first_from: NodeIndex,
        first_to: NodeIndex,
        second_from: NodeIndex,
        second_to: NodeIndex,
    ) -> bool {
        let mut second_data: Vec<Option<&Graph1::EdgeData>> = self
            .second
            .edges_between(second_from, second_to)
            .map(|edge_id| Some(self.second.edge_data(edge_id)))
            .collect();
        let mut first_count = 0;
        for edge_id in self.first.edges_between(first_from, first_to) {
            first_count += 1;
            let edge_data = self.first.edge_data(edge_id);
            let matched = second_data
                .iter_mut()
                .find(|entry| **entry == Some(edge_data));
            match matched {
                Some(entry) => *entry = None,
                None => return false,
            }
        }
        first_count == second_data.len()
    }
}
