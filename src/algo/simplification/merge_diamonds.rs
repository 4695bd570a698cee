//! Contraction of diamond subgraphs.

use super::VertexTransform;
use crate::algo::{add_or_merge_edge, SequenceGraph};
use crate::data::{SequenceEdge, SequenceVertex};
use crate::index::NodeIndex;
use itertools::Itertools;

/// How the diamond pass combines the multiplicities of the two edges of a middle path
/// that collapses completely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMultiplicity {
    /// The path is only as well supported as its weakest edge: the replacement edge
    /// takes the minimum of the two multiplicities.
    WeakestLink,
    /// The replacement edge takes the sum of the two multiplicities.
    Sum,
}

impl PathMultiplicity {
    fn combine(self, top_multiplicity: u32, bottom_multiplicity: u32) -> u32 {
        match self {
            PathMultiplicity::WeakestLink => top_multiplicity.min(bottom_multiplicity),
            PathMultiplicity::Sum => top_multiplicity + bottom_multiplicity,
        }
    }
}

impl Default for PathMultiplicity {
    fn default() -> Self {
        PathMultiplicity::WeakestLink
    }
}

/// Collapses a diamond: a vertex whose successors form a layer of simple middle vertices
/// that all reconverge on one common bottom vertex fed by nobody else.
///
/// The shared prefix of the middle sequences moves into the top vertex and the shared
/// suffix into the bottom vertex. Middles consumed completely by the shared affixes are
/// deleted and replaced by a direct top-to-bottom edge; replacements for the same
/// ordered pair merge into one edge. A diamond whose middles share no bases at all is
/// left alone, so collapsing cannot loop on its own output.
pub struct MergeDiamonds {
    path_multiplicity: PathMultiplicity,
}

impl MergeDiamonds {
    /// Creates the pass with the default weakest-link multiplicity combination.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the pass with the given multiplicity combination.
    pub fn with_policy(path_multiplicity: PathMultiplicity) -> Self {
        Self { path_multiplicity }
    }
}

impl Default for MergeDiamonds {
    fn default() -> Self {
        Self {
            path_multiplicity: PathMultiplicity::default(),
        }
    }
}

struct Diamond {
    middles: Vec<NodeIndex>,
    bottom: NodeIndex,
    prefix_len: usize,
    suffix_len: usize,
}

fn find_diamond<Graph: SequenceGraph>(graph: &Graph, top: NodeIndex) -> Option<Diamond> {
    let mut middles: Vec<NodeIndex> = Vec::new();
    for neighbor in graph.out_neighbors(top) {
        // Parallel edges into one middle are rejected below via its in-degree.
        if !middles.contains(&neighbor.node_id) {
            middles.push(neighbor.node_id);
        }
    }
    if middles.len() < 2 || middles.contains(&top) {
        return None;
    }
    for &middle in &middles {
        if graph.in_degree(middle) != 1 || graph.out_degree(middle) != 1 {
            return None;
        }
    }

    let bottoms: Vec<NodeIndex> = middles
        .iter()
        .map(|&middle| {
            graph
                .out_neighbors(middle)
                .next()
                .expect("out-degree is one")
                .node_id
        })
        .collect();
    if !bottoms.iter().all_equal() {
        return None;
    }
    let bottom = bottoms[0];
    if bottom == top || middles.contains(&bottom) {
        return None;
    }
    // Each middle contributes exactly one edge into the bottom, so this degree check
    // rejects any other source feeding it.
    if graph.in_degree(bottom) != middles.len() {
        return None;
    }

    let sequences: Vec<&[u8]> = middles
        .iter()
        .map(|&middle| graph.node_data(middle).sequence())
        .collect();
    let prefix_len = longest_common_prefix(&sequences);
    let suffix_len = longest_common_suffix(&sequences, prefix_len);
    if prefix_len + suffix_len == 0 {
        return None;
    }
    Some(Diamond {
        middles,
        bottom,
        prefix_len,
        suffix_len,
    })
}

fn longest_common_prefix(sequences: &[&[u8]]) -> usize {
    let limit = sequences
        .iter()
        .map(|sequence| sequence.len())
        .min()
        .unwrap_or(0);
    let first = sequences[0];
    (0..limit)
        .take_while(|&position| {
            sequences
                .iter()
                .all(|sequence| sequence[position] == first[position])
        })
        .count()
}

/// The longest common suffix of the sequences with their first `prefix_len` bytes
/// removed, so the suffix never overlaps the prefix.
fn longest_common_suffix(sequences: &[&[u8]], prefix_len: usize) -> usize {
    let limit = sequences
        .iter()
        .map(|sequence| sequence.len() - prefix_len)
        .min()
        .unwrap_or(0);
    let first = sequences[0];
    (1..=limit)
        .take_while(|&position| {
            let base = first[first.len() - position];
            sequences
                .iter()
                .all(|sequence| sequence[sequence.len() - position] == base)
        })
        .count()
}

impl<Graph: SequenceGraph> VertexTransform<Graph> for MergeDiamonds {
    fn matches(&self, graph: &Graph, root: NodeIndex) -> bool {
        find_diamond(graph, root).is_some()
    }

    fn transform(&self, graph: &mut Graph, root: NodeIndex) -> bool {
        let diamond = match find_diamond(graph, root) {
            Some(diamond) => diamond,
            None => return false,
        };
        let top = root;

        let top_in: Vec<(NodeIndex, SequenceEdge)> = graph
            .in_neighbors(top)
            .map(|neighbor| (neighbor.node_id, *graph.edge_data(neighbor.edge_id)))
            .collect();
        // A back edge from the bottom to the top is listed once, as an incoming edge of
        // the top.
        let bottom_out: Vec<(NodeIndex, SequenceEdge)> = graph
            .out_neighbors(diamond.bottom)
            .filter(|neighbor| neighbor.node_id != top)
            .map(|neighbor| (neighbor.node_id, *graph.edge_data(neighbor.edge_id)))
            .collect();
        let middle_info: Vec<(NodeIndex, SequenceEdge, SequenceEdge, SequenceVertex)> = diamond
            .middles
            .iter()
            .map(|&middle| {
                let into_edge = graph
                    .edges_between(top, middle)
                    .next()
                    .expect("middles are successors of the top");
                let out_edge = graph
                    .out_neighbors(middle)
                    .next()
                    .expect("out-degree is one")
                    .edge_id;
                let residual = graph
                    .node_data(middle)
                    .without_affixes(diamond.prefix_len, diamond.suffix_len);
                (middle, *graph.edge_data(into_edge), *graph.edge_data(out_edge), residual)
            })
            .collect();

        let first_middle = graph.node_data(diamond.middles[0]);
        let shared_prefix = SequenceVertex::new(&first_middle.sequence()[..diamond.prefix_len]);
        let shared_suffix = SequenceVertex::new(
            &first_middle.sequence()[first_middle.len() - diamond.suffix_len..],
        );
        let new_top_data = graph.node_data(top).concat(&shared_prefix);
        let new_bottom_data = shared_suffix.concat(graph.node_data(diamond.bottom));

        let new_top = graph.add_node(new_top_data);
        let new_bottom = graph.add_node(new_bottom_data);
        for (source, edge_data) in top_in {
            let source = if source == diamond.bottom {
                new_bottom
            } else {
                source
            };
            add_or_merge_edge(graph, source, new_top, edge_data)
                .expect("rewired endpoints are in the graph");
        }
        for (target, edge_data) in bottom_out {
            add_or_merge_edge(graph, new_bottom, target, edge_data)
                .expect("rewired endpoints are in the graph");
        }
        for (middle, into_data, out_data, residual) in middle_info {
            if residual.is_empty() {
                let edge_data = SequenceEdge::new(
                    into_data.is_reference() || out_data.is_reference(),
                    self.path_multiplicity
                        .combine(into_data.multiplicity(), out_data.multiplicity()),
                );
                add_or_merge_edge(graph, new_top, new_bottom, edge_data)
                    .expect("rewired endpoints are in the graph");
                graph.remove_node(middle);
            } else {
                *graph.node_data_mut(middle) = residual;
                add_or_merge_edge(graph, new_top, middle, into_data)
                    .expect("rewired endpoints are in the graph");
                add_or_merge_edge(graph, middle, new_bottom, out_data)
                    .expect("rewired endpoints are in the graph");
            }
        }
        graph.remove_node(top);
        graph.remove_node(diamond.bottom);
        true
    }
}
