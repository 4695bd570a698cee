//! Graph simplification.
//!
//! Simplification rewrites a sequence graph into a smaller graph carrying the same
//! sequence content. Two rewrites exist: contracting non-branching chains
//! ([`ZipLinearChains`](zip_linear_chains::ZipLinearChains)) and collapsing diamond
//! subgraphs ([`MergeDiamonds`](merge_diamonds::MergeDiamonds)). The driver alternates
//! both until neither changes the graph, since collapsing a diamond can expose a new
//! linear chain and vice versa. Every changing round strictly decreases the sum of
//! vertex count, edge count and stored bases, which bounds the iteration.

use crate::data::SequenceEdge;
use crate::error::{ErrorKind, Result};
use crate::index::{EdgeIndex, NodeIndex};

use self::merge_diamonds::{MergeDiamonds, PathMultiplicity};
use self::zip_linear_chains::ZipLinearChains;
use super::SequenceGraph;

/// Contains the diamond contraction pass.
pub mod merge_diamonds;
/// Contains the linear-chain contraction pass.
pub mod zip_linear_chains;

/// A graph rewrite rooted at a single vertex, split into a read-only detection phase and
/// a separate mutation phase.
///
/// The detection phase doubles as a dry run: callers can probe whether a rewrite applies
/// at a vertex without committing to it.
pub trait VertexTransform<Graph: SequenceGraph> {
    /// Returns true if the rewrite applies at `root`. Never mutates the graph.
    fn matches(&self, graph: &Graph, root: NodeIndex) -> bool;

    /// Applies the rewrite at `root` if it applies there. Returns true if the graph was
    /// changed. Vertex indices held by the caller other than those of untouched vertices
    /// are invalidated by a successful application.
    fn transform(&self, graph: &mut Graph, root: NodeIndex) -> bool;

    /// Sweeps the rewrite over all vertices repeatedly until a full sweep applies
    /// nowhere. Returns true if the graph was changed.
    fn transform_to_fixpoint(&self, graph: &mut Graph) -> bool {
        let mut changed_any = false;
        loop {
            let mut changed = false;
            let snapshot: Vec<NodeIndex> = graph.node_indices().collect();
            for root in snapshot {
                // The sweep mutates the graph, so entries of the snapshot may be gone.
                if !graph.contains_node_index(root) {
                    continue;
                }
                if self.transform(graph, root) {
                    changed = true;
                }
            }
            if !changed {
                break;
            }
            changed_any = true;
        }
        changed_any
    }
}

/// Configuration of the simplification driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimplifyConfig {
    /// Before contraction begins, every non-reference edge with a multiplicity strictly
    /// below this threshold is removed, along with the vertices isolated by that
    /// removal. Reference edges and vertices that were already isolated are kept.
    /// `0` (the default) disables pruning.
    pub min_edge_multiplicity: u32,
    /// How the diamond pass combines the multiplicities of the two edges of a fully
    /// collapsed middle path.
    pub path_multiplicity: PathMultiplicity,
}

impl Default for SimplifyConfig {
    fn default() -> Self {
        Self {
            min_edge_multiplicity: 0,
            path_multiplicity: PathMultiplicity::default(),
        }
    }
}

/// Simplifies the graph with the default configuration: no pruning, weakest-link
/// multiplicity combination.
pub fn simplify<Graph: SequenceGraph>(graph: &mut Graph) -> Result<()> {
    simplify_with_config(graph, &SimplifyConfig::default())
}

/// Simplifies the graph to a fixed point of both contraction passes.
///
/// Returns `InvariantViolation` if a changing round fails to shrink the graph, which
/// would indicate a bug in one of the passes rather than bad input.
pub fn simplify_with_config<Graph: SequenceGraph>(
    graph: &mut Graph,
    config: &SimplifyConfig,
) -> Result<()> {
    if config.min_edge_multiplicity > 0 {
        prune_low_multiplicity_edges(graph, config.min_edge_multiplicity);
    }

    let zipper = ZipLinearChains;
    let merger = MergeDiamonds::with_policy(config.path_multiplicity);
    loop {
        let size_before = graph_size(graph);
        let zipped = zipper.transform_to_fixpoint(graph);
        let merged = merger.transform_to_fixpoint(graph);
        if !zipped && !merged {
            break;
        }
        let size_after = graph_size(graph);
        debug!(
            "simplification round left {} vertices and {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        if size_after >= size_before {
            bail!(ErrorKind::InvariantViolation(format!(
                "a simplification round did not shrink the graph ({} -> {})",
                size_before, size_after
            )));
        }
    }
    Ok(())
}

/// Removes every non-reference edge with a multiplicity strictly below the threshold,
/// then removes the vertices isolated by that removal. Vertices that were isolated
/// before pruning are kept.
pub fn prune_low_multiplicity_edges<Graph: SequenceGraph>(
    graph: &mut Graph,
    min_multiplicity: u32,
) {
    let victims: Vec<EdgeIndex> = graph
        .edge_indices()
        .filter(|&edge_id| {
            let edge_data: &SequenceEdge = graph.edge_data(edge_id);
            !edge_data.is_reference() && edge_data.multiplicity() < min_multiplicity
        })
        .collect();
    if victims.is_empty() {
        return;
    }

    let connected_before: Vec<NodeIndex> = graph
        .node_indices()
        .filter(|&node_id| graph.in_degree(node_id) + graph.out_degree(node_id) > 0)
        .collect();
    for edge_id in victims {
        graph.remove_edge(edge_id);
    }
    let mut pruned_nodes = 0usize;
    for node_id in connected_before {
        if graph.in_degree(node_id) + graph.out_degree(node_id) == 0 {
            graph.remove_node(node_id);
            pruned_nodes += 1;
        }
    }
    debug!("pruning removed {} vertices", pruned_nodes);
}

/// The termination measure of the driver: vertex count plus edge count plus stored bases.
fn graph_size<Graph: SequenceGraph>(graph: &Graph) -> usize {
    let bases: usize = graph
        .node_indices()
        .map(|node_id| graph.node_data(node_id).len())
        .sum();
    graph.node_count() + graph.edge_count() + bases
}

#[cfg(test)]
mod test {
    use super::merge_diamonds::MergeDiamonds;
    use super::zip_linear_chains::ZipLinearChains;
    use super::{simplify, simplify_with_config, SimplifyConfig, VertexTransform};
    use crate::algo::equality::structurally_equal;
    use crate::algo::{add_or_merge_edge, SequenceGraph};
    use crate::data::{SequenceEdge, SequenceVertex};
    use crate::debruijn::DeBruijnGraph;
    use crate::implementation::petgraph_impl;
    use crate::interface::{ImmutableGraphContainer, MutableGraphContainer, NavigableGraph};
    use crate::index::NodeIndex;

    fn vertex<Graph: SequenceGraph>(graph: &mut Graph, sequence: &str) -> NodeIndex {
        graph.add_node(SequenceVertex::new(sequence))
    }

    fn add_edges<Graph: SequenceGraph>(graph: &mut Graph, path: &[NodeIndex]) {
        for window in path.windows(2) {
            add_or_merge_edge(graph, window[0], window[1], SequenceEdge::default()).unwrap();
        }
    }

    fn simplified_debruijn_graph(
        sequence: &[u8],
        kmer_length: usize,
    ) -> impl SequenceGraph + Clone {
        let mut builder = DeBruijnGraph::new(petgraph_impl::new());
        builder
            .add_sequence(sequence, kmer_length, false, 1)
            .unwrap();
        let mut graph = builder.into_sequence_graph();
        simplify(&mut graph).unwrap();
        graph
    }

    const LONG_SEQUENCE: &[u8] = b"AATACCATTGGAGTTTTTTTCCAGGTTAAGATGGTGCATTGAATCCACCCATCTACTTTTGCTCCTCCCAAAACTCACTAAAACTATTATAAAGGGATTTTGTTTAAAGACACAAACTCATGAGGACAGAGAGAACAGAGTAGACAATAGTGGGGGAAAAATAAGTTGGAAGATAGAAAACAGATGGGTGAGTGGTAATCGACTCAGCAGCCCCAAGAAAGCTGAAACCCAGGGAAAGTTAAGAGTAGCCCTATTTTCATGGCAAAATCCAAGGGGGGGTGGGGAAAGAAAGAAAAACAGAAAAAAAAATGGGAATTGGCAGTCCTAGATATCTCTGGTACTGGGCAAGCCAAAGAATCAGGATAACTGGGTGAAAGGTGATTGGGAAGCAGTTAAAATCTTAGTTCCCCTCTTCCACTCTCCGAGCAGCAGGTTTCTCTCTCTCATCAGGCAGAGGGCTGGAGAT";

    #[test]
    fn test_sequences_without_variation_collapse_to_one_vertex() {
        let cases: &[(&[u8], &[usize])] = &[
            (b"GGTTAACC", &[3, 4, 5, 6, 7]),
            (b"GGTTAACCATGCAGACGGGAGGCTGAGCGAGAGTTTT", &[6]),
            (LONG_SEQUENCE, &[66, 76]),
        ];
        for &(sequence, kmer_lengths) in cases {
            for &kmer_length in kmer_lengths {
                let graph = simplified_debruijn_graph(sequence, kmer_length);
                assert_eq!(graph.node_count(), 1, "k = {}", kmer_length);
                let node_id = graph.node_indices().next().unwrap();
                assert_eq!(graph.node_data(node_id).sequence(), sequence);
            }
        }
    }

    #[test]
    fn test_simplification_is_idempotent() {
        let mut graph = simplified_debruijn_graph(b"GGTTAACC", 4);
        let fixed_point = graph.clone();
        simplify(&mut graph).unwrap();
        assert!(structurally_equal(&graph, &fixed_point));
        assert!(!ZipLinearChains.transform_to_fixpoint(&mut graph));
        assert!(!MergeDiamonds::new().transform_to_fixpoint(&mut graph));
    }

    #[test]
    fn test_single_vertex_is_a_fixed_point() {
        let mut graph = petgraph_impl::new();
        vertex(&mut graph, "ACT");
        let expected = graph.clone();
        simplify(&mut graph).unwrap();
        assert!(structurally_equal(&graph, &expected));
    }

    #[test]
    fn test_empty_graph_is_a_fixed_point() {
        let mut graph = petgraph_impl::new::<SequenceVertex, SequenceEdge>();
        simplify(&mut graph).unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn test_chain_into_diamond_simplifies_fully() {
        // pre -> top fans out into GC / TC and reconverges.
        let mut graph = petgraph_impl::new();
        let pre = vertex(&mut graph, "ACT");
        let top = vertex(&mut graph, "A");
        let middle1 = vertex(&mut graph, "GC");
        let middle2 = vertex(&mut graph, "TC");
        let bottom = vertex(&mut graph, "AA");
        add_edges(&mut graph, &[pre, top, middle1, bottom]);
        add_edges(&mut graph, &[top, middle2, bottom]);

        let mut expected = petgraph_impl::new();
        let new_top = vertex(&mut expected, "ACTA");
        let new_middle1 = vertex(&mut expected, "G");
        let new_middle2 = vertex(&mut expected, "T");
        let new_bottom = vertex(&mut expected, "CAA");
        add_edges(&mut expected, &[new_top, new_middle1, new_bottom]);
        add_edges(&mut expected, &[new_top, new_middle2, new_bottom]);

        simplify(&mut graph).unwrap();
        assert!(structurally_equal(&graph, &expected));
    }

    #[test]
    fn test_two_flanked_diamonds_simplify_independently() {
        // Two reconvergent paths sharing top and bottom flanks.
        let mut graph = petgraph_impl::new();
        let pre1 = vertex(&mut graph, "ACT");
        let pre2 = vertex(&mut graph, "AGT");
        let top = vertex(&mut graph, "A");
        let middle1 = vertex(&mut graph, "GC");
        let middle2 = vertex(&mut graph, "TC");
        let bottom = vertex(&mut graph, "AA");
        let tail1 = vertex(&mut graph, "GC");
        let tail2 = vertex(&mut graph, "GC");
        add_edges(&mut graph, &[pre1, top, middle1, bottom, tail1]);
        add_edges(&mut graph, &[pre2, top, middle2, bottom, tail2]);

        // The fan-in into the top and the fan-out of the bottom are barriers: only the
        // diamond in the center is contracted. The shared bases of the two sources stay
        // in place; no rewrite factors the affixes of a fan-in set.
        let mut expected = petgraph_impl::new();
        let expected_pre1 = vertex(&mut expected, "ACT");
        let expected_pre2 = vertex(&mut expected, "AGT");
        let expected_top = vertex(&mut expected, "A");
        let expected_middle1 = vertex(&mut expected, "G");
        let expected_middle2 = vertex(&mut expected, "T");
        let expected_bottom = vertex(&mut expected, "CAA");
        let expected_tail1 = vertex(&mut expected, "GC");
        let expected_tail2 = vertex(&mut expected, "GC");
        add_edges(&mut expected, &[expected_pre1, expected_top, expected_middle1, expected_bottom, expected_tail1]);
        add_edges(&mut expected, &[expected_pre2, expected_top, expected_middle2, expected_bottom, expected_tail2]);

        simplify(&mut graph).unwrap();
        assert!(structurally_equal(&graph, &expected));
    }

    #[test]
    fn test_consumed_middle_leaves_direct_edge() {
        let mut graph = petgraph_impl::new();
        let top = vertex(&mut graph, "A");
        let middle1 = vertex(&mut graph, "AC");
        let middle2 = vertex(&mut graph, "C");
        let bottom = vertex(&mut graph, "G");
        add_edges(&mut graph, &[top, middle1, bottom]);
        add_edges(&mut graph, &[top, middle2, bottom]);

        let mut expected = petgraph_impl::new();
        let expected_top = vertex(&mut expected, "A");
        let expected_middle = vertex(&mut expected, "A");
        let expected_bottom = vertex(&mut expected, "CG");
        add_edges(&mut expected, &[expected_top, expected_middle, expected_bottom]);
        add_edges(&mut expected, &[expected_top, expected_bottom]);

        simplify(&mut graph).unwrap();
        assert!(structurally_equal(&graph, &expected));
    }

    #[test]
    fn test_reference_bubble_with_equal_bases_collapses_completely() {
        // A -> ACT -> C twice, once on the reference path. Both middles are consumed by
        // the shared prefix, their edges collapse onto one reference edge, and the chain
        // zips into a single vertex.
        let mut graph = petgraph_impl::new();
        let top = vertex(&mut graph, "A");
        let middle1 = vertex(&mut graph, "ACT");
        let middle2 = vertex(&mut graph, "ACT");
        let bottom = vertex(&mut graph, "C");
        add_edges(&mut graph, &[top, middle2, bottom]);
        graph
            .add_edge(top, middle1, SequenceEdge::new(true, 1))
            .unwrap();
        graph
            .add_edge(middle1, bottom, SequenceEdge::new(true, 1))
            .unwrap();

        let mut expected = petgraph_impl::new();
        vertex(&mut expected, "AACTC");

        simplify(&mut graph).unwrap();
        assert!(structurally_equal(&graph, &expected));
    }

    #[test]
    fn test_self_loops_survive_simplification() {
        let mut graph = petgraph_impl::new();
        let looped = vertex(&mut graph, "A");
        let middle = vertex(&mut graph, "C");
        let last = vertex(&mut graph, "G");
        add_edges(&mut graph, &[looped, middle, last]);
        add_edges(&mut graph, &[looped, looped]);

        let mut expected = petgraph_impl::new();
        let expected_looped = vertex(&mut expected, "A");
        let expected_rest = vertex(&mut expected, "CG");
        add_edges(&mut expected, &[expected_looped, expected_rest]);
        add_edges(&mut expected, &[expected_looped, expected_looped]);

        simplify(&mut graph).unwrap();
        assert!(structurally_equal(&graph, &expected));
    }

    #[test]
    fn test_pruning_removes_weak_edges_but_keeps_reference_edges() {
        let mut graph = petgraph_impl::new();
        let weak_from = vertex(&mut graph, "A");
        let weak_to = vertex(&mut graph, "C");
        let reference_from = vertex(&mut graph, "G");
        let reference_to = vertex(&mut graph, "T");
        vertex(&mut graph, "TT");
        graph
            .add_edge(weak_from, weak_to, SequenceEdge::new(false, 1))
            .unwrap();
        graph
            .add_edge(reference_from, reference_to, SequenceEdge::new(true, 1))
            .unwrap();

        // The weak edge and the vertices it isolates disappear; the reference edge is
        // kept and its chain zips; the vertex that was isolated all along stays.
        let mut expected = petgraph_impl::new();
        vertex(&mut expected, "GT");
        vertex(&mut expected, "TT");

        let config = SimplifyConfig {
            min_edge_multiplicity: 2,
            ..SimplifyConfig::default()
        };
        simplify_with_config(&mut graph, &config).unwrap();
        assert!(structurally_equal(&graph, &expected));
    }

    #[test]
    fn test_random_sequences_without_repeated_kmers_round_trip() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};
        use std::collections::HashSet;

        let mut rng = StdRng::seed_from_u64(0x5eedab1e);
        let bases = [b'A', b'C', b'G', b'T'];
        let mut tested = 0;
        while tested < 20 {
            let length = rng.gen_range(20..60);
            let kmer_length = rng.gen_range(11..15);
            let sequence: Vec<u8> = (0..length).map(|_| bases[rng.gen_range(0..4)]).collect();
            let distinct: HashSet<&[u8]> = sequence.windows(kmer_length).collect();
            if distinct.len() != sequence.len() - kmer_length + 1 {
                // A repeated k-mer folds the graph into a cycle; the round-trip
                // property only holds for repeat-free inputs.
                continue;
            }
            let graph = simplified_debruijn_graph(&sequence, kmer_length);
            assert_eq!(graph.node_count(), 1);
            let node_id = graph.node_indices().next().unwrap();
            assert_eq!(graph.node_data(node_id).sequence(), &sequence[..]);
            tested += 1;
        }
    }
}
