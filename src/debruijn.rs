//! A de Bruijn graph builder over fixed-length windows of input sequences.
//!
//! Overlapping k-mer pairs are threaded into a directed multigraph with one vertex per
//! distinct k-mer value and one edge per observed adjacency, accumulating observation
//! counts and reference markings. The builder is converted into a sequence graph for
//! simplification; sequence compaction itself is left entirely to the contraction passes.

use crate::algo::add_or_merge_edge;
use crate::data::{SequenceEdge, SequenceVertex};
use crate::error::{ErrorKind, Result};
use crate::index::NodeIndex;
use crate::interface::DynamicGraph;
use std::collections::HashMap;

/// A de Bruijn graph under construction.
///
/// Vertices are deduplicated by k-mer value; edges accumulate the multiplicities of all
/// window pairs observed for the same adjacency, and become reference edges as soon as
/// one such pair lies on the reference path. The first ingested window fixes the k-mer
/// length; all later windows must agree with it.
pub struct DeBruijnGraph<Graph> {
    graph: Graph,
    kmer_vertices: HashMap<Vec<u8>, NodeIndex>,
    kmer_length: Option<usize>,
}

impl<Graph: DynamicGraph<NodeData = SequenceVertex, EdgeData = SequenceEdge>>
    DeBruijnGraph<Graph>
{
    /// Creates a new builder storing its k-mers in the given empty graph.
    pub fn new(graph: Graph) -> Self {
        debug_assert!(graph.is_empty());
        Self {
            graph,
            kmer_vertices: HashMap::new(),
            kmer_length: None,
        }
    }

    /// Returns the k-mer length established by the ingested windows, if any.
    pub fn kmer_length(&self) -> Option<usize> {
        self.kmer_length
    }

    /// Returns the graph built so far.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Ingests one pair of overlapping windows: ensures vertices for both k-mers exist
    /// and inserts or updates the edge from `kmer1` to `kmer2`. An existing edge
    /// accumulates the multiplicity and becomes a reference edge if either the new or the
    /// existing observation is on the reference path.
    ///
    /// Fails without modifying the graph if the k-mers are empty, of different lengths,
    /// or of a length different from the one established by earlier windows.
    pub fn add_kmer_pair(
        &mut self,
        kmer1: &[u8],
        kmer2: &[u8],
        is_reference: bool,
        multiplicity: u32,
    ) -> Result<()> {
        if kmer1.is_empty() || kmer2.is_empty() {
            bail!(ErrorKind::EmptyKmer);
        }
        if kmer1.len() != kmer2.len() {
            bail!(ErrorKind::MismatchedKmerLengths(kmer1.len(), kmer2.len()));
        }
        self.establish_kmer_length(kmer1.len())?;

        let from = self.kmer_vertex(kmer1);
        let to = self.kmer_vertex(kmer2);
        trace!(
            "threading k-mer pair {} -> {} (reference: {}, multiplicity: {})",
            String::from_utf8_lossy(kmer1),
            String::from_utf8_lossy(kmer2),
            is_reference,
            multiplicity
        );
        add_or_merge_edge(
            &mut self.graph,
            from,
            to,
            SequenceEdge::new(is_reference, multiplicity),
        )?;
        Ok(())
    }

    /// Ingests a whole sequence by sliding a window of the given length one position at a
    /// time and threading each pair of consecutive windows.
    ///
    /// Fails without modifying the graph if the sequence is shorter than the k-mer
    /// length. A sequence of exactly the k-mer length inserts one vertex and no edge.
    pub fn add_sequence(
        &mut self,
        sequence: &[u8],
        kmer_length: usize,
        is_reference: bool,
        multiplicity: u32,
    ) -> Result<()> {
        if kmer_length == 0 {
            bail!(ErrorKind::EmptyKmer);
        }
        if sequence.len() < kmer_length {
            bail!(ErrorKind::SequenceTooShort(sequence.len(), kmer_length));
        }
        self.establish_kmer_length(kmer_length)?;

        if sequence.len() == kmer_length {
            self.kmer_vertex(sequence);
            return Ok(());
        }
        for window in 0..sequence.len() - kmer_length {
            self.add_kmer_pair(
                &sequence[window..window + kmer_length],
                &sequence[window + 1..window + 1 + kmer_length],
                is_reference,
                multiplicity,
            )?;
        }
        Ok(())
    }

    /// Converts this builder into a sequence graph ready for simplification.
    ///
    /// Vertices without incoming edges keep their full k-mer; every other vertex keeps
    /// only its final base, since the rest of its k-mer overlaps its predecessors. This
    /// way plain concatenation along a contracted chain reconstructs the input bases
    /// exactly. Edge attributes are carried over unchanged.
    pub fn into_sequence_graph(mut self) -> Graph {
        let non_sources: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|&node_id| self.graph.in_degree(node_id) > 0)
            .collect();
        for node_id in non_sources {
            let last_base = self
                .graph
                .node_data(node_id)
                .last_base()
                .expect("k-mer vertices hold at least one base");
            *self.graph.node_data_mut(node_id) = SequenceVertex::new(vec![last_base]);
        }
        self.graph
    }

    fn establish_kmer_length(&mut self, kmer_length: usize) -> Result<()> {
        match self.kmer_length {
            Some(expected) if expected != kmer_length => {
                bail!(ErrorKind::InconsistentKmerLength(expected, kmer_length))
            }
            Some(_) => {}
            None => self.kmer_length = Some(kmer_length),
        }
        Ok(())
    }

    fn kmer_vertex(&mut self, kmer: &[u8]) -> NodeIndex {
        if let Some(&node_id) = self.kmer_vertices.get(kmer) {
            node_id
        } else {
            let node_id = self.graph.add_node(SequenceVertex::new(kmer));
            self.kmer_vertices.insert(kmer.to_vec(), node_id);
            node_id
        }
    }
}
