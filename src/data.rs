//! The vertex and edge payload types of sequence graphs.

/// A vertex of a sequence graph, owning the bases it represents.
///
/// Equality of the payload compares sequences only. Two vertices with equal sequences are
/// still distinct vertices; identity lives in the graph index, never in the payload.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SequenceVertex {
    sequence: Vec<u8>,
}

impl SequenceVertex {
    /// Creates a new vertex owning the given bases.
    pub fn new<Sequence: Into<Vec<u8>>>(sequence: Sequence) -> Self {
        Self {
            sequence: sequence.into(),
        }
    }

    /// Returns the bases of this vertex.
    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    /// Returns the amount of bases of this vertex.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns true if this vertex holds no bases.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Returns the last base of this vertex, or `None` if it holds no bases.
    pub fn last_base(&self) -> Option<u8> {
        self.sequence.last().copied()
    }

    /// Returns a new vertex holding the bases of `self` followed by the bases of `other`.
    pub fn concat(&self, other: &SequenceVertex) -> SequenceVertex {
        let mut sequence = Vec::with_capacity(self.len() + other.len());
        sequence.extend_from_slice(&self.sequence);
        sequence.extend_from_slice(&other.sequence);
        SequenceVertex { sequence }
    }

    /// Returns a new vertex with the given amounts of bases stripped from the front and
    /// the back. The result may be empty.
    /// Panics if the stripped regions overlap.
    pub fn without_affixes(&self, prefix_len: usize, suffix_len: usize) -> SequenceVertex {
        assert!(
            prefix_len + suffix_len <= self.len(),
            "affixes longer than the sequence: {} + {} > {}",
            prefix_len,
            suffix_len,
            self.len()
        );
        SequenceVertex {
            sequence: self.sequence[prefix_len..self.len() - suffix_len].to_vec(),
        }
    }
}

impl std::fmt::Debug for SequenceVertex {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "SequenceVertex({})", String::from_utf8_lossy(&self.sequence))
    }
}

/// An edge of a sequence graph.
///
/// Carries whether the edge lies on the designated reference path through the graph, and
/// the amount of observations (e.g. reads) supporting this adjacency.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequenceEdge {
    is_reference: bool,
    multiplicity: u32,
}

impl SequenceEdge {
    /// Creates a new edge with the given attributes.
    pub fn new(is_reference: bool, multiplicity: u32) -> Self {
        Self {
            is_reference,
            multiplicity,
        }
    }

    /// Returns true if this edge lies on the reference path.
    pub fn is_reference(&self) -> bool {
        self.is_reference
    }

    /// Returns the amount of observations supporting this adjacency.
    pub fn multiplicity(&self) -> u32 {
        self.multiplicity
    }

    /// Merges a parallel edge into this edge: the multiplicities accumulate, and the
    /// result is a reference edge if either input is.
    pub fn merge_parallel(&mut self, other: &SequenceEdge) {
        self.is_reference |= other.is_reference;
        self.multiplicity += other.multiplicity;
    }
}

impl Default for SequenceEdge {
    /// A non-reference edge supported by a single observation.
    fn default() -> Self {
        Self {
            is_reference: false,
            multiplicity: 1,
        }
    }
}

impl std::fmt::Debug for SequenceEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "SequenceEdge({}, {})",
            if self.is_reference { "ref" } else { "alt" },
            self.multiplicity
        )
    }
}
