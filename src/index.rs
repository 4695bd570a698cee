//! Strongly typed indices for vertices and edges.
//!
//! Indices are plain integers under the hood, but wrapped into distinct types so that a
//! vertex index cannot accidentally be used where an edge index is expected. An index
//! identifies a vertex or edge for graph bookkeeping only; it carries no semantic
//! meaning, and the indices of a graph change under cloning and simplification.

/// A valid index of a vertex within a graph.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
pub struct NodeIndex(usize);

/// A valid index of an edge within a graph.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
pub struct EdgeIndex(usize);

impl NodeIndex {
    /// Get this index as `usize`.
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl EdgeIndex {
    /// Get this index as `usize`.
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl From<usize> for NodeIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl From<usize> for EdgeIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl std::fmt::Debug for NodeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Debug for EdgeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
