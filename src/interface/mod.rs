//! The graph traits.
//!
//! The traits are roughly split up by different access types:
//!  - immutable reference (`ImmutableGraphContainer`)
//!  - mutable reference (`MutableGraphContainer`)
//!  - immutable reference that must outlive the return value (`NavigableGraph`)
//!
//! The access types match the common use cases of the assembly engine: queries for
//! vertices and edges, adding and removing vertices and edges, and iterating over the
//! neighbors of a vertex. Enumeration order of vertices and edges is stable only within
//! one unmutated snapshot of a graph; algorithms must not depend on it for correctness.

use crate::error::Result;
use crate::index::{EdgeIndex, NodeIndex};

/// Contains the associated payload types of a graph.
pub trait GraphBase {
    /// The data type associated with each vertex.
    type NodeData;
    /// The data type associated with each edge.
    type EdgeData;
}

/// A container that contains a set of vertices and edges.
pub trait ImmutableGraphContainer: GraphBase {
    /// Returns true if this graph contains the given vertex index.
    fn contains_node_index(&self, node_id: NodeIndex) -> bool;

    /// Returns true if this graph contains the given edge index.
    fn contains_edge_index(&self, edge_id: EdgeIndex) -> bool;

    /// Returns the amount of vertices in this graph.
    fn node_count(&self) -> usize;

    /// Returns the amount of edges in this graph.
    fn edge_count(&self) -> usize;

    /// Returns a reference to the data associated with the given vertex id.
    /// Panics if the graph contains no such vertex.
    fn node_data(&self, node_id: NodeIndex) -> &Self::NodeData;

    /// Returns a reference to the data associated with the given edge id.
    /// Panics if the graph contains no such edge.
    fn edge_data(&self, edge_id: EdgeIndex) -> &Self::EdgeData;

    /// Returns the endpoints of an edge.
    /// Panics if the graph contains no such edge.
    fn edge_endpoints(&self, edge_id: EdgeIndex) -> Edge;

    /// Returns true if the graph is empty, i.e. contains no vertices or edges.
    fn is_empty(&self) -> bool {
        // Zero vertices must imply zero edges.
        debug_assert!(self.node_count() != 0 || self.edge_count() == 0);
        self.node_count() == 0
    }
}

/// A container that allows adding and removing vertices and edges.
pub trait MutableGraphContainer: ImmutableGraphContainer {
    /// Adds a new vertex with the given `NodeData` to the graph.
    fn add_node(&mut self, node_data: Self::NodeData) -> NodeIndex;

    /// Adds a vertex for each of the given payloads, in order.
    /// Returns the new vertex indices in the same order.
    fn add_nodes<Payloads: IntoIterator<Item = Self::NodeData>>(
        &mut self,
        node_data: Payloads,
    ) -> Vec<NodeIndex> {
        node_data
            .into_iter()
            .map(|node_data| self.add_node(node_data))
            .collect()
    }

    /// Adds a new edge with the given `EdgeData` to the graph.
    /// Edges between the same ordered pair of vertices may be added multiple times.
    ///
    /// Returns `InvalidReference` if either endpoint is not in the graph.
    fn add_edge(
        &mut self,
        from: NodeIndex,
        to: NodeIndex,
        edge_data: Self::EdgeData,
    ) -> Result<EdgeIndex>;

    /// Removes the vertex with the given id from the graph, along with all its incident
    /// edges. Removing a vertex that is not in the graph is a no-op returning `None`.
    fn remove_node(&mut self, node_id: NodeIndex) -> Option<Self::NodeData>;

    /// Removes the edge with the given id from the graph.
    /// Removing an edge that is not in the graph is a no-op returning `None`.
    fn remove_edge(&mut self, edge_id: EdgeIndex) -> Option<Self::EdgeData>;

    /// Returns a mutable reference to the data associated with the given vertex id.
    /// Panics if the graph contains no such vertex.
    fn node_data_mut(&mut self, node_id: NodeIndex) -> &mut Self::NodeData;

    /// Returns a mutable reference to the data associated with the given edge id.
    /// Panics if the graph contains no such edge.
    fn edge_data_mut(&mut self, edge_id: EdgeIndex) -> &mut Self::EdgeData;

    /// Removes all vertices and edges from the graph.
    fn clear(&mut self);
}

/// A graph that can be navigated, i.e. that can enumerate its indices and iterate the
/// neighbors of its vertices.
pub trait NavigableGraph<'a>: ImmutableGraphContainer + Sized {
    /// The iterator type used to iterate over the vertex indices in this graph.
    type NodeIndices: Iterator<Item = NodeIndex>;
    /// The iterator type used to iterate over the edge indices in this graph.
    type EdgeIndices: Iterator<Item = EdgeIndex>;
    /// The iterator type used to iterate over the outgoing neighbors of a vertex.
    type OutNeighbors: Iterator<Item = Neighbor>;
    /// The iterator type used to iterate over the incoming neighbors of a vertex.
    type InNeighbors: Iterator<Item = Neighbor>;
    /// The iterator type used to iterate over the edges between two vertices.
    type EdgesBetween: Iterator<Item = EdgeIndex>;

    /// Returns an iterator over the vertex indices in this graph.
    fn node_indices(&'a self) -> Self::NodeIndices;

    /// Returns an iterator over the edge indices in this graph.
    fn edge_indices(&'a self) -> Self::EdgeIndices;

    /// Returns an iterator over the outgoing neighbors of the given vertex.
    /// A self-loop makes a vertex its own outgoing neighbor.
    fn out_neighbors(&'a self, node_id: NodeIndex) -> Self::OutNeighbors;

    /// Returns an iterator over the incoming neighbors of the given vertex.
    /// A self-loop makes a vertex its own incoming neighbor.
    fn in_neighbors(&'a self, node_id: NodeIndex) -> Self::InNeighbors;

    /// Returns an iterator over the edges `(from_node_id, to_node_id)`.
    fn edges_between(&'a self, from_node_id: NodeIndex, to_node_id: NodeIndex)
        -> Self::EdgesBetween;

    /// Returns the amount of outgoing edges of a vertex. Self-loops count once.
    fn out_degree(&'a self, node_id: NodeIndex) -> usize {
        self.out_neighbors(node_id).count()
    }

    /// Returns the amount of incoming edges of a vertex. Self-loops count once.
    fn in_degree(&'a self, node_id: NodeIndex) -> usize {
        self.in_neighbors(node_id).count()
    }

    /// Returns the amount of edges `(from, to)`.
    fn edge_count_between(&'a self, from: NodeIndex, to: NodeIndex) -> usize {
        self.edges_between(from, to).count()
    }

    /// Returns true if the graph contains an edge `(from, to)`.
    fn contains_edge_between(&'a self, from: NodeIndex, to: NodeIndex) -> bool {
        self.edges_between(from, to).next().is_some()
    }

    /// Returns true if the given vertex has a self-loop.
    fn has_self_loop(&'a self, node_id: NodeIndex) -> bool {
        self.contains_edge_between(node_id, node_id)
    }
}

/// A graph implementing all common graph traits that do not require mutable access.
/// This is a useful shortcut for generic type bounds when the graph should not be mutated.
pub trait StaticGraph: ImmutableGraphContainer + for<'a> NavigableGraph<'a> {}
impl<T: ImmutableGraphContainer + for<'a> NavigableGraph<'a>> StaticGraph for T {}

/// A graph implementing all common graph traits, including those requiring mutable access.
/// This is a useful shortcut for generic type bounds when the graph should be mutated.
pub trait DynamicGraph: StaticGraph + MutableGraphContainer {}
impl<T: StaticGraph + MutableGraphContainer> DynamicGraph for T {}

/// An edge represented as a pair of vertex indices.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct Edge {
    /// The tail of this edge.
    pub from_node: NodeIndex,
    /// The head of this edge.
    pub to_node: NodeIndex,
}

/// The neighbor of a vertex, given as the edge used to reach the neighbor vertex as well
/// as the neighbor vertex itself.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct Neighbor {
    /// The edge used to reach the neighboring vertex.
    pub edge_id: EdgeIndex,
    /// The neighboring vertex.
    pub node_id: NodeIndex,
}
