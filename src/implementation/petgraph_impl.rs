//! An implementation of the graph traits backed by `petgraph`'s `StableDiGraph`.
//!
//! The stable graph flavor keeps vertex and edge indices valid across removals, which
//! the contraction passes rely on: they remove vertices mid-algorithm while holding
//! index snapshots of the rest of the graph.

use crate::error::{ErrorKind, Result};
use crate::index::{EdgeIndex, NodeIndex};
use crate::interface::{
    DynamicGraph, Edge, GraphBase, ImmutableGraphContainer, MutableGraphContainer,
    NavigableGraph, Neighbor,
};
use petgraph::stable_graph::{Edges, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};
use std::iter::Map;

pub use petgraph;

/// Creates a new empty graph backed by a `StableDiGraph`.
pub fn new<NodeData: 'static + Clone, EdgeData: 'static + Clone>(
) -> impl DynamicGraph<NodeData = NodeData, EdgeData = EdgeData> + Default + Clone {
    StableDiGraph::<NodeData, EdgeData, usize>::default()
}

impl<NodeData, EdgeData> GraphBase for StableDiGraph<NodeData, EdgeData, usize> {
    type NodeData = NodeData;
    type EdgeData = EdgeData;
}

impl<NodeData, EdgeData> ImmutableGraphContainer for StableDiGraph<NodeData, EdgeData, usize> {
    fn contains_node_index(&self, node_id: NodeIndex) -> bool {
        self.contains_node(node_id.into())
    }

    fn contains_edge_index(&self, edge_id: EdgeIndex) -> bool {
        self.edge_weight(edge_id.into()).is_some()
    }

    fn node_count(&self) -> usize {
        self.node_count()
    }

    fn edge_count(&self) -> usize {
        self.edge_count()
    }

    fn node_data(&self, node_id: NodeIndex) -> &Self::NodeData {
        self.node_weight(node_id.into()).unwrap()
    }

    fn edge_data(&self, edge_id: EdgeIndex) -> &Self::EdgeData {
        self.edge_weight(edge_id.into()).unwrap()
    }

    fn edge_endpoints(&self, edge_id: EdgeIndex) -> Edge {
        let (from_node, to_node) = self.edge_endpoints(edge_id.into()).unwrap();
        Edge {
            from_node: from_node.index().into(),
            to_node: to_node.index().into(),
        }
    }
}

impl<NodeData, EdgeData> MutableGraphContainer for StableDiGraph<NodeData, EdgeData, usize> {
    fn add_node(&mut self, node_data: NodeData) -> NodeIndex {
        self.add_node(node_data).index().into()
    }

    fn add_edge(
        &mut self,
        from: NodeIndex,
        to: NodeIndex,
        edge_data: EdgeData,
    ) -> Result<EdgeIndex> {
        if !self.contains_node(from.into()) {
            bail!(ErrorKind::InvalidReference(from.as_usize()));
        }
        if !self.contains_node(to.into()) {
            bail!(ErrorKind::InvalidReference(to.as_usize()));
        }
        Ok(self.add_edge(from.into(), to.into(), edge_data).index().into())
    }

    fn remove_node(&mut self, node_id: NodeIndex) -> Option<NodeData> {
        if !self.contains_node(node_id.into()) {
            return None;
        }
        self.remove_node(node_id.into())
    }

    fn remove_edge(&mut self, edge_id: EdgeIndex) -> Option<EdgeData> {
        self.remove_edge(edge_id.into())
    }

    fn node_data_mut(&mut self, node_id: NodeIndex) -> &mut NodeData {
        self.node_weight_mut(node_id.into()).unwrap()
    }

    fn edge_data_mut(&mut self, edge_id: EdgeIndex) -> &mut EdgeData {
        self.edge_weight_mut(edge_id.into()).unwrap()
    }

    fn clear(&mut self) {
        self.clear()
    }
}

type PetgraphNeighborTranslator<'a, EdgeData> = Map<
    Edges<'a, EdgeData, Directed, usize>,
    fn(petgraph::stable_graph::EdgeReference<'a, EdgeData, usize>) -> Neighbor,
>;

/// An iterator over the edges between two given vertices.
pub struct EdgesBetween<'a, EdgeData> {
    to_node: petgraph::graph::NodeIndex<usize>,
    edges: Edges<'a, EdgeData, Directed, usize>,
}

impl<'a, EdgeData> Iterator for EdgesBetween<'a, EdgeData> {
    type Item = EdgeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        for edge in self.edges.by_ref() {
            if edge.target() == self.to_node {
                return Some(edge.id().index().into());
            }
        }
        None
    }
}

impl<'a, NodeData: 'a, EdgeData: 'a> NavigableGraph<'a>
    for StableDiGraph<NodeData, EdgeData, usize>
{
    type NodeIndices = Map<
        petgraph::stable_graph::NodeIndices<'a, NodeData, usize>,
        fn(petgraph::graph::NodeIndex<usize>) -> NodeIndex,
    >;
    type EdgeIndices = Map<
        petgraph::stable_graph::EdgeIndices<'a, EdgeData, usize>,
        fn(petgraph::graph::EdgeIndex<usize>) -> EdgeIndex,
    >;
    type OutNeighbors = PetgraphNeighborTranslator<'a, EdgeData>;
    type InNeighbors = PetgraphNeighborTranslator<'a, EdgeData>;
    type EdgesBetween = EdgesBetween<'a, EdgeData>;

    fn node_indices(&'a self) -> Self::NodeIndices {
        self.node_indices().map(|node_id| node_id.index().into())
    }

    fn edge_indices(&'a self) -> Self::EdgeIndices {
        self.edge_indices().map(|edge_id| edge_id.index().into())
    }

    fn out_neighbors(&'a self, node_id: NodeIndex) -> Self::OutNeighbors {
        self.edges_directed(node_id.into(), Direction::Outgoing)
            .map(|edge| Neighbor {
                edge_id: edge.id().index().into(),
                node_id: edge.target().index().into(),
            })
    }

    fn in_neighbors(&'a self, node_id: NodeIndex) -> Self::InNeighbors {
        self.edges_directed(node_id.into(), Direction::Incoming)
            .map(|edge| Neighbor {
                edge_id: edge.id().index().into(),
                node_id: edge.source().index().into(),
            })
    }

    fn edges_between(&'a self, from_node_id: NodeIndex, to_node_id: NodeIndex) -> EdgesBetween<'a, EdgeData> {
        EdgesBetween {
            to_node: to_node_id.into(),
            edges: self.edges_directed(from_node_id.into(), Direction::Outgoing),
        }
    }
}

impl From<NodeIndex> for petgraph::graph::NodeIndex<usize> {
    fn from(index: NodeIndex) -> Self {
        petgraph::graph::NodeIndex::new(index.as_usize())
    }
}

impl From<EdgeIndex> for petgraph::graph::EdgeIndex<usize> {
    fn from(index: EdgeIndex) -> Self {
        petgraph::graph::EdgeIndex::new(index.as_usize())
    }
}
