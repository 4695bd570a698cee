//! The graph algorithms of the assembly engine.

use crate::data::{SequenceEdge, SequenceVertex};
use crate::error::Result;
use crate::index::{EdgeIndex, NodeIndex};
use crate::interface::DynamicGraph;

/// Contains the structural equality check.
pub mod equality;
/// Contains the graph simplification passes and their driver.
pub mod simplification;

/// Shorthand for a dynamic graph carrying sequence-graph payloads.
pub trait SequenceGraph:
    DynamicGraph<NodeData = SequenceVertex, EdgeData = SequenceEdge>
{
}

impl<Graph: DynamicGraph<NodeData = SequenceVertex, EdgeData = SequenceEdge>> SequenceGraph
    for Graph
{
}

/// Adds an edge `(from, to)`, normalizing parallel edges: if an edge between the two
/// vertices already exists, the attributes are merged into it (multiplicities accumulate,
/// the reference flag is OR-ed) instead of adding a duplicate.
///
/// Returns `InvalidReference` if either endpoint is not in the graph.
pub fn add_or_merge_edge<Graph: DynamicGraph<EdgeData = SequenceEdge>>(
    graph: &mut Graph,
    from: NodeIndex,
    to: NodeIndex,
    edge_data: SequenceEdge,
) -> Result<EdgeIndex> {
    if !graph.contains_node_index(from) || !graph.contains_node_index(to) {
        // Delegated so the error reports the offending endpoint.
        return graph.add_edge(from, to, edge_data);
    }
    let existing = graph.edges_between(from, to).next();
    if let Some(edge_id) = existing {
        graph.edge_data_mut(edge_id).merge_parallel(&edge_data);
        Ok(edge_id)
    } else {
        graph.add_edge(from, to, edge_data)
    }
}

#[cfg(test)]
mod test {
    use super::add_or_merge_edge;
    use crate::data::SequenceEdge;
    use crate::implementation::petgraph_impl;
    use crate::interface::{ImmutableGraphContainer, MutableGraphContainer};

    #[test]
    fn test_add_or_merge_edge() {
        let mut graph = petgraph_impl::new();
        let n0 = graph.add_node(());
        let n1 = graph.add_node(());
        let e0 = add_or_merge_edge(&mut graph, n0, n1, SequenceEdge::new(false, 2)).unwrap();
        let e1 = add_or_merge_edge(&mut graph, n0, n1, SequenceEdge::new(true, 3)).unwrap();
        assert_eq!(e0, e1);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.edge_data(e0).is_reference());
        assert_eq!(graph.edge_data(e0).multiplicity(), 5);

        // The opposite direction is a separate edge.
        let e2 = add_or_merge_edge(&mut graph, n1, n0, SequenceEdge::default()).unwrap();
        assert_ne!(e0, e2);
        assert_eq!(graph.edge_count(), 2);
    }
}
