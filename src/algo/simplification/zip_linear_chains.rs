//! Contraction of non-branching linear chains.

use super::VertexTransform;
use crate::algo::{add_or_merge_edge, SequenceGraph};
use crate::data::SequenceEdge;
use crate::index::NodeIndex;

/// Fuses a vertex with its sole successor when that successor has no other predecessor.
///
/// The fused vertex holds the concatenated sequences; the incoming edges of the first
/// vertex and the outgoing edges of the successor are rewired to it with their attributes
/// unchanged. Sweeping this to a fixed point contracts every maximal non-branching chain
/// into a single vertex. Vertices with self-loops are never fused, since the loop makes
/// them their own second neighbor.
pub struct ZipLinearChains;

impl<Graph: SequenceGraph> VertexTransform<Graph> for ZipLinearChains {
    fn matches(&self, graph: &Graph, root: NodeIndex) -> bool {
        if graph.out_degree(root) != 1 {
            return false;
        }
        let successor = graph
            .out_neighbors(root)
            .next()
            .expect("out-degree is one")
            .node_id;
        successor != root && graph.in_degree(successor) == 1
    }

    fn transform(&self, graph: &mut Graph, root: NodeIndex) -> bool {
        if !self.matches(graph, root) {
            return false;
        }
        let successor = graph
            .out_neighbors(root)
            .next()
            .expect("out-degree is one")
            .node_id;

        let fused_data = graph.node_data(root).concat(graph.node_data(successor));
        let incoming: Vec<(NodeIndex, SequenceEdge)> = graph
            .in_neighbors(root)
            .map(|neighbor| (neighbor.node_id, *graph.edge_data(neighbor.edge_id)))
            .collect();
        // The fused edge itself shows up in neither list. A back edge from the successor
        // to the root is listed once, as an incoming edge of the root.
        let outgoing: Vec<(NodeIndex, SequenceEdge)> = graph
            .out_neighbors(successor)
            .filter(|neighbor| neighbor.node_id != root)
            .map(|neighbor| (neighbor.node_id, *graph.edge_data(neighbor.edge_id)))
            .collect();

        let fused = graph.add_node(fused_data);
        for (source, edge_data) in incoming {
            // A two-vertex cycle contracts into a self-loop.
            let source = if source == successor { fused } else { source };
            add_or_merge_edge(graph, source, fused, edge_data)
                .expect("rewired endpoints are in the graph");
        }
        for (target, edge_data) in outgoing {
            add_or_merge_edge(graph, fused, target, edge_data)
                .expect("rewired endpoints are in the graph");
        }
        graph.remove_node(root);
        graph.remove_node(successor);
        true
    }
}
