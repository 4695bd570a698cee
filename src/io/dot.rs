//! Export of sequence graphs in graphviz dot format.

use crate::data::{SequenceEdge, SequenceVertex};
use crate::error::Result;
use crate::interface::StaticGraph;
use std::io::Write;

/// Writes the graph in graphviz dot format.
///
/// Vertices are labelled with their sequences and edges with their multiplicities;
/// reference edges are drawn in red. Vertex names use the graph indices, so the output
/// of two structurally equal graphs may still differ.
pub fn write_dot<
    Graph: StaticGraph<NodeData = SequenceVertex, EdgeData = SequenceEdge>,
    Writer: Write,
>(
    graph: &Graph,
    writer: &mut Writer,
) -> Result<()> {
    writeln!(writer, "digraph assembly {{")?;
    for node_id in graph.node_indices() {
        writeln!(
            writer,
            "    v{} [label=\"{}\"];",
            node_id.as_usize(),
            String::from_utf8_lossy(graph.node_data(node_id).sequence())
        )?;
    }
    for edge_id in graph.edge_indices() {
        let endpoints = graph.edge_endpoints(edge_id);
        let edge_data = graph.edge_data(edge_id);
        writeln!(
            writer,
            "    v{} -> v{} [label=\"{}\"{}];",
            endpoints.from_node.as_usize(),
            endpoints.to_node.as_usize(),
            edge_data.multiplicity(),
            if edge_data.is_reference() {
                ", color=red"
            } else {
                ""
            }
        )?;
    }
    writeln!(writer, "}}")?;
    Ok(())
}
