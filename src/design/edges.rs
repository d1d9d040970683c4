use std::collections::HashSet;

use super::types::{Component, Edge};

/// Flattens each component's connections into edges, in node then connection order.
///
/// Edges are not deduplicated and `to` is not checked against the node list.
pub fn synthesize_edges(nodes: &[Component]) -> Vec<Edge> {
	nodes
		.iter()
		.flat_map(|node| {
			node.connections.iter().map(move |connection| Edge {
				from: node.id.clone(),
				to: connection.target.clone(),
				label: connection.kind.clone(),
			})
		})
		.collect()
}

/// Edges whose target names no node. Renderers skip these.
pub fn dangling_edges<'a>(nodes: &[Component], edges: &'a [Edge]) -> Vec<&'a Edge> {
	let ids: HashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();
	edges
		.iter()
		.filter(|edge| !ids.contains(edge.to.as_str()))
		.collect()
}
