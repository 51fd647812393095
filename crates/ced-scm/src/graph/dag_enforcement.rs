//! Cycle detection over the parent relation using Tarjan's SCC.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;

/// DFS-based reachability check: can we reach `to` from `from`?
pub fn has_path(graph: &DiGraph<String, ()>, from: NodeIndex, to: NodeIndex) -> bool {
    let mut dfs = Dfs::new(graph, from);
    while let Some(node) = dfs.next(graph) {
        if node == to {
            return true;
        }
    }
    false
}

/// Every cycle in the graph: SCCs with more than one node, plus self-loops.
/// Nodes inside each cycle are sorted by index for stable reporting.
pub fn find_cycles(graph: &DiGraph<String, ()>) -> Vec<Vec<NodeIndex>> {
    let mut cycles: Vec<Vec<NodeIndex>> = tarjan_scc(graph)
        .into_iter()
        .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
        .map(|mut scc| {
            scc.sort();
            scc
        })
        .collect();
    cycles.sort();
    cycles
}
