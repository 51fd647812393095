//! In-memory DAG (`petgraph`) over an equation set's parent relation.
//!
//! Node indices follow declaration order, which is also the tie-break for
//! the topological evaluation order.

pub mod dag_enforcement;

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Dfs, EdgeRef};
use petgraph::Direction;

use ced_core::errors::{ScmError, ScmResult};

use crate::equation_set::EquationSet;

/// Parent → child graph of an equation set, guaranteed acyclic.
#[derive(Debug, Clone)]
pub struct CausalGraph {
    graph: DiGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
}

impl CausalGraph {
    /// Build the graph, rejecting undeclared parents and cycles.
    pub fn from_equations(set: &EquationSet) -> ScmResult<Self> {
        let mut graph = DiGraph::new();
        let mut index = HashMap::new();
        for eq in set.equations() {
            let idx = graph.add_node(eq.name().to_string());
            index.insert(eq.name().to_string(), idx);
        }

        for eq in set.equations() {
            let child = index[eq.name()];
            for parent in eq.parents() {
                let Some(&source) = index.get(parent) else {
                    return Err(ScmError::UndeclaredParent {
                        variable: eq.name().to_string(),
                        parent: parent.clone(),
                    });
                };
                graph.update_edge(source, child, ());
            }
        }

        let built = Self { graph, index };
        if let Some(cycle) = dag_enforcement::find_cycles(&built.graph).first() {
            let mut names: Vec<&str> = cycle.iter().map(|&n| built.graph[n].as_str()).collect();
            names.push(names[0]);
            return Err(ScmError::CyclicGraph {
                cycle: names.join(" -> "),
            });
        }
        Ok(built)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Kahn's algorithm; among ready nodes the earliest-declared goes first.
    pub fn topological_order(&self) -> Vec<&str> {
        let mut in_degree: Vec<usize> = self
            .graph
            .node_indices()
            .map(|n| self.graph.neighbors_directed(n, Direction::Incoming).count())
            .collect();
        let mut ready: BinaryHeap<Reverse<NodeIndex>> = self
            .graph
            .node_indices()
            .filter(|n| in_degree[n.index()] == 0)
            .map(Reverse)
            .collect();

        let mut order = Vec::with_capacity(self.graph.node_count());
        while let Some(Reverse(node)) = ready.pop() {
            order.push(self.graph[node].as_str());
            for child in self.graph.neighbors_directed(node, Direction::Outgoing) {
                in_degree[child.index()] -= 1;
                if in_degree[child.index()] == 0 {
                    ready.push(Reverse(child));
                }
            }
        }
        order
    }

    /// Direct parents, in declaration order.
    pub fn parents(&self, name: &str) -> ScmResult<Vec<&str>> {
        self.neighbors(name, Direction::Incoming)
    }

    /// Direct children, in declaration order.
    pub fn children(&self, name: &str) -> ScmResult<Vec<&str>> {
        self.neighbors(name, Direction::Outgoing)
    }

    /// Every variable reachable from `name`, excluding itself, in declaration order.
    pub fn descendants(&self, name: &str) -> ScmResult<Vec<&str>> {
        let start = self.node(name)?;
        let mut found = Vec::new();
        let mut dfs = Dfs::new(&self.graph, start);
        while let Some(node) = dfs.next(&self.graph) {
            if node != start {
                found.push(node);
            }
        }
        found.sort();
        Ok(found.into_iter().map(|n| self.graph[n].as_str()).collect())
    }

    /// Whether `descendant` is reachable from `ancestor`.
    pub fn is_ancestor(&self, ancestor: &str, descendant: &str) -> ScmResult<bool> {
        let from = self.node(ancestor)?;
        let to = self.node(descendant)?;
        Ok(from != to && dag_enforcement::has_path(&self.graph, from, to))
    }

    /// `(parent, child)` pairs, ordered by child then parent declaration index.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        let mut edges: Vec<(NodeIndex, NodeIndex)> = self
            .graph
            .edge_references()
            .map(|e| (e.source(), e.target()))
            .collect();
        edges.sort_by_key(|&(s, t)| (t, s));
        edges
            .into_iter()
            .map(|(s, t)| (self.graph[s].as_str(), self.graph[t].as_str()))
            .collect()
    }

    /// Graphviz DOT rendering of the ground-truth graph, one bare
    /// `label = "<name>"` per node.
    pub fn to_dot(&self) -> String {
        let dot = Dot::with_attr_getters(
            &self.graph,
            &[Config::EdgeNoLabel, Config::NodeNoLabel],
            &|_, _| String::new(),
            &|_, (_, name)| format!("label = \"{name}\""),
        );
        format!("{dot:?}")
    }

    fn node(&self, name: &str) -> ScmResult<NodeIndex> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| ScmError::UnknownVariable {
                name: name.to_string(),
            })
    }

    fn neighbors(&self, name: &str, direction: Direction) -> ScmResult<Vec<&str>> {
        let node = self.node(name)?;
        let mut found: Vec<NodeIndex> = self.graph.neighbors_directed(node, direction).collect();
        found.sort();
        Ok(found.into_iter().map(|n| self.graph[n].as_str()).collect())
    }
}
