//! petgraph-backed directed graph over variable names.

use petgraph::algo::{is_cyclic_directed, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::HashMap;

/// The projected variable-level graph.
///
/// Owns copies of every name; nothing in it aliases the container it was
/// projected from.
#[derive(Debug, Clone, Default)]
pub struct VariableGraph {
    graph: DiGraph<String, ()>,
    /// Map from variable name -> NodeIndex for O(1) lookup.
    node_index: HashMap<String, NodeIndex>,
}

impl VariableGraph {
    pub fn new() -> Self { Self::default() }

    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(vertices, edges),
            node_index: HashMap::with_capacity(vertices),
        }
    }

    /// Returns `false` if the vertex already exists.
    pub fn add_vertex(&mut self, name: &str) -> bool {
        if self.node_index.contains_key(name) {
            return false;
        }
        let idx = self.graph.add_node(name.to_string());
        self.node_index.insert(name.to_string(), idx);
        true
    }

    /// Returns `false` if an endpoint is missing or the edge already exists.
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        let (Some(a), Some(b)) = (self.index(from), self.index(to)) else {
            return false;
        };
        if self.graph.contains_edge(a, b) {
            return false;
        }
        self.graph.add_edge(a, b, ());
        true
    }

    pub fn contains_vertex(&self, name: &str) -> bool {
        self.node_index.contains_key(name)
    }

    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        match (self.index(from), self.index(to)) {
            (Some(a), Some(b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    pub fn vertex_count(&self) -> usize { self.graph.node_count() }
    pub fn edge_count(&self) -> usize { self.graph.edge_count() }

    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.graph.raw_edges().iter().map(move |e| {
            (self.graph[e.source()].as_str(), self.graph[e.target()].as_str())
        })
    }

    /// Variables with an edge into `name`.
    pub fn parents(&self, name: &str) -> Vec<&str> {
        self.neighbours(name, Direction::Incoming)
    }

    /// Variables `name` has an edge into.
    pub fn children(&self, name: &str) -> Vec<&str> {
        self.neighbours(name, Direction::Outgoing)
    }

    pub fn is_acyclic(&self) -> bool {
        !is_cyclic_directed(&self.graph)
    }

    /// `None` if the graph contains a cycle.
    pub fn topological_order(&self) -> Option<Vec<&str>> {
        toposort(&self.graph, None)
            .ok()
            .map(|order| order.into_iter().map(|idx| self.graph[idx].as_str()).collect())
    }

    fn index(&self, name: &str) -> Option<NodeIndex> {
        self.node_index.get(name).copied()
    }

    fn neighbours(&self, name: &str, direction: Direction) -> Vec<&str> {
        self.index(name)
            .map(|idx| {
                self.graph
                    .neighbors_directed(idx, direction)
                    .map(|n| self.graph[n].as_str())
                    .collect()
            })
            .unwrap_or_default()
    }
}
