//! layers.rs
//! Adjacency structure over layer names.
//! Outgoing and incoming neighbour sets are both kept so that cascading
//! removals and "who depends on me" queries never scan the whole graph.

use crate::store::RelationKey;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default)]
pub struct LayerGraph {
    /// independent -> dependents
    outgoing: BTreeMap<String, BTreeSet<String>>,
    /// dependent -> independents
    incoming: BTreeMap<String, BTreeSet<String>>,
    edge_count: usize,
}

impl LayerGraph {
    pub fn new() -> Self { Self::default() }

    pub fn vertex_count(&self) -> usize { self.outgoing.len() }
    pub fn edge_count(&self) -> usize { self.edge_count }

    pub fn contains_vertex(&self, name: &str) -> bool {
        self.outgoing.contains_key(name)
    }

    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.outgoing.keys().map(String::as_str)
    }

    /// Returns `false` if the vertex already exists.
    pub fn add_vertex(&mut self, name: &str) -> bool {
        if self.contains_vertex(name) {
            return false;
        }
        self.outgoing.insert(name.to_string(), BTreeSet::new());
        self.incoming.insert(name.to_string(), BTreeSet::new());
        true
    }

    /// Removes the vertex and every edge touching it.
    ///
    /// Returns the removed edges, or `None` if the vertex did not exist.
    pub fn remove_vertex(&mut self, name: &str) -> Option<Vec<RelationKey>> {
        let removed = self.incident_edges(name);
        let dependents = self.outgoing.remove(name)?;
        let independents = self.incoming.remove(name).unwrap_or_default();

        for dependent in &dependents {
            if let Some(set) = self.incoming.get_mut(dependent) {
                set.remove(name);
            }
        }
        for independent in &independents {
            if let Some(set) = self.outgoing.get_mut(independent) {
                set.remove(name);
            }
        }
        self.edge_count -= removed.len();
        Some(removed)
    }

    /// Inserts `independent -> dependent`.
    ///
    /// Returns `false` if either vertex is missing or the edge already exists.
    /// No acyclicity check is made here.
    pub fn add_edge(&mut self, independent: &str, dependent: &str) -> bool {
        if !self.contains_vertex(dependent) {
            return false;
        }
        let Some(dependents) = self.outgoing.get_mut(independent) else {
            return false;
        };
        if !dependents.insert(dependent.to_string()) {
            return false;
        }
        if let Some(independents) = self.incoming.get_mut(dependent) {
            independents.insert(independent.to_string());
        }
        self.edge_count += 1;
        true
    }

    pub fn remove_edge(&mut self, independent: &str, dependent: &str) -> bool {
        let existed = self
            .outgoing
            .get_mut(independent)
            .map_or(false, |set| set.remove(dependent));
        if existed {
            if let Some(set) = self.incoming.get_mut(dependent) {
                set.remove(independent);
            }
            self.edge_count -= 1;
        }
        existed
    }

    pub fn contains_edge(&self, independent: &str, dependent: &str) -> bool {
        self.outgoing
            .get(independent)
            .map_or(false, |set| set.contains(dependent))
    }

    /// Layers depending on `name`. `None` if `name` is not a vertex.
    pub fn dependents(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.outgoing.get(name)
    }

    /// Layers `name` depends on. `None` if `name` is not a vertex.
    pub fn independents(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.incoming.get(name)
    }

    /// Every edge with `name` at either end. A self-loop is listed once.
    pub fn incident_edges(&self, name: &str) -> Vec<RelationKey> {
        let incoming = self
            .incoming
            .get(name)
            .into_iter()
            .flatten()
            .map(|independent| RelationKey::new(independent.as_str(), name));
        let outgoing = self
            .outgoing
            .get(name)
            .into_iter()
            .flatten()
            .filter(|dependent| dependent.as_str() != name)
            .map(|dependent| RelationKey::new(name, dependent.as_str()));
        incoming.chain(outgoing).collect()
    }

    pub fn edges(&self) -> impl Iterator<Item = RelationKey> + '_ {
        self.outgoing.iter().flat_map(|(independent, dependents)| {
            dependents
                .iter()
                .map(move |dependent| RelationKey::new(independent.as_str(), dependent.as_str()))
        })
    }
}
