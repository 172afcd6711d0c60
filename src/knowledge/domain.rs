//! domain.rs
//! The domain-knowledge container: layers of variables, the dependency
//! relations between layers, and one score table per relation.
//!
//! Every mutation keeps three invariants:
//! 1. the layer graph's vertices are exactly the keys of the variable map;
//! 2. there is one table per graph edge;
//! 3. every table is `|independent| x |dependent|` for the live variable lists.
//!
//! Relations are inserted provisionally, the whole layer graph is checked for
//! cycles, and a cyclic insert is undone before the error is returned.

use super::error::KnowledgeError;
use crate::graph::{self, CycleError, LayerGraph};
use crate::projection::{self, VariableGraph};
use crate::store::{right_size, Cell, DependencyTable, DependencyTableStore, RelationKey};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Expected layer count when none is given.
const DEFAULT_LAYERS: usize = 3;

#[derive(Debug, Clone)]
pub struct DomainKnowledge {
    structure: LayerGraph,
    layer_variables: BTreeMap<String, Vec<String>>,
    tables: DependencyTableStore,
}

impl Default for DomainKnowledge {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LAYERS)
    }
}

impl DomainKnowledge {
    pub fn new() -> Self { Self::default() }

    /// Pre-sizes the table store for a complete DAG over `layers` layers.
    pub fn with_capacity(layers: usize) -> Self {
        Self {
            structure: LayerGraph::new(),
            layer_variables: BTreeMap::new(),
            tables: DependencyTableStore::with_capacity(layers * layers.saturating_sub(1) / 2),
        }
    }

    // --- Layers ---

    pub fn add_layer<V>(&mut self, name: &str, variables: V) -> Result<(), KnowledgeError>
    where
        V: IntoIterator,
        V::Item: Into<String>,
    {
        if self.contains_layer(name) {
            return Err(KnowledgeError::LayerExists { layer: name.to_string() });
        }
        let variables: Vec<String> = variables.into_iter().map(Into::into).collect();
        debug!(layer = name, variables = variables.len(), "adding layer");

        self.layer_variables.insert(name.to_string(), variables);
        self.structure.add_vertex(name);
        debug_assert!(self.check_invariants());
        Ok(())
    }

    /// Removes the layer along with every relation touching it.
    ///
    /// Returns whether the layer existed.
    pub fn remove_layer(&mut self, name: &str) -> bool {
        let Some(removed) = self.structure.remove_vertex(name) else {
            return false;
        };
        for key in &removed {
            self.tables.remove(key);
        }
        self.layer_variables.remove(name);
        debug!(layer = name, relations = removed.len(), "removed layer");
        debug_assert!(self.check_invariants());
        true
    }

    /// Swaps the variable list of an existing layer and returns the old one.
    ///
    /// Every table on a relation touching the layer is reset to all-unset,
    /// sized for the new list; previous scores are discarded.
    pub fn replace_layer<V>(&mut self, name: &str, variables: V) -> Result<Vec<String>, KnowledgeError>
    where
        V: IntoIterator,
        V::Item: Into<String>,
    {
        let slot = self
            .layer_variables
            .get_mut(name)
            .ok_or_else(|| KnowledgeError::layer_not_found(name))?;
        let previous = std::mem::replace(slot, variables.into_iter().map(Into::into).collect());

        let incident = self.structure.incident_edges(name);
        for key in &incident {
            let (rows, cols) = self.table_shape(&key.independent, &key.dependent);
            self.tables.init_unset(key.clone(), rows, cols);
        }
        debug!(layer = name, reset_tables = incident.len(), "replaced layer");
        debug_assert!(self.check_invariants());
        Ok(previous)
    }

    pub fn contains_layer(&self, name: &str) -> bool {
        self.layer_variables.contains_key(name)
    }

    /// The ordered variables of a layer.
    pub fn layer(&self, name: &str) -> Option<&[String]> {
        self.layer_variables.get(name).map(Vec::as_slice)
    }

    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layer_variables.keys().map(String::as_str)
    }

    /// Read-only layer -> variables view, used to group variables visually
    /// once the projected graph is turned into a network.
    pub fn layer_map(&self) -> &BTreeMap<String, Vec<String>> {
        &self.layer_variables
    }

    pub fn layer_count(&self) -> usize { self.layer_variables.len() }

    pub fn variable_count(&self) -> usize {
        self.layer_variables.values().map(Vec::len).sum()
    }

    /// Layers ordered so that every independent layer precedes its dependents.
    pub fn layer_order(&self) -> Result<Vec<&str>, CycleError> {
        graph::topological_order(&self.structure)
    }

    // --- Dependencies ---

    /// Adds `independent -> dependent` with an all-unset table.
    pub fn add_dependency(&mut self, independent: &str, dependent: &str) -> Result<(), KnowledgeError> {
        self.relation_may_be_added(independent, dependent)?;
        let (rows, cols) = self.table_shape(independent, dependent);
        self.insert_relation(RelationKey::new(independent, dependent), DependencyTable::unset(rows, cols))
    }

    /// Adds `independent -> dependent` with a caller-supplied table.
    ///
    /// The table must be `|independent| x |dependent|`.
    pub fn add_dependency_with_table(
        &mut self,
        independent: &str,
        dependent: &str,
        table: DependencyTable,
    ) -> Result<(), KnowledgeError> {
        self.relation_may_be_added(independent, dependent)?;
        let key = RelationKey::new(independent, dependent);
        let (rows, cols) = self.table_shape(independent, dependent);
        let table = right_size(&key, table, rows, cols)?;
        self.insert_relation(key, table)
    }

    /// Removes the relation and returns its table, or `None` if there was no
    /// such relation (nothing changes in that case).
    pub fn remove_dependency(&mut self, independent: &str, dependent: &str) -> Option<DependencyTable> {
        if !self.structure.remove_edge(independent, dependent) {
            return None;
        }
        let removed = self.tables.remove(&RelationKey::new(independent, dependent));
        debug!(independent, dependent, "removed dependency");
        debug_assert!(self.check_invariants());
        removed
    }

    /// Replaces the table of an existing relation and returns the old one.
    pub fn set_dependency(
        &mut self,
        independent: &str,
        dependent: &str,
        table: DependencyTable,
    ) -> Result<DependencyTable, KnowledgeError> {
        self.relation_must_exist(independent, dependent)?;
        let key = RelationKey::new(independent, dependent);
        let (rows, cols) = self.table_shape(independent, dependent);
        let table = right_size(&key, table, rows, cols)?;

        let previous = self
            .tables
            .insert(key, table)
            .ok_or_else(|| KnowledgeError::relation_not_found(independent, dependent))?;
        debug_assert!(self.check_invariants());
        Ok(previous)
    }

    /// Fills one cell of an existing relation's table, returning its old content.
    pub fn set_cell(
        &mut self,
        independent: &str,
        dependent: &str,
        row: usize,
        col: usize,
        cell: Cell,
    ) -> Result<Cell, KnowledgeError> {
        self.relation_must_exist(independent, dependent)?;
        let table = self
            .tables
            .get_mut(&RelationKey::new(independent, dependent))
            .ok_or_else(|| KnowledgeError::relation_not_found(independent, dependent))?;
        Ok(table.set(row, col, cell)?)
    }

    pub fn contains_dependency(&self, independent: &str, dependent: &str) -> bool {
        self.structure.contains_edge(independent, dependent)
    }

    pub fn dependency_table(&self, independent: &str, dependent: &str) -> Option<&DependencyTable> {
        self.tables.get(&RelationKey::new(independent, dependent))
    }

    /// Layers that depend on `independent`. Empty for unknown layers.
    pub fn dependents(&self, independent: &str) -> impl Iterator<Item = &str> {
        self.structure.dependents(independent).into_iter().flatten().map(String::as_str)
    }

    /// Layers that `dependent` depends on. Empty for unknown layers.
    pub fn independents(&self, dependent: &str) -> impl Iterator<Item = &str> {
        self.structure.independents(dependent).into_iter().flatten().map(String::as_str)
    }

    pub fn dependency_count(&self) -> usize { self.structure.edge_count() }

    pub fn dependencies(&self) -> impl Iterator<Item = RelationKey> + '_ {
        self.structure.edges()
    }

    // --- Projection ---

    /// Projects the layer structure onto individual variables; see [`projection::project`].
    pub fn variable_dependency(&self, threshold: f64) -> Result<VariableGraph, KnowledgeError> {
        projection::project(self, threshold)
    }

    /// [`Self::variable_dependency`] at threshold zero.
    pub fn variable_dependency_default(&self) -> Result<VariableGraph, KnowledgeError> {
        self.variable_dependency(0.0)
    }

    // --- Invariants ---

    /// True when the container's three structural invariants hold.
    pub fn check_invariants(&self) -> bool {
        self.layer_invariant() && self.dependency_invariant() && self.variable_invariant()
    }

    fn layer_invariant(&self) -> bool {
        self.structure.vertex_count() == self.layer_variables.len()
            && self.structure.vertices().all(|v| self.layer_variables.contains_key(v))
    }

    fn dependency_invariant(&self) -> bool {
        self.structure.edge_count() == self.tables.len()
    }

    fn variable_invariant(&self) -> bool {
        self.structure.edges().all(|key| {
            let expected = self.table_shape(&key.independent, &key.dependent);
            self.tables.get(&key).map_or(false, |t| t.shape() == expected)
        })
    }

    // --- Helpers ---

    fn table_shape(&self, independent: &str, dependent: &str) -> (usize, usize) {
        let size = |layer: &str| self.layer_variables.get(layer).map_or(0, Vec::len);
        (size(independent), size(dependent))
    }

    fn layer_must_exist(&self, name: &str) -> Result<(), KnowledgeError> {
        if self.contains_layer(name) {
            Ok(())
        } else {
            Err(KnowledgeError::layer_not_found(name))
        }
    }

    fn relation_may_be_added(&self, independent: &str, dependent: &str) -> Result<(), KnowledgeError> {
        self.layer_must_exist(independent)?;
        self.layer_must_exist(dependent)?;
        if self.structure.contains_edge(independent, dependent) {
            return Err(KnowledgeError::RelationExists {
                independent: independent.to_string(),
                dependent: dependent.to_string(),
            });
        }
        Ok(())
    }

    fn relation_must_exist(&self, independent: &str, dependent: &str) -> Result<(), KnowledgeError> {
        self.layer_must_exist(independent)?;
        self.layer_must_exist(dependent)?;
        if !self.structure.contains_edge(independent, dependent) {
            return Err(KnowledgeError::relation_not_found(independent, dependent));
        }
        Ok(())
    }

    /// Insert, check, undo.
    fn insert_relation(&mut self, key: RelationKey, table: DependencyTable) -> Result<(), KnowledgeError> {
        let previous = self.tables.insert(key.clone(), table);
        debug_assert!(previous.is_none());
        self.structure.add_edge(&key.independent, &key.dependent);

        if !graph::is_acyclic(&self.structure) {
            self.tables.remove(&key);
            self.structure.remove_edge(&key.independent, &key.dependent);
            warn!(relation = %key, "dependency rejected: layer graph would become cyclic");
            debug_assert!(self.check_invariants());
            return Err(KnowledgeError::Cycle { independent: key.independent, dependent: key.dependent });
        }

        debug!(relation = %key, "added dependency");
        debug_assert!(self.check_invariants());
        Ok(())
    }
}
