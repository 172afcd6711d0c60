//! projector.rs
//! Thresholds the dependency tables of a [`DomainKnowledge`] into a flat
//! variable-level graph.

use super::variable_graph::VariableGraph;
use crate::knowledge::{DomainKnowledge, KnowledgeError};
use std::collections::HashMap;
use tracing::debug;

/// Projects `knowledge` onto its variables.
///
/// Every variable of every layer becomes a vertex. For each relation `P -> L`
/// an edge `p_i -> l_j` is added iff cell `(i, j)` of its table is a score of
/// at least `threshold`; insufficient evidence never qualifies.
///
/// # Errors
/// - [`KnowledgeError::DuplicateVariable`] if a variable name is declared twice.
/// - [`KnowledgeError::UnsetCell`] if a relation's table was never filled.
///
/// Nothing is returned on failure; the container itself is only read.
pub fn project(knowledge: &DomainKnowledge, threshold: f64) -> Result<VariableGraph, KnowledgeError> {
    let mut graph = VariableGraph::with_capacity(knowledge.variable_count(), 0);

    // 1. Vertices, all of them before any edge so every endpoint exists.
    let mut declared_by: HashMap<&str, &str> = HashMap::with_capacity(knowledge.variable_count());
    for (layer, variables) in knowledge.layer_map() {
        for variable in variables {
            if let Some(first_layer) = declared_by.insert(variable.as_str(), layer.as_str()) {
                return Err(KnowledgeError::DuplicateVariable {
                    variable: variable.clone(),
                    layer: layer.clone(),
                    first_layer: first_layer.to_string(),
                });
            }
            graph.add_vertex(variable);
        }
    }

    // 2. Edges, one pass per relation.
    for (layer, variables) in knowledge.layer_map() {
        for parent_layer in knowledge.independents(layer) {
            let table = knowledge
                .dependency_table(parent_layer, layer)
                .ok_or_else(|| KnowledgeError::relation_not_found(parent_layer, layer))?;
            let parents = knowledge
                .layer(parent_layer)
                .ok_or_else(|| KnowledgeError::layer_not_found(parent_layer))?;

            for (j, variable) in variables.iter().enumerate() {
                for (i, parent) in parents.iter().enumerate() {
                    match table.get(i, j).copied().flatten() {
                        Some(score) if score.meets(threshold) => {
                            let added = graph.add_edge(parent, variable);
                            debug_assert!(added);
                        }
                        Some(_) => {}
                        None => {
                            return Err(KnowledgeError::UnsetCell {
                                independent: parent_layer.to_string(),
                                dependent: layer.clone(),
                                row: i,
                                col: j,
                            });
                        }
                    }
                }
            }
        }
    }

    debug!(
        threshold,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "projected variable graph"
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::ErrorKind;
    use crate::store::DependencyTable;
    use rstest::rstest;

    fn two_layers(row: Vec<f64>) -> DomainKnowledge {
        let mut dk = DomainKnowledge::new();
        dk.add_layer("A", ["a1"]).unwrap();
        dk.add_layer("B", ["b1", "b2"]).unwrap();
        dk.add_dependency_with_table("A", "B", DependencyTable::from_scores(vec![row]).unwrap())
            .unwrap();
        dk
    }

    #[rstest]
    #[case(0.6, vec![("a1", "b2")])]
    #[case(0.5, vec![("a1", "b1"), ("a1", "b2")])]
    #[case(0.8, vec![("a1", "b2")])]
    #[case(0.81, vec![])]
    fn test_threshold_is_inclusive(#[case] threshold: f64, #[case] expected: Vec<(&str, &str)>) {
        let dk = two_layers(vec![0.5, 0.8]);
        let g = project(&dk, threshold).unwrap();
        let mut edges: Vec<_> = g.edges().collect();
        edges.sort();
        assert_eq!(edges, expected);
        assert_eq!(g.vertex_count(), 3);
    }

    #[test]
    fn test_unset_cell_aborts_projection() {
        let mut dk = two_layers(vec![0.5, 0.8]);
        dk.set_cell("A", "B", 0, 1, None).unwrap();
        let err = project(&dk, 0.0).unwrap_err();
        assert_eq!(
            err,
            KnowledgeError::UnsetCell { independent: "A".into(), dependent: "B".into(), row: 0, col: 1 }
        );
        assert_eq!(err.kind(), ErrorKind::Data);
    }

    #[test]
    fn test_duplicate_within_a_layer_is_rejected() {
        let mut dk = DomainKnowledge::new();
        dk.add_layer("A", ["x", "x"]).unwrap();
        let err = project(&dk, 0.0).unwrap_err();
        assert!(matches!(err, KnowledgeError::DuplicateVariable { .. }));
    }

    #[test]
    fn test_edges_follow_parent_layer_rows() {
        // Parent layer smaller than child: rows index the parent's variables.
        let mut dk = DomainKnowledge::new();
        dk.add_layer("P", ["p1", "p2"]).unwrap();
        dk.add_layer("C", ["c1", "c2", "c3"]).unwrap();
        let table = DependencyTable::from_scores(vec![vec![0.9, 0.0, 0.0], vec![0.0, 0.0, 0.9]]).unwrap();
        dk.add_dependency_with_table("P", "C", table).unwrap();

        let g = project(&dk, 0.5).unwrap();
        assert!(g.contains_edge("p1", "c1"));
        assert!(g.contains_edge("p2", "c3"));
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_empty_layers_and_unrelated_layers_project() {
        let mut dk = DomainKnowledge::new();
        dk.add_layer("Empty", Vec::<String>::new()).unwrap();
        dk.add_layer("B", ["b1"]).unwrap();
        dk.add_layer("Alone", ["z"]).unwrap();
        dk.add_dependency("Empty", "B").unwrap();

        let g = dk.variable_dependency_default().unwrap();
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_count(), 0);
    }
}
