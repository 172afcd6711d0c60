//! Assembles a scored model from a column table and a layer layout.

use super::domain::DomainKnowledge;
use super::error::KnowledgeError;
use crate::config::ModelLayout;
use crate::scoring::{score_matrix, Series};
use std::collections::HashMap;
use tracing::info;

/// Builds a [`DomainKnowledge`] whose relations carry scores computed from
/// `columns` (column name -> observations, all of equal length).
///
/// Layers are added in layout order, then every relation is scored with
/// [`score_matrix`] at the relation's own minimum, or the layout's default.
pub fn build_from_columns(
    layout: &ModelLayout,
    columns: &HashMap<String, Series>,
) -> Result<DomainKnowledge, KnowledgeError> {
    let mut knowledge = DomainKnowledge::with_capacity(layout.layers.len());
    for layer in &layout.layers {
        knowledge.add_layer(&layer.name, layer.variables.iter().cloned())?;
    }

    for relation in &layout.relations {
        let independent = gather(&knowledge, columns, &relation.independent)?;
        let dependent = gather(&knowledge, columns, &relation.dependent)?;
        let minimum = relation.minimum.unwrap_or(layout.scoring.minimum);

        let table = score_matrix(&independent, &dependent, minimum)?;
        knowledge.add_dependency_with_table(&relation.independent, &relation.dependent, table)?;
    }

    info!(
        layers = knowledge.layer_count(),
        relations = knowledge.dependency_count(),
        "built domain knowledge from columns"
    );
    Ok(knowledge)
}

/// The series of every variable of `layer`, in layer order.
fn gather<'a>(
    knowledge: &DomainKnowledge,
    columns: &'a HashMap<String, Series>,
    layer: &str,
) -> Result<Vec<&'a [Option<f64>]>, KnowledgeError> {
    let variables = knowledge
        .layer(layer)
        .ok_or_else(|| KnowledgeError::layer_not_found(layer))?;
    variables
        .iter()
        .map(|v| {
            columns.get(v).map(Vec::as_slice).ok_or_else(|| KnowledgeError::MissingColumn {
                column: v.clone(),
                layer: layer.to_string(),
            })
        })
        .collect()
}
