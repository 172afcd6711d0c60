//! Configuration for building and projecting a model.
//!
//! A [`ModelLayout`] names the layers, their variables (which double as
//! column names in the input table) and the relations between layers. It is
//! usually written by hand as JSON:
//!
//! ```json
//! {
//!   "layers": [
//!     { "name": "Education", "variables": ["primary", "secondary"] },
//!     { "name": "Economic", "variables": ["growth"] }
//!   ],
//!   "relations": [{ "independent": "Education", "dependent": "Economic" }],
//!   "scoring": { "minimum": 0.5 },
//!   "projection": { "threshold": 0.03 }
//! }
//! ```

use crate::scoring::DEFAULT_MINIMUM;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Forward scores at or below this are stored as insufficient evidence.
    pub minimum: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { minimum: DEFAULT_MINIMUM }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Minimum table score for a variable-level edge.
    pub threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub name: String,
    #[serde(default)]
    pub variables: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationSpec {
    pub independent: String,
    pub dependent: String,
    /// Overrides [`ScoringConfig::minimum`] for this relation only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
}

impl RelationSpec {
    pub fn new(independent: impl Into<String>, dependent: impl Into<String>) -> Self {
        Self { independent: independent.into(), dependent: dependent.into(), minimum: None }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelLayout {
    pub layers: Vec<LayerSpec>,
    #[serde(default)]
    pub relations: Vec<RelationSpec>,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub projection: ProjectionConfig,
}

impl ModelLayout {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
