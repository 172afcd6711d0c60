//! Dependency tables, one per directed layer relation.
pub mod error;
pub mod registry;
pub mod types;

pub use error::ShapeError;
pub use registry::{right_size, DependencyTableStore};
pub use types::{Cell, DependencyTable, RelationKey, Score};
