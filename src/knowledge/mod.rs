//! The layered domain-knowledge container and its errors.
pub mod builder;
pub mod domain;
pub mod error;

pub use builder::build_from_columns;
pub use domain::DomainKnowledge;
pub use error::{ErrorKind, KnowledgeError};
