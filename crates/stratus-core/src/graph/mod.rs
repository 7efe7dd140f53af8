//! Typed resource graph: the triple vocabulary, the in-memory store and the
//! assertion-list loader.

pub mod model;
pub mod parser;
pub mod store;

pub use model::{Node, NodeRef, Predicate, PropertyValue, ResourceType, Triple, NAME_PROPERTY};
pub use parser::{parse_assertions, parse_triple};
pub use store::Graph;
