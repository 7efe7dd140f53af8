//! Display engine.
//!
//! Turns a [`Graph`](crate::graph::Graph) or a
//! [`GraphDiff`](crate::diff::GraphDiff) into text:
//!
//! 1. [`DisplayOptions`] collects column declarations and formatting choices
//!    and is bound to one source with [`DisplayOptions::build`].
//! 2. The [`Displayer`] extracts a view: a grid of rows, a list of tree
//!    lines or a flat id list. Rows are sorted on their raw values.
//! 3. A [`Renderer`] for the chosen [`Format`] serializes the view,
//!    truncating and fitting columns for tables.
//!
//! ```
//! use stratus_core::display::{ColumnDefinition, DisplayOptions};
//! use stratus_core::graph::{Graph, NodeRef, ResourceType};
//!
//! let mut graph = Graph::new();
//! let inst = NodeRef::new(ResourceType::Instance, "inst_1");
//! graph.add_resource(&inst);
//! graph.set_property(&inst, "Id", "inst_1");
//!
//! let out = DisplayOptions::new()
//!     .with_headers(vec![ColumnDefinition::new("Id")])
//!     .with_resource_type(ResourceType::Instance)
//!     .build(&graph)
//!     .unwrap()
//!     .render()
//!     .unwrap();
//! assert_eq!(out, "+--------+\n|  ID ▲  |\n+--------+\n| inst_1 |\n+--------+\n");
//! ```

pub mod column;
pub mod csv;
pub mod displayer;
pub mod grid;
pub mod options;
pub mod porcelain;
pub mod render;
pub mod sort;
pub mod table;
pub mod tree;
pub mod width;

pub use column::{
    friendly_property_name, ColumnDefinition, DisplayStrategy, TimeFormat, TruncatePolicy,
    TruncateSide, DEFAULT_TRUNCATE_SIZE,
};
pub use displayer::Displayer;
pub use options::{DisplayOptions, Format, Source};
pub use render::{Render, Renderer, View};
