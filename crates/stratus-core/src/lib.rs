//! Stratus Core - inventory graph, diff and display engine
//!
//! This crate provides the reporting layer of the Stratus inventory tool:
//! - A typed triple store holding one snapshot of remote resources
//! - A pure, set-based diff between a local and a remote snapshot
//! - A display engine rendering either as table, CSV, porcelain or tree
//! - The error and structured logging facilities shared with the CLI

pub mod diff;
pub mod display;
pub mod errors;
pub mod graph;
pub mod logging_facility;

// Used by the logging macros
pub use stratus_core_types;

// Re-export commonly used types
pub use diff::{compute_diff, GraphDiff};
pub use display::{ColumnDefinition, DisplayOptions, Displayer, Format, Source};
pub use errors::{ExError, ExErrorKind, Result, StratusError};
pub use graph::{Graph, Node, NodeRef, PropertyValue, ResourceType, Triple};
