//! Graph diff engine.
//!
//! Compares a local and a remote graph as sets of assertions and produces a
//! structured, deterministic diff for the display engine and for machine
//! consumption.
//!
//! ## Entry point
//!
//! ```
//! use stratus_core::diff::{compute_diff, render_human_summary};
//! use stratus_core::graph::Graph;
//!
//! let local = Graph::new();
//! let remote = Graph::new();
//! let diff = compute_diff(&local, &remote);
//! assert!(!diff.has_changes());
//! let _summary = render_human_summary(&diff);
//! ```
//!
//! ## Guarantees
//!
//! - **Purity**: the diff is a function of its two inputs and is never
//!   mutated after construction.
//! - **Partition**: a node is at most one of inserted, deleted or modified.
//! - **Determinism**: every list is in canonical order.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::compute_diff;
pub use human_summary::render_human_summary;
pub use model::{DiffClassification, GraphDiff, NodeDelta, PropertyChange, Relation};
