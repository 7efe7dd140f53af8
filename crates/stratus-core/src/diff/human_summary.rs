//! Human-readable summary renderer for graph diffs.

use crate::diff::model::{DiffClassification, GraphDiff};

/// Render a short plain-text summary of a [`GraphDiff`].
///
/// Intended for the end of an interactive diff report; it is informational
/// only and carries nothing the structured diff does not.
pub fn render_human_summary(diff: &GraphDiff) -> String {
    if diff.classification() == DiffClassification::Identical {
        return "No changes detected.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{} inserted, {} deleted, {} modified",
        diff.inserted_nodes().len(),
        diff.deleted_nodes().len(),
        diff.modified_nodes().len()
    ));

    let relations = diff.inserted_relations().len() + diff.deleted_relations().len();
    if relations > 0 {
        out.push_str(&format!(
            " ({} relation{} changed)",
            relations,
            if relations == 1 { "" } else { "s" }
        ));
    }
    out.push('\n');

    let types = diff.changed_types();
    if !types.is_empty() {
        let names: Vec<&str> = types.iter().map(|t| t.as_str()).collect();
        out.push_str(&format!("Types affected: {}\n", names.join(", ")));
    }
    out
}
