//! Format-agnostic result sets.
//!
//! A [`Grid`] is an ordered list of rows of text cells plus the column
//! metadata the renderers need (title, sort marker, truncation policy).
//! Grids are built here from a graph or a diff; renderers never look at the
//! source again.

use chrono::{DateTime, Utc};
use colored::Color;

use super::column::{
    friendly_property_name, ColumnDefinition, TruncateSide, DEFAULT_TRUNCATE_SIZE,
};
use super::options::DisplayOptions;
use super::sort::{resolve_sort_keys, sort_rows};
use crate::diff::GraphDiff;
use crate::graph::{Graph, Node, NodeRef, PropertyValue, ResourceType};

pub const SORT_MARKER: &str = "▲";

#[derive(Debug, Clone, PartialEq)]
pub struct GridColumn {
    /// Friendly name as declared
    pub label: String,
    /// Primary sort column
    pub sorted: bool,
    /// Character budget and side, `None` when truncation is disabled
    pub truncate: Option<(usize, TruncateSide)>,
}

impl GridColumn {
    fn listing(label: &str, sorted: bool) -> Self {
        Self {
            label: label.to_string(),
            sorted,
            truncate: Some((DEFAULT_TRUNCATE_SIZE, TruncateSide::Left)),
        }
    }

    /// Upper-cased header with the sort marker when primary
    pub fn title(&self) -> String {
        let title = self.label.to_uppercase();
        if self.sorted {
            format!("{} {}", title, SORT_MARKER)
        } else {
            title
        }
    }
}

/// One cell; diff values stack several visual lines in a single cell
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub lines: Vec<String>,
    pub color: Option<Color>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            lines: if text.is_empty() { Vec::new() } else { vec![text] },
            color: None,
        }
    }

    pub fn stacked(lines: Vec<String>) -> Self {
        Self { lines, color: None }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(String::is_empty)
    }

    /// Single-line form used by the line-oriented formats
    pub fn joined(&self) -> String {
        self.lines.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub columns: Vec<GridColumn>,
    pub rows: Vec<Vec<Cell>>,
    /// Multi-type listings leave grouping cells blank
    pub sparse: bool,
}

/// One row per node of the requested type (or of every type), one column
/// per declared header, sorted before any truncation happens.
pub fn columnar(graph: &Graph, options: &DisplayOptions, now: DateTime<Utc>) -> Grid {
    let headers = &options.headers;
    let nodes: Vec<&Node> = match options.resource_type {
        Some(t) => graph.nodes_of_type(t),
        None => graph.nodes().collect(),
    };

    let mut rows: Vec<Vec<Option<PropertyValue>>> = nodes
        .iter()
        .map(|node| headers.iter().map(|h| h.extract(node)).collect())
        .collect();

    let keys = if options.sort_by.is_empty() {
        if headers.is_empty() {
            Vec::new()
        } else {
            vec![0]
        }
    } else {
        resolve_sort_keys(headers, &options.sort_by)
    };
    sort_rows(&mut rows, &keys, |row, k| row[k].as_ref());

    let columns = headers
        .iter()
        .enumerate()
        .map(|(i, h)| GridColumn {
            label: h.friendly().to_string(),
            sorted: keys.first() == Some(&i),
            truncate: h
                .truncate_policy()
                .budget()
                .map(|budget| (budget, h.truncate_policy().side)),
        })
        .collect();

    let rows = rows
        .iter()
        .map(|values| {
            headers
                .iter()
                .zip(values)
                .map(|(h, v)| cell_for(h, v.as_ref(), options.colors, now))
                .collect::<Vec<Cell>>()
        })
        .collect();

    Grid {
        columns,
        rows,
        sparse: false,
    }
}

fn cell_for(
    header: &ColumnDefinition,
    value: Option<&PropertyValue>,
    colors: bool,
    now: DateTime<Utc>,
) -> Cell {
    let text = header.format(value, now);
    let color = if colors { header.color_for(&text) } else { None };
    Cell {
        color,
        ..Cell::text(text)
    }
}

/// A node's block in a multi-type listing
struct Group {
    name: String,
    properties: Vec<(String, Vec<String>)>,
}

/// Order property rows case-insensitively by key and swap in their labels
fn labelled(mut properties: Vec<(String, Vec<String>)>) -> Vec<(String, Vec<String>)> {
    properties.sort_by(|(a, _), (b, _)| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    properties
        .into_iter()
        .map(|(key, lines)| (friendly_property_name(&key).to_string(), lines))
        .collect()
}

fn listing_grid(sections: Vec<(ResourceType, Vec<Group>)>) -> Grid {
    let columns = vec![
        GridColumn::listing("Type", true),
        GridColumn::listing("Name/ID", false),
        GridColumn::listing("Property", false),
        GridColumn::listing("Value", false),
    ];

    let mut rows = Vec::new();
    for (resource_type, groups) in sections {
        let mut first_of_type = true;
        for group in groups {
            let type_cell = || {
                if first_of_type {
                    Cell::text(resource_type.as_str())
                } else {
                    Cell::default()
                }
            };
            if group.properties.is_empty() {
                rows.push(vec![
                    type_cell(),
                    Cell::text(group.name.as_str()),
                    Cell::default(),
                    Cell::default(),
                ]);
            } else {
                for (i, (key, lines)) in group.properties.into_iter().enumerate() {
                    let name_cell = if i == 0 {
                        Cell::text(group.name.as_str())
                    } else {
                        Cell::default()
                    };
                    rows.push(vec![
                        if i == 0 { type_cell() } else { Cell::default() },
                        name_cell,
                        Cell::text(key),
                        Cell::stacked(lines),
                    ]);
                }
            }
            first_of_type = false;
        }
    }

    Grid {
        columns,
        rows,
        sparse: true,
    }
}

fn selected_types(available: Vec<ResourceType>, filter: Option<ResourceType>) -> Vec<ResourceType> {
    match filter {
        Some(t) => available.into_iter().filter(|a| *a == t).collect(),
        None => available,
    }
}

/// Every node grouped by type, then by display name; one row per property
pub fn property_listing(graph: &Graph, options: &DisplayOptions) -> Grid {
    let sections = selected_types(graph.types(), options.resource_type)
        .into_iter()
        .map(|t| {
            let mut groups: Vec<Group> = graph
                .nodes_of_type(t)
                .into_iter()
                .map(|node| Group {
                    name: node.display_name(),
                    properties: labelled(
                        node.properties()
                            .iter()
                            .map(|(k, v)| (k.clone(), vec![v.to_string()]))
                            .collect(),
                    ),
                })
                .collect();
            groups.sort_by(|a, b| a.name.cmp(&b.name));
            (t, groups)
        })
        .collect();
    listing_grid(sections)
}

fn name_in(graph: &Graph, node: &NodeRef) -> String {
    graph
        .node(node)
        .map(Node::display_name)
        .unwrap_or_else(|| node.id.clone())
}

fn prefixed(prefix: char, value: &Option<PropertyValue>) -> Option<String> {
    value.as_ref().map(|v| format!("{} {}", prefix, v))
}

/// Changed nodes grouped by type; inserted and deleted nodes get a single
/// `+ name` / `- name` row, modified nodes one row per changed property
/// with the new value stacked above the old one.
pub fn diff_listing(diff: &GraphDiff, options: &DisplayOptions) -> Grid {
    let sections = selected_types(diff.changed_types(), options.resource_type)
        .into_iter()
        .map(|t| {
            let inserted = diff
                .inserted_nodes()
                .iter()
                .filter(|r| r.resource_type == t)
                .map(|r| Group {
                    name: format!("+ {}", name_in(diff.remote(), r)),
                    properties: Vec::new(),
                });
            let deleted = diff
                .deleted_nodes()
                .iter()
                .filter(|r| r.resource_type == t)
                .map(|r| Group {
                    name: format!("- {}", name_in(diff.local(), r)),
                    properties: Vec::new(),
                });
            let modified = diff
                .modified_nodes()
                .iter()
                .filter(|d| d.node.resource_type == t)
                .map(|d| Group {
                    name: name_in(diff.remote(), &d.node),
                    properties: labelled(
                        d.changes
                            .iter()
                            .map(|c| {
                                let lines: Vec<String> = prefixed('+', &c.new)
                                    .into_iter()
                                    .chain(prefixed('-', &c.old))
                                    .collect();
                                (c.key.clone(), lines)
                            })
                            .collect(),
                    ),
                });

            let mut groups: Vec<Group> = inserted.chain(deleted).chain(modified).collect();
            groups.sort_by(|a, b| a.name.cmp(&b.name));
            (t, groups)
        })
        .collect();
    listing_grid(sections)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> Graph {
        let mut g = Graph::new();
        let web = NodeRef::new(ResourceType::Instance, "i2");
        let db = NodeRef::new(ResourceType::Instance, "i1");
        let vpc = NodeRef::new(ResourceType::Vpc, "v1");
        g.add_resource(&web);
        g.add_resource(&db);
        g.add_resource(&vpc);
        g.set_property(&web, "Name", "web");
        g.set_property(&web, "State", "running");
        g.set_property(&db, "Name", "db");
        g
    }

    #[test]
    fn test_default_sort_marks_first_column() {
        let opts = DisplayOptions::new()
            .with_headers(vec![ColumnDefinition::new("Name"), ColumnDefinition::new("State")])
            .with_resource_type(ResourceType::Instance);
        let grid = columnar(&graph(), &opts, Utc::now());

        assert_eq!(grid.columns[0].title(), "NAME ▲");
        assert_eq!(grid.columns[1].title(), "STATE");
        assert_eq!(grid.rows[0][0].lines, vec!["db".to_string()]);
        assert!(grid.rows[0][1].is_empty());
    }

    #[test]
    fn test_unresolved_sort_keeps_source_order() {
        let opts = DisplayOptions::new()
            .with_headers(vec![ColumnDefinition::new("Name")])
            .with_resource_type(ResourceType::Instance)
            .with_sort_by(["missing"]);
        let grid = columnar(&graph(), &opts, Utc::now());

        assert!(!grid.columns[0].sorted);
        assert_eq!(grid.rows[0][0].joined(), "db");
        assert_eq!(grid.rows[1][0].joined(), "web");
    }

    #[test]
    fn test_property_listing_groups() {
        let grid = property_listing(&graph(), &DisplayOptions::new());
        let flat: Vec<Vec<String>> = grid
            .rows
            .iter()
            .map(|r| r.iter().map(Cell::joined).collect())
            .collect();

        assert_eq!(
            flat,
            vec![
                vec!["instance", "db", "Name", "db"],
                vec!["", "web", "Name", "web"],
                vec!["", "", "State", "running"],
                vec!["vpc", "v1", "", ""],
            ]
        );
    }

    #[test]
    fn test_property_rows_ignore_key_case_and_use_labels() {
        let mut g = Graph::new();
        let bucket = NodeRef::new(ResourceType::Bucket, "b1");
        g.set_property(&bucket, "Zone", "eu");
        g.set_property(&bucket, "arn", "arn:aws:s3:::b1");
        g.set_property(&bucket, "PublicIp", "1.2.3.4");

        let grid = property_listing(&g, &DisplayOptions::new());
        let labels: Vec<String> = grid.rows.iter().map(|r| r[2].joined()).collect();
        assert_eq!(labels, vec!["arn", "Public IP", "Zone"]);
    }

    #[test]
    fn test_property_listing_type_filter() {
        let opts = DisplayOptions::new().with_resource_type(ResourceType::Vpc);
        let grid = property_listing(&graph(), &opts);
        assert_eq!(grid.rows.len(), 1);
    }
}
