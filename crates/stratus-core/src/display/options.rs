//! Display configuration: output format, source binding and the
//! functional-options aggregate.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use super::column::ColumnDefinition;
use super::displayer::Displayer;
use crate::diff::GraphDiff;
use crate::errors::{Result, StratusError};
use crate::graph::{Graph, NodeRef, ResourceType};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Table,
    Csv,
    Porcelain,
    Tree,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Table => "table",
            Format::Csv => "csv",
            Format::Porcelain => "porcelain",
            Format::Tree => "tree",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = StratusError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(Format::Table),
            "csv" => Ok(Format::Csv),
            "porcelain" => Ok(Format::Porcelain),
            "tree" => Ok(Format::Tree),
            _ => Err(StratusError::UnsupportedFormat {
                name: s.to_string(),
            }),
        }
    }
}

/// What a displayer renders
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    Graph(&'a Graph),
    Diff(&'a GraphDiff),
}

impl<'a> From<&'a Graph> for Source<'a> {
    fn from(graph: &'a Graph) -> Self {
        Source::Graph(graph)
    }
}

impl<'a> From<&'a GraphDiff> for Source<'a> {
    fn from(diff: &'a GraphDiff) -> Self {
        Source::Diff(diff)
    }
}

impl Source<'_> {
    /// True when the node exists on any side of the source
    pub fn contains(&self, node: &NodeRef) -> bool {
        match self {
            Source::Graph(g) => g.contains(node),
            Source::Diff(d) => d.local().contains(node) || d.remote().contains(node),
        }
    }
}

/// Immutable display configuration
///
/// ```
/// use stratus_core::display::{ColumnDefinition, DisplayOptions, Format};
/// use stratus_core::graph::{Graph, ResourceType};
///
/// let graph = Graph::new();
/// let displayer = DisplayOptions::new()
///     .with_headers(vec![ColumnDefinition::new("Id"), ColumnDefinition::new("Name")])
///     .with_resource_type(ResourceType::Instance)
///     .with_format(Format::Csv)
///     .with_sort_by(["name"])
///     .build(&graph)
///     .unwrap();
/// assert_eq!(displayer.render().unwrap(), "Id, Name");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DisplayOptions {
    pub(crate) headers: Vec<ColumnDefinition>,
    pub(crate) resource_type: Option<ResourceType>,
    pub(crate) format: Format,
    pub(crate) sort_by: Vec<String>,
    pub(crate) ids_only: bool,
    pub(crate) max_width: usize,
    pub(crate) root_node: Option<NodeRef>,
    pub(crate) colors: bool,
    pub(crate) now: Option<DateTime<Utc>>,
}

impl DisplayOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordered column declarations; none selects the multi-type listing
    pub fn with_headers(mut self, headers: Vec<ColumnDefinition>) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_resource_type(mut self, resource_type: ResourceType) -> Self {
        self.resource_type = Some(resource_type);
        self
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Ascending sort keys, primary first; matched case-insensitively
    pub fn with_sort_by<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sort_by = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Porcelain only: list every node id followed by its name
    pub fn with_ids_only(mut self, ids_only: bool) -> Self {
        self.ids_only = ids_only;
        self
    }

    /// Table width budget; `0` means unlimited
    pub fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = max_width;
        self
    }

    /// Tree root; required by the tree format
    pub fn with_root_node(mut self, root: NodeRef) -> Self {
        self.root_node = Some(root);
        self
    }

    /// Colorize table cells declared with colored values
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Reference instant for humanized timestamps, defaults to build time
    pub fn with_reference_time(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn headers(&self) -> &[ColumnDefinition] {
        &self.headers
    }

    /// Bind the options to a source
    ///
    /// # Errors
    /// * `MissingRootNode` - tree format without a root node
    /// * `RootNotFound` - the root node is absent from the source
    pub fn build<'a>(mut self, source: impl Into<Source<'a>>) -> Result<Displayer<'a>> {
        let source = source.into();
        if self.format == Format::Tree {
            let root = self
                .root_node
                .as_ref()
                .ok_or(StratusError::MissingRootNode)?;
            if !source.contains(root) {
                return Err(StratusError::RootNotFound {
                    node: format!("{}/{}", root.resource_type, root.id),
                });
            }
        }
        if self.now.is_none() {
            self.now = Some(Utc::now());
        }
        Ok(Displayer::new(self, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<Format>().unwrap(), Format::Csv);
        assert_eq!("tree".parse::<Format>().unwrap(), Format::Tree);
        assert!(matches!(
            "yaml".parse::<Format>(),
            Err(StratusError::UnsupportedFormat { name }) if name == "yaml"
        ));
    }

    #[test]
    fn test_tree_requires_root() {
        let graph = Graph::new();
        let err = DisplayOptions::new()
            .with_format(Format::Tree)
            .build(&graph)
            .unwrap_err();
        assert_eq!(err, StratusError::MissingRootNode);
    }

    #[test]
    fn test_tree_root_must_exist() {
        let graph = Graph::new();
        let err = DisplayOptions::new()
            .with_format(Format::Tree)
            .with_root_node(NodeRef::new(ResourceType::Region, "eu-west-1"))
            .build(&graph)
            .unwrap_err();
        assert!(matches!(err, StratusError::RootNotFound { .. }));
    }
}
