//! Renderer dispatch.
//!
//! A [`View`] is what the displayer extracted from its source; a
//! [`Renderer`] turns a view into text for one output format.

use super::csv::CsvRenderer;
use super::grid::Grid;
use super::options::{DisplayOptions, Format};
use super::porcelain::PorcelainRenderer;
use super::table::TableRenderer;
use super::tree::TreeLine;
use crate::errors::{Result, StratusError};

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Grid(Grid),
    Tree(Vec<TreeLine>),
    Ids(Vec<String>),
}

impl View {
    fn kind(&self) -> &'static str {
        match self {
            View::Grid(_) => "grid",
            View::Tree(_) => "tree",
            View::Ids(_) => "ids",
        }
    }
}

/// Shared contract of all output formats
pub trait Render {
    fn render(&self, view: &View) -> Result<String>;
}

pub(crate) fn unsupported(format: Format, view: &View) -> StratusError {
    StratusError::Internal {
        message: format!("{} renderer cannot draw a {} view", format, view.kind()),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TreeRenderer;

impl Render for TreeRenderer {
    fn render(&self, view: &View) -> Result<String> {
        match view {
            View::Tree(lines) => Ok(lines
                .iter()
                .map(|line| format!("{}\n", line.render()))
                .collect()),
            other => Err(unsupported(Format::Tree, other)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Renderer {
    Table(TableRenderer),
    Csv(CsvRenderer),
    Porcelain(PorcelainRenderer),
    Tree(TreeRenderer),
}

impl Renderer {
    pub fn for_options(options: &DisplayOptions) -> Self {
        match options.format {
            Format::Table => Renderer::Table(TableRenderer {
                max_width: options.max_width,
            }),
            Format::Csv => Renderer::Csv(CsvRenderer),
            Format::Porcelain => Renderer::Porcelain(PorcelainRenderer),
            Format::Tree => Renderer::Tree(TreeRenderer),
        }
    }
}

impl Render for Renderer {
    fn render(&self, view: &View) -> Result<String> {
        match self {
            Renderer::Table(r) => r.render(view),
            Renderer::Csv(r) => r.render(view),
            Renderer::Porcelain(r) => r.render(view),
            Renderer::Tree(r) => r.render(view),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_lines_end_with_newline() {
        let view = View::Tree(vec![
            TreeLine {
                mark: None,
                depth: 0,
                label: "region, eu-west-1".to_string(),
            },
            TreeLine {
                mark: Some('-'),
                depth: 1,
                label: "vpc, vpc_1".to_string(),
            },
        ]);
        assert_eq!(
            TreeRenderer.render(&view).unwrap(),
            "region, eu-west-1\n-\tvpc, vpc_1\n"
        );
    }

    #[test]
    fn test_mismatched_view_is_internal_error() {
        let err = TreeRenderer.render(&View::Ids(Vec::new())).unwrap_err();
        assert!(matches!(err, StratusError::Internal { .. }));
    }
}
