//! Comma-separated output: friendly names, `, ` separators, no quoting.

use super::grid::{Cell, Grid};
use super::options::Format;
use super::render::{unsupported, Render, View};
use crate::errors::Result;

const SEPARATOR: &str = ", ";

#[derive(Debug, Clone, Copy)]
pub struct CsvRenderer;

impl Render for CsvRenderer {
    fn render(&self, view: &View) -> Result<String> {
        let View::Grid(grid) = view else {
            return Err(unsupported(Format::Csv, view));
        };
        Ok(render_grid(grid))
    }
}

fn render_grid(grid: &Grid) -> String {
    let header: Vec<&str> = grid.columns.iter().map(|c| c.label.as_str()).collect();
    let mut lines = vec![header.join(SEPARATOR)];
    for row in &grid.rows {
        let fields: Vec<String> = row.iter().map(Cell::joined).collect();
        lines.push(fields.join(SEPARATOR));
    }
    lines.join("\n")
}
