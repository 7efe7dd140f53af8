//! Bordered, aligned table output.

use colored::Colorize;

use super::column::{truncate, TruncateSide};
use super::grid::{Cell, Grid};
use super::options::Format;
use super::render::{unsupported, Render, View};
use super::width::fit_to_width;
use crate::errors::Result;

#[derive(Debug, Clone, Copy)]
pub struct TableRenderer {
    /// `0` means unlimited
    pub max_width: usize,
}

fn width_of(s: &str) -> usize {
    s.chars().count()
}

fn border(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for w in widths {
        line.push_str(&"-".repeat(w + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

fn centered(text: &str, width: usize) -> String {
    let gap = width.saturating_sub(width_of(text));
    let left = gap / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(gap - left))
}

fn padded(text: &str, width: usize, cell: &Cell) -> String {
    let pad = " ".repeat(width.saturating_sub(width_of(text)));
    match cell.color {
        Some(color) => format!("{}{}", text.color(color), pad),
        None => format!("{}{}", text, pad),
    }
}

fn truncate_cells(rows: &mut [Vec<Cell>], column: usize, budget: usize, side: TruncateSide) {
    for row in rows.iter_mut() {
        if let Some(cell) = row.get_mut(column) {
            for line in cell.lines.iter_mut() {
                *line = truncate(line, budget, side);
            }
        }
    }
}

impl TableRenderer {
    fn render_grid(&self, grid: &Grid) -> String {
        let mut rows = grid.rows.clone();
        for (i, column) in grid.columns.iter().enumerate() {
            if let Some((budget, side)) = column.truncate {
                truncate_cells(&mut rows, i, budget, side);
            }
        }

        let titles: Vec<String> = grid.columns.iter().map(|c| c.title()).collect();
        let widths: Vec<usize> = titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                rows.iter()
                    .filter_map(|row| row.get(i))
                    .flat_map(|cell| cell.lines.iter())
                    .map(|line| width_of(line))
                    .fold(width_of(title), usize::max)
            })
            .collect();
        let floors: Vec<Option<usize>> = grid
            .columns
            .iter()
            .zip(&titles)
            .map(|(c, title)| c.truncate.map(|_| width_of(title)))
            .collect();

        let fit = fit_to_width(&widths, &floors, self.max_width);
        for (i, (&fitted, &natural)) in fit.widths.iter().zip(&widths).enumerate() {
            if fitted < natural {
                if let Some((_, side)) = grid.columns[i].truncate {
                    truncate_cells(&mut rows, i, fitted, side);
                }
            }
        }
        let widths = fit.widths;

        let mut out = border(&widths);
        out.push('|');
        for (title, w) in titles.iter().zip(&widths) {
            out.push_str(&format!(" {} |", centered(title, *w)));
        }
        out.push('\n');
        out.push_str(&border(&widths));

        for row in &rows {
            let height = row
                .iter()
                .take(widths.len())
                .map(|c| c.lines.len())
                .max()
                .unwrap_or(0)
                .max(1);
            for line_idx in 0..height {
                out.push('|');
                for (cell, w) in row.iter().zip(&widths) {
                    let text = cell.lines.get(line_idx).map(String::as_str).unwrap_or("");
                    out.push_str(&format!(" {} |", padded(text, *w, cell)));
                }
                out.push('\n');
            }
        }
        out.push_str(&border(&widths));

        if !fit.dropped.is_empty() {
            let names: Vec<String> = fit
                .dropped
                .iter()
                .map(|&i| format!("'{}'", grid.columns[i].label))
                .collect();
            out.push_str(&format!(
                "Columns truncated to fit terminal: {}\n",
                names.join(", ")
            ));
        }
        out
    }
}

impl Render for TableRenderer {
    fn render(&self, view: &View) -> Result<String> {
        match view {
            View::Grid(grid) => Ok(self.render_grid(grid)),
            other => Err(unsupported(Format::Table, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::grid::GridColumn;

    fn column(label: &str, sorted: bool) -> GridColumn {
        GridColumn {
            label: label.to_string(),
            sorted,
            truncate: Some((25, TruncateSide::Left)),
        }
    }

    #[test]
    fn test_centered_header_and_left_aligned_cells() {
        let grid = Grid {
            columns: vec![column("Id", true), column("Type", false)],
            rows: vec![vec![Cell::text("inst_1"), Cell::text("t2.xlarge")]],
            sparse: false,
        };
        let out = TableRenderer { max_width: 0 }.render(&View::Grid(grid)).unwrap();
        assert_eq!(
            out,
            "+--------+-----------+\n\
             |  ID ▲  |   TYPE    |\n\
             +--------+-----------+\n\
             | inst_1 | t2.xlarge |\n\
             +--------+-----------+\n"
        );
    }

    #[test]
    fn test_stacked_cell_spans_lines() {
        let grid = Grid {
            columns: vec![column("Property", false), column("Value", false)],
            rows: vec![vec![
                Cell::text("Id"),
                Cell::stacked(vec!["+ new_id".to_string(), "- inst_1".to_string()]),
            ]],
            sparse: true,
        };
        let out = TableRenderer { max_width: 0 }.render(&View::Grid(grid)).unwrap();
        assert!(out.contains("| Id       | + new_id |\n|          | - inst_1 |\n"));
    }

    #[test]
    fn test_shrunk_column_is_retruncated() {
        let long = "x".repeat(30);
        let grid = Grid {
            columns: vec![column("A", false), column("B", false)],
            rows: vec![vec![Cell::text("a"), Cell::text(long)]],
            sparse: false,
        };
        // footprints 3 + 27 = 30; B shrinks from 25 to 15 to fit in 20
        let out = TableRenderer { max_width: 20 }.render(&View::Grid(grid)).unwrap();
        assert!(out.contains(&format!("| a | ...{} |", "x".repeat(12))), "{}", out);
        assert!(!out.contains("Columns truncated"));
    }
}
