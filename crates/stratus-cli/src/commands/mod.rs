//! Command implementations and the display flags they share

pub mod diff;
pub mod show;

use clap::Args;
use std::io::{IsTerminal, Write};
use stratus_core::display::{DisplayOptions, Displayer, Format};
use stratus_core::graph::{NodeRef, ResourceType};

/// Flags common to every command that prints a report
#[derive(Debug, Args)]
pub struct DisplayArgs {
    /// Output format: table, csv, porcelain or tree
    #[arg(short, long, default_value = "table")]
    pub format: Format,

    /// Restrict the report to one resource type
    #[arg(short = 't', long = "type")]
    pub resource_type: Option<ResourceType>,

    /// Porcelain only: list ids followed by names
    #[arg(long)]
    pub ids_only: bool,

    /// Table width budget; defaults to the terminal width, 0 is unlimited
    #[arg(long)]
    pub max_width: Option<usize>,

    /// Tree root as type/id, e.g. region/eu-west-1
    #[arg(long, value_parser = parse_root)]
    pub root: Option<NodeRef>,
}

impl DisplayArgs {
    /// Options carrying every shared flag
    pub fn options(&self) -> DisplayOptions {
        let mut options = DisplayOptions::new()
            .with_format(self.format)
            .with_ids_only(self.ids_only)
            .with_max_width(self.max_width.unwrap_or_else(terminal_width));
        if let Some(resource_type) = self.resource_type {
            options = options.with_resource_type(resource_type);
        }
        if let Some(root) = &self.root {
            options = options.with_root_node(root.clone());
        }
        options
    }
}

/// `type/id` into a node reference
pub fn parse_root(s: &str) -> Result<NodeRef, String> {
    let (type_name, id) = s
        .split_once('/')
        .ok_or_else(|| format!("expected type/id, got '{}'", s))?;
    if id.is_empty() {
        return Err(format!("missing id in '{}'", s));
    }
    let resource_type = type_name
        .parse::<ResourceType>()
        .map_err(|e| e.to_string())?;
    Ok(NodeRef::new(resource_type, id))
}

/// Columns of the attached terminal, or unlimited when not a terminal
fn terminal_width() -> usize {
    if !std::io::stdout().is_terminal() {
        return 0;
    }
    crossterm::terminal::size()
        .map(|(cols, _)| usize::from(cols))
        .unwrap_or(0)
}

/// Print a report on stdout, closing line-oriented formats with a newline
pub fn print_report(displayer: &Displayer<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    displayer.print(&mut handle)?;
    if matches!(displayer.options().format(), Format::Csv | Format::Porcelain) {
        writeln!(handle)?;
    }
    handle.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root() {
        let root = parse_root("region/eu-west-1").unwrap();
        assert_eq!(root, NodeRef::new(ResourceType::Region, "eu-west-1"));
        assert!(parse_root("region").is_err());
        assert!(parse_root("region/").is_err());
        assert!(parse_root("planet/earth").is_err());
    }
}
