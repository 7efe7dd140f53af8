//! Show command
//!
//! Usage: stratus show <FILE> [--columns Id,Name:Label] [--sort name] [--format csv]

use clap::Args;
use colored::Color;
use std::path::PathBuf;
use stratus_core::display::{ColumnDefinition, TimeFormat};
use stratus_core::Graph;

use super::{print_report, DisplayArgs};

const STATE_COLUMN: &str = "State";

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Assertion file holding the snapshot
    pub file: PathBuf,

    #[command(flatten)]
    pub display: DisplayArgs,

    /// Columns as Key[:Friendly[:short|basic|humanize]], comma separated;
    /// none lists every property of every node
    #[arg(short, long, value_delimiter = ',', value_parser = parse_column)]
    pub columns: Vec<ColumnDefinition>,

    /// Sort keys, primary first, matched against keys or friendly names
    #[arg(short, long, value_delimiter = ',')]
    pub sort: Vec<String>,

    /// Highlight instance states in tables
    #[arg(long)]
    pub color: bool,
}

/// Parse one column declaration
pub fn parse_column(spec: &str) -> Result<ColumnDefinition, String> {
    let mut parts = spec.splitn(3, ':');
    let key = parts.next().map(str::trim).unwrap_or_default();
    if key.is_empty() {
        return Err(format!("empty column key in '{}'", spec));
    }

    let mut column = ColumnDefinition::new(key);
    if let Some(friendly) = parts.next().map(str::trim).filter(|f| !f.is_empty()) {
        column = column.with_friendly(friendly);
    }
    if let Some(time) = parts.next() {
        let format = match time.trim().to_ascii_lowercase().as_str() {
            "short" => TimeFormat::Short,
            "basic" => TimeFormat::Basic,
            "humanize" => TimeFormat::Humanize,
            other => return Err(format!("unknown time format '{}'", other)),
        };
        column = column.with_time_format(format);
    }
    Ok(column)
}

fn state_palette(column: ColumnDefinition) -> ColumnDefinition {
    if !column.prop().eq_ignore_ascii_case(STATE_COLUMN) {
        return column;
    }
    column.with_colored_values([
        ("running", Color::Green),
        ("pending", Color::Yellow),
        ("stopped", Color::Red),
        ("terminated", Color::Red),
    ])
}

/// Execute show command
pub fn execute(args: ShowArgs) -> Result<(), Box<dyn std::error::Error>> {
    let graph = Graph::from_file(&args.file)?;

    let mut columns = args.columns;
    if args.color {
        colored::control::set_override(true);
        columns = columns.into_iter().map(state_palette).collect();
    }

    let displayer = args
        .display
        .options()
        .with_headers(columns)
        .with_sort_by(args.sort)
        .with_colors(args.color)
        .build(&graph)?;

    print_report(&displayer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_column_variants() {
        let plain = parse_column("Id").unwrap();
        assert_eq!(plain.prop(), "Id");
        assert_eq!(plain.friendly(), "Id");

        let friendly = parse_column("PublicIp:Public IP").unwrap();
        assert_eq!(friendly.friendly(), "Public IP");

        assert!(parse_column("LaunchTime:Launched:humanize").is_ok());
        assert!(parse_column("LaunchTime::short").is_ok());
        assert!(parse_column("LaunchTime:Launched:iso").is_err());
        assert!(parse_column(":Name").is_err());
    }

    #[test]
    fn test_state_palette_only_touches_state() {
        let state = state_palette(ColumnDefinition::new("state"));
        assert_eq!(state.color_for("running"), Some(Color::Green));

        let name = state_palette(ColumnDefinition::new("Name"));
        assert_eq!(name.color_for("running"), None);
    }
}
