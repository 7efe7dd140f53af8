//! Diff command
//!
//! Usage: stratus diff <LOCAL> <REMOTE> [--format tree --root region/eu-west-1] [--json]

use clap::Args;
use std::path::PathBuf;
use stratus_core::diff::{compute_diff, render_human_summary};
use stratus_core::Graph;

use super::{print_report, DisplayArgs};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Snapshot as last synced
    pub local: PathBuf,

    /// Snapshot as fetched now
    pub remote: PathBuf,

    #[command(flatten)]
    pub display: DisplayArgs,

    /// Print the structured diff as JSON instead of a report
    #[arg(long, conflicts_with = "summary")]
    pub json: bool,

    /// Print a one-paragraph summary instead of a report
    #[arg(long)]
    pub summary: bool,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let local = Graph::from_file(&args.local)?;
    let remote = Graph::from_file(&args.remote)?;
    let diff = compute_diff(&local, &remote);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&diff)?);
        return Ok(());
    }
    if args.summary {
        print!("{}", render_human_summary(&diff));
        return Ok(());
    }

    let displayer = args.display.options().build(&diff)?;
    print_report(&displayer)
}
