//! Stratus CLI
//!
//! Command-line interface for inspecting and comparing inventory snapshots

use clap::{Parser, Subcommand, ValueEnum};
use stratus_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "stratus")]
#[command(about = "Stratus - cloud inventory reports", long_about = None)]
struct Cli {
    /// Emit operation logs on stderr in the given format
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Human,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Display one snapshot
    Show(commands::show::ShowArgs),
    /// Display the changes between a local and a remote snapshot
    Diff(commands::diff::DiffArgs),
}

fn main() {
    let cli = Cli::parse();

    match cli.log_format {
        Some(LogFormat::Human) => init(Profile::Development),
        Some(LogFormat::Json) => init(Profile::Production),
        None => {}
    }

    let result = match cli.command {
        Commands::Show(args) => commands::show::execute(args),
        Commands::Diff(args) => commands::diff::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
