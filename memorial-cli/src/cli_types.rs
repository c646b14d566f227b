//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use memorial_core::{SourceFormat, ValidationPolicy};

#[derive(Parser)]
#[command(name = "memorial-okean")]
#[command(about = "Generate memorial_okean SQL migrations from boat item sheets", long_about = None)]
pub(crate) struct Cli {
    /// Settings file (defaults to ~/.config/memorial-okean/settings.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments shared by commands that read a source file.
#[derive(Args, Clone)]
pub(crate) struct SourceArgs {
    /// Source file (.csv, .xlsx or .md)
    pub source: PathBuf,

    /// Source format (csv, xlsx, markdown); detected from the extension if omitted
    #[arg(short, long)]
    pub format: Option<SourceFormat>,

    /// Required fields: "all" (model, category, description) or "model-only"
    #[arg(short, long)]
    pub policy: Option<ValidationPolicy>,

    /// Leading lines/rows to skip (default: 3 for csv, 1 for xlsx, 0 for markdown)
    #[arg(long)]
    pub header_rows: Option<usize>,
}

#[derive(Args, Clone)]
pub(crate) struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output migration file (default: <output_dir>/<timestamp>_populate_memorial_okean.sql)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum tuples per INSERT statement
    #[arg(short, long, conflicts_with = "single_statement")]
    pub batch_size: Option<usize>,

    /// Put every tuple in one INSERT statement
    #[arg(long)]
    pub single_statement: bool,

    /// Leave the per-model distribution out of the SQL comments
    #[arg(long)]
    pub no_distribution: bool,

    /// Print the migration to stdout instead of writing it
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Generate a migration that truncates and repopulates memorial_okean
    Generate(GenerateArgs),

    /// Parse a source file and report records, distribution and skipped rows
    Inspect(SourceArgs),

    /// Show settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective settings and where they came from
    Show,

    /// Print the settings file path
    Path,
}
