//! Pairmerge CLI - learn BPE merge rules and apply them to text.
//!
//! This is the main entry point for the `pairmerge` command-line tool.

mod commands;

use clap::{Parser, Subcommand};
use commands::{BenchmarkCommand, InspectCommand, SegmentCommand, TrainCommand};
use env_logger::{Builder, Env};

#[derive(Parser)]
#[command(name = "pairmerge")]
#[command(about = "Learn and apply BPE merge rules", long_about = None)]
#[command(version)]
struct Cli {
    /// Only log warnings and errors
    #[arg(short, long, global = true, default_value_t = false)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Learn merge rules from a text file
    Train(TrainCommand),
    /// Segment text with learned rules
    Segment(SegmentCommand),
    /// Print a rule list
    Inspect(InspectCommand),
    /// Benchmark segmentation performance
    Benchmark(BenchmarkCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "warn" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    match cli.command {
        Commands::Train(cmd) => commands::train::run(cmd)?,
        Commands::Segment(cmd) => commands::segment::run(cmd)?,
        Commands::Inspect(cmd) => commands::inspect::run(cmd)?,
        Commands::Benchmark(cmd) => commands::benchmark::run(cmd)?,
    }

    Ok(())
}
