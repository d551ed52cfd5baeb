//! Inspect command implementation.

use clap::Parser;

/// Inspect command arguments.
#[derive(Parser)]
pub struct InspectCommand {
    /// Rules directory, merges.json or merges.txt
    #[arg(short, long)]
    pub rules: String,

    /// Print at most this many rules
    #[arg(short, long)]
    pub limit: Option<usize>,
}

use anyhow::Result as AnyhowResult;
use pairmerge_tokenizer::MergesLoader;
use std::path::Path;

pub fn run(cmd: InspectCommand) -> AnyhowResult<()> {
    let saved = MergesLoader::load_path(Path::new(&cmd.rules))?;
    let stats = saved.merges.stats();

    println!("Rules: {}", stats.count);
    println!("  Distinct pairs: {}", stats.distinct_pairs);
    println!("  Longest symbol: {} chars", stats.longest_symbol);
    println!("  Normalization: {}", saved.normalization);
    if let Some(pattern) = &saved.split_pattern {
        println!("  Split pattern: {}", pattern);
    }
    println!();

    let limit = cmd.limit.unwrap_or(usize::MAX);
    for rule in saved.merges.iter().take(limit) {
        println!("{:>6}  {} -> {}", rule.rank, rule.pair, rule.merged);
    }

    Ok(())
}
