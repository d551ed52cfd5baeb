//! Benchmark command implementation.

use clap::Parser;

/// Benchmark command arguments.
#[derive(Parser)]
pub struct BenchmarkCommand {
    /// Rules directory, merges.json or merges.txt
    #[arg(short, long)]
    pub rules: String,

    /// Path to input text file for benchmarking
    #[arg(short, long)]
    pub input: String,

    /// Number of iterations to run
    #[arg(short = 'n', long, default_value_t = 100)]
    pub iterations: usize,
}

use anyhow::{ensure, Result as AnyhowResult};
use pairmerge_tokenizer::{segment, Segmenter};
use std::fs;
use std::path::Path;
use std::time::Instant;

pub fn run(cmd: BenchmarkCommand) -> AnyhowResult<()> {
    ensure!(cmd.iterations > 0, "--iterations must be at least 1");

    let segmenter = Segmenter::load(Path::new(&cmd.rules))?;
    let text = fs::read_to_string(&cmd.input)?;
    let words: Vec<&str> = text.split_whitespace().collect();

    println!("Benchmarking segmentation...");
    println!("  Text length: {} bytes", text.len());
    println!("  Words: {}", words.len());
    println!("  Rules: {}", segmenter.rules().len());
    println!("  Iterations: {}", cmd.iterations);
    println!();

    // Warmup
    let symbols = segmenter.count_symbols(&text);

    // Uncached
    let start = Instant::now();
    for _ in 0..cmd.iterations {
        for word in &words {
            let _ = segment(word, segmenter.rules());
        }
    }
    let uncached = start.elapsed();

    // Cached
    let start = Instant::now();
    for _ in 0..cmd.iterations {
        let _ = segmenter.segment_text(&text);
    }
    let cached = start.elapsed();

    let per_iter = |secs: f64| secs * 1000.0 / cmd.iterations as f64;
    let throughput = |secs: f64| words.len() as f64 * cmd.iterations as f64 / secs;

    println!("Results:");
    println!("  Symbols per pass: {}", symbols);
    println!(
        "  Uncached: {:.3}ms/iter, {:.0} words/s",
        per_iter(uncached.as_secs_f64()),
        throughput(uncached.as_secs_f64())
    );
    println!(
        "  Cached: {:.3}ms/iter, {:.0} words/s",
        per_iter(cached.as_secs_f64()),
        throughput(cached.as_secs_f64())
    );
    if let Some(rate) = segmenter.cache_stats().hit_rate {
        println!("  Cache hit rate: {:.1}%", rate * 100.0);
    }

    Ok(())
}
