//! Train command implementation.

use clap::Parser;
use pairmerge_core::NormalizationForm;

/// Train command arguments.
#[derive(Parser)]
pub struct TrainCommand {
    /// Path to the training text file
    #[arg(short, long)]
    pub input: String,

    /// Output directory for the learned rules
    #[arg(short, long)]
    pub output: String,

    /// Maximum number of merges to learn
    #[arg(short, long, default_value_t = DEFAULT_MAX_MERGES as i64, allow_hyphen_values = true)]
    pub merges: i64,

    /// Stop once the best pair occurs fewer times than this
    #[arg(long, default_value_t = 1)]
    pub min_frequency: u64,

    /// Count initial pairs in parallel
    #[arg(short, long, default_value_t = false)]
    pub parallel: bool,

    /// Unicode normalization (nfc, nfd, nfkc, nfkd, none)
    #[arg(short, long, default_value_t = NormalizationForm::None)]
    pub normalize: NormalizationForm,

    /// Regex to split words on instead of whitespace
    #[arg(long)]
    pub pattern: Option<String>,

    /// Write merges.txt instead of merges.json
    #[arg(long, default_value_t = false)]
    pub text: bool,
}

use anyhow::{Context, Result as AnyhowResult};
use log::info;
use pairmerge_tokenizer::{MergesSaver, ModelFormat};
use pairmerge_training::{BpeTrainer, TrainingConfig, DEFAULT_MAX_MERGES};
use std::fs;
use std::path::Path;
use std::time::Instant;

pub fn run(cmd: TrainCommand) -> AnyhowResult<()> {
    let mut builder = TrainingConfig::builder()
        .max_merges(cmd.merges)
        .min_frequency(cmd.min_frequency)
        .parallel(cmd.parallel)
        .normalization(cmd.normalize);
    if let Some(pattern) = &cmd.pattern {
        builder = builder.split_pattern(pattern.as_str());
    }
    let config = builder.build()?;

    println!("Training merge rules...");
    println!("  Input: {}", cmd.input);
    println!("  Output: {}", cmd.output);
    println!("  Max merges: {}", config.max_merges);
    println!("  Min frequency: {}", config.min_frequency);
    println!("  Parallel: {}", config.parallel);
    println!();

    // Read training data
    let start = Instant::now();
    let data = fs::read_to_string(&cmd.input)
        .with_context(|| format!("failed to read {}", cmd.input))?;
    info!(
        "Read {} bytes in {:.2}s",
        data.len(),
        start.elapsed().as_secs_f64()
    );

    // Train
    let trainer = BpeTrainer::new(config)?;
    let start = Instant::now();
    let output = trainer.train(&data)?;
    println!(
        "Training completed in {:.2}s ({:?})",
        start.elapsed().as_secs_f64(),
        output.stop_reason
    );
    println!("  Unique words: {}", output.stats.unique_words);
    println!("  Total words: {}", output.stats.total_words);
    println!("  Merges learned: {}", output.merges.len());
    println!("  Pairs remaining: {}", output.stats.remaining_pairs);
    println!();

    // Save rules
    let format = if cmd.text {
        ModelFormat::Text
    } else {
        ModelFormat::Json
    };
    let path = MergesSaver::new(&output.merges)
        .normalization(cmd.normalize)
        .split_pattern(cmd.pattern.as_deref())
        .save_as(Path::new(&cmd.output), format)?;
    println!("Rules saved to {}", path.display());

    Ok(())
}
