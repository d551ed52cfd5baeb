//! Segment command implementation.

use clap::Parser;

/// Segment command arguments.
#[derive(Parser)]
pub struct SegmentCommand {
    /// Rules directory, merges.json or merges.txt
    #[arg(short, long)]
    pub rules: String,

    /// Text to segment ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<String>,
}

use anyhow::Result as AnyhowResult;
use pairmerge_tokenizer::Segmenter;
use std::path::Path;

pub fn run(cmd: SegmentCommand) -> AnyhowResult<()> {
    let segmenter = Segmenter::load(Path::new(&cmd.rules))?;

    // Read input text (from stdin if "-")
    let input_text = if cmd.input == "-" {
        use std::io::Read;
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        cmd.input
    };

    let words = segmenter.segment_text(&input_text);
    let lines: Vec<String> = words.iter().map(|symbols| symbols.join(" ")).collect();
    let output = lines.join("\n");

    match &cmd.output {
        Some(path) => {
            std::fs::write(path, &output)?;
            println!("Segmented {} words to {}", words.len(), path);
        }
        None => {
            println!("{}", output);
        }
    }

    Ok(())
}
