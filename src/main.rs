use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "camera-translator-rust",
    version,
    about = "Filter OCR noise and group text blocks into translatable paragraphs"
)]
struct Cli {
    /// OCR result JSON file (DetectedText or TextBlock array); reads stdin when omitted
    #[arg(short = 'd', long = "data")]
    data: Option<String>,

    /// Only drop noise blocks, do not merge them
    #[arg(long = "filter-only")]
    filter_only: bool,

    /// Print one block text per line instead of JSON
    #[arg(long = "text")]
    text: bool,

    /// Pretty-print JSON output
    #[arg(long = "pretty")]
    pretty: bool,

    /// Read extra settings from a local TOML file
    #[arg(short = 'r', long = "read-settings")]
    read_settings: Option<String>,

    /// Enable verbose logging
    #[arg(long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    camera_translator_rust::logging::init(cli.verbose)?;

    let input = match cli.data.as_deref() {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read OCR data: {}", path))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .with_context(|| "failed to read stdin")?;
            buffer
        }
    };

    let config = camera_translator_rust::Config {
        settings_path: cli.read_settings,
        filter_only: cli.filter_only,
        text_output: cli.text,
        pretty: cli.pretty,
    };
    let output = camera_translator_rust::run(config, Some(input))?;
    println!("{}", output);
    Ok(())
}
