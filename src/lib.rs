use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::path::Path;

pub mod camera;
pub mod logging;
pub mod ocr;
pub mod settings;
#[cfg(test)]
mod test_util;

pub use camera::{CameraTranslator, TextRecognizer, TextTranslator, TranslatedTextBlock};
pub use ocr::{
    BoundingBox, DetectedText, TextBlock, TextLine, filter_and_group, filter_and_group_with,
};
pub use settings::Settings;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub settings_path: Option<String>,
    pub filter_only: bool,
    pub text_output: bool,
    pub pretty: bool,
}

/// OCR output as produced upstream: a full result object or a bare block list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OcrInput {
    Detected(DetectedText),
    Blocks(Vec<TextBlock>),
}

impl OcrInput {
    fn into_blocks(self) -> Vec<TextBlock> {
        match self {
            OcrInput::Detected(detected) => detected.text_blocks,
            OcrInput::Blocks(blocks) => blocks,
        }
    }
}

pub fn run(config: Config, input: Option<String>) -> Result<String> {
    let settings_path = config.settings_path.as_deref().map(Path::new);
    let settings = settings::load_settings(settings_path)?;

    let input = input.unwrap_or_default();
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!("stdin is empty"));
    }
    let blocks = serde_json::from_str::<OcrInput>(input)
        .with_context(|| "failed to parse OCR blocks (expected DetectedText or TextBlock array)")?
        .into_blocks();

    let blocks = if config.filter_only {
        ocr::filter_blocks(blocks, &settings.filter)
    } else {
        filter_and_group_with(blocks, &settings.filter, &settings.grouping)
    };

    format_output(&blocks, &config)
}

fn format_output(blocks: &[TextBlock], config: &Config) -> Result<String> {
    if config.text_output {
        return Ok(blocks
            .iter()
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("\n"));
    }
    let json = if config.pretty {
        serde_json::to_string_pretty(blocks)
    } else {
        serde_json::to_string(blocks)
    };
    json.with_context(|| "failed to serialize OCR blocks")
}
