use anyhow::{Context, Result};
use futures_util::future::join_all;
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use tracing::{info, warn};

use crate::ocr::{self, BoundingBox, DetectedText};
use crate::settings::Settings;

pub type RecognizeFuture<'a> = Pin<Box<dyn Future<Output = Result<DetectedText>> + Send + 'a>>;
pub type TranslateFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;
pub type AvailabilityFuture<'a> = Pin<Box<dyn Future<Output = bool> + Send + 'a>>;

/// OCR engine that turns an encoded camera frame into text regions.
pub trait TextRecognizer: Send + Sync {
    fn recognize<'a>(&'a self, image: &'a [u8]) -> RecognizeFuture<'a>;
}

/// Translation engine for a single piece of text.
pub trait TextTranslator: Send + Sync {
    fn translate<'a>(
        &'a self,
        text: &'a str,
        source_language: &'a str,
        target_language: &'a str,
    ) -> TranslateFuture<'a>;

    fn are_models_available<'a>(
        &'a self,
        source_language: &'a str,
        target_language: &'a str,
    ) -> AvailabilityFuture<'a>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslatedTextBlock {
    pub original_text: String,
    pub translated_text: String,
    pub bounding_box: BoundingBox,
    pub confidence: f32,
}

#[derive(Debug, Clone)]
pub struct CameraTranslator<R: TextRecognizer, T: TextTranslator> {
    recognizer: R,
    translator: T,
    settings: Settings,
}

impl<R: TextRecognizer, T: TextTranslator> CameraTranslator<R, T> {
    pub fn new(recognizer: R, translator: T, settings: Settings) -> Self {
        Self {
            recognizer,
            translator,
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Recognizes, cleans up and translates one camera capture. Blocks whose
    /// translation fails keep their original text.
    pub async fn process_image(
        &self,
        image: &[u8],
        source_language: &str,
        target_language: &str,
    ) -> Result<Vec<TranslatedTextBlock>> {
        let detected = self
            .recognizer
            .recognize(image)
            .await
            .with_context(|| "camera translation error")?;
        if detected.text_blocks.is_empty() {
            return Ok(Vec::new());
        }

        let detected_len = detected.text_blocks.len();
        let blocks = ocr::filter_and_group_with(
            detected.text_blocks,
            &self.settings.filter,
            &self.settings.grouping,
        );
        info!(
            "camera capture: {} OCR blocks -> {} translatable groups",
            detected_len,
            blocks.len()
        );
        if blocks.is_empty() {
            return Ok(Vec::new());
        }

        let translations = join_all(blocks.iter().map(|block| {
            self.translator
                .translate(&block.text, source_language, target_language)
        }))
        .await;

        Ok(blocks
            .into_iter()
            .zip(translations)
            .map(|(block, translation)| {
                let translated_text = match translation {
                    Ok(text) => text,
                    Err(err) => {
                        warn!(
                            "translation failed for {:?}; keeping original: {:#}",
                            block.text, err
                        );
                        block.text.clone()
                    }
                };
                TranslatedTextBlock {
                    original_text: block.text,
                    translated_text,
                    bounding_box: block.bounding_box,
                    confidence: 1.0,
                }
            })
            .collect())
    }

    pub async fn are_models_available(
        &self,
        source_language: &str,
        target_language: &str,
    ) -> bool {
        self.translator
            .are_models_available(source_language, target_language)
            .await
    }
}
