mod filter;
mod geom;
mod group;
mod script;
mod text;

use serde::{Deserialize, Serialize};

pub use filter::{FilterConfig, filter_blocks, should_keep};
pub use group::{GroupingConfig, group_blocks};
pub use script::{Script, detect_script};

/// Axis-aligned rectangle in source image pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl BoundingBox {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Widened so extreme pixel coordinates cannot overflow.
    pub fn width(&self) -> i64 {
        i64::from(self.right) - i64::from(self.left)
    }

    pub fn height(&self) -> i64 {
        i64::from(self.bottom) - i64::from(self.top)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextLine {
    pub text: String,
    #[serde(alias = "boundingBox")]
    pub bounding_box: BoundingBox,
}

/// A detected text region, either straight from OCR or merged by grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    #[serde(alias = "boundingBox")]
    pub bounding_box: BoundingBox,
    #[serde(default)]
    pub lines: Vec<TextLine>,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, bounding_box: BoundingBox) -> Self {
        Self {
            text: text.into(),
            bounding_box,
            lines: Vec::new(),
        }
    }

    pub fn with_lines(mut self, lines: Vec<TextLine>) -> Self {
        self.lines = lines;
        self
    }
}

/// Full OCR result for one capture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedText {
    #[serde(default)]
    pub text: String,
    #[serde(alias = "textBlocks")]
    pub text_blocks: Vec<TextBlock>,
}

/// Drops noise blocks and merges the survivors into reading-order paragraphs
/// using the default thresholds.
pub fn filter_and_group(blocks: Vec<TextBlock>) -> Vec<TextBlock> {
    filter_and_group_with(blocks, &FilterConfig::default(), &GroupingConfig::default())
}

pub fn filter_and_group_with(
    blocks: Vec<TextBlock>,
    filter: &FilterConfig,
    grouping: &GroupingConfig,
) -> Vec<TextBlock> {
    let filtered = filter_blocks(blocks, filter);
    if filtered.is_empty() {
        return Vec::new();
    }
    group_blocks(filtered, grouping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::block;

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(filter_and_group(Vec::new()).is_empty());
    }

    #[test]
    fn code_like_block_is_dropped_before_grouping() {
        let blocks = vec![
            block("MainActivity.kt", 0, 0, 200, 50),
            block("Hello World", 0, 60, 200, 110),
        ];
        let result = filter_and_group(blocks);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].text, "Hello World");
        assert_eq!(result[0].bounding_box, BoundingBox::new(0, 60, 200, 110));
    }

    #[test]
    fn stacked_lines_merge_into_one_paragraph() {
        let blocks = vec![
            block("Hello there", 0, 0, 100, 30),
            block("World is near", 0, 35, 100, 65),
        ];
        let result = filter_and_group(blocks);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].text, "Hello there World is near");
        assert_eq!(result[0].bounding_box, BoundingBox::new(0, 0, 100, 65));
    }

    #[test]
    fn all_noise_returns_empty() {
        let blocks = vec![
            block("x", 0, 0, 20, 20),
            block("123", 0, 30, 20, 50),
            block("@#$", 0, 60, 20, 80),
            block("xyzpqr", 0, 100, 200, 150),
        ];
        assert!(filter_and_group(blocks).is_empty());
    }

    #[test]
    fn grouping_never_grows_the_filtered_list() {
        let blocks = vec![
            block("Hello there", 0, 0, 100, 30),
            block("World is near", 0, 35, 100, 65),
            block("Goodbye friend", 0, 300, 140, 330),
            block("Welcome home", 400, 300, 540, 330),
        ];
        let filtered = filter_blocks(blocks.clone(), &FilterConfig::default());
        let grouped = filter_and_group(blocks);
        assert!(grouped.len() <= filtered.len());
        assert_eq!(grouped.len(), 3);
    }

    #[test]
    fn output_text_preserves_reading_order() {
        let blocks = vec![
            block("Goodbye friend", 0, 300, 140, 330),
            block("World is near", 0, 35, 100, 65),
            block("Hello there", 0, 0, 100, 30),
        ];
        let joined = filter_and_group(blocks)
            .into_iter()
            .map(|block| block.text)
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(joined, "Hello there World is near Goodbye friend");
    }

    #[test]
    fn full_width_box_passes_through() {
        let wide = block("Hello World", i32::MIN, 0, i32::MAX, 50);
        assert_eq!(filter_and_group(vec![wide.clone()]), vec![wide]);
    }

    #[test]
    fn detected_text_accepts_camel_case_keys() {
        let json = r#"{
            "text": "Hello World",
            "textBlocks": [
                {"text": "Hello World", "boundingBox": {"left": 0, "top": 0, "right": 200, "bottom": 50}}
            ]
        }"#;
        let detected: DetectedText = serde_json::from_str(json).expect("parse detected text");
        assert_eq!(detected.text_blocks.len(), 1);
        assert!(detected.text_blocks[0].lines.is_empty());
        assert_eq!(detected.text_blocks[0].bounding_box.width(), 200);
    }
}
