use tracing::debug;

use super::geom::{horizontal_gap, horizontal_overlap_ratio, union_bbox};
use super::{BoundingBox, TextBlock};

#[derive(Debug, Clone, PartialEq)]
pub struct GroupingConfig {
    /// Allowed vertical gap as a multiple of the mean height.
    pub vertical_gap_factor: f32,
    pub min_horizontal_overlap: f32,
    /// Allowed horizontal gap as a multiple of the mean width.
    pub horizontal_gap_factor: f32,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            vertical_gap_factor: 1.5,
            min_horizontal_overlap: 0.3,
            horizontal_gap_factor: 0.5,
        }
    }
}

/// Sorts blocks into reading order and merges each one into the running group
/// when it sits close enough below or beside it. Single pass: a closed group
/// is never reopened.
pub fn group_blocks(mut blocks: Vec<TextBlock>, config: &GroupingConfig) -> Vec<TextBlock> {
    blocks.sort_by_key(|block| (block.bounding_box.top, block.bounding_box.left));
    let input_len = blocks.len();

    let mut blocks = blocks.into_iter();
    let Some(first) = blocks.next() else {
        return Vec::new();
    };
    let mut grouped = Vec::new();
    let mut bounds = first.bounding_box;
    let mut current = vec![first];

    for block in blocks {
        if should_group(&bounds, &block.bounding_box, config) {
            bounds = union_bbox(&bounds, &block.bounding_box);
            current.push(block);
        } else {
            grouped.push(merge_group(std::mem::take(&mut current), bounds));
            bounds = block.bounding_box;
            current.push(block);
        }
    }
    grouped.push(merge_group(current, bounds));

    debug!("grouped {} OCR blocks into {}", input_len, grouped.len());
    grouped
}

fn should_group(group: &BoundingBox, candidate: &BoundingBox, config: &GroupingConfig) -> bool {
    let vertical_distance = (i64::from(candidate.top) - i64::from(group.bottom)) as f32;
    // Integer mean: an odd sum rounds down before scaling.
    let average_height = ((group.height() + candidate.height()) / 2) as f32;
    if vertical_distance >= average_height * config.vertical_gap_factor {
        return false;
    }
    horizontal_overlap_ratio(group, candidate) > config.min_horizontal_overlap
        || is_horizontally_close(group, candidate, config)
}

fn is_horizontally_close(a: &BoundingBox, b: &BoundingBox, config: &GroupingConfig) -> bool {
    let average_width = ((a.width() + b.width()) / 2) as f32;
    (horizontal_gap(a, b) as f32) < average_width * config.horizontal_gap_factor
}

fn merge_group(mut blocks: Vec<TextBlock>, bounds: BoundingBox) -> TextBlock {
    if blocks.len() == 1 {
        if let Some(block) = blocks.pop() {
            return block;
        }
    }
    let text = blocks
        .iter()
        .map(|block| block.text.trim())
        .collect::<Vec<_>>()
        .join(" ");
    let lines = blocks.into_iter().flat_map(|block| block.lines).collect();
    TextBlock {
        text,
        bounding_box: bounds,
        lines,
    }
}
