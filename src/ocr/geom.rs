use super::BoundingBox;

pub(super) fn is_well_formed(bbox: &BoundingBox) -> bool {
    bbox.left <= bbox.right && bbox.top <= bbox.bottom
}

/// Shared horizontal span divided by the narrower width; 0 when either box
/// has no width.
pub(super) fn horizontal_overlap_ratio(a: &BoundingBox, b: &BoundingBox) -> f32 {
    let ix1 = i64::from(a.left.max(b.left));
    let ix2 = i64::from(a.right.min(b.right));
    if ix2 <= ix1 {
        return 0.0;
    }
    let min_width = a.width().min(b.width());
    if min_width <= 0 {
        return 0.0;
    }
    (ix2 - ix1) as f32 / min_width as f32
}

/// Empty horizontal space between two boxes, 0 when their spans touch.
pub(super) fn horizontal_gap(a: &BoundingBox, b: &BoundingBox) -> i64 {
    if a.right < b.left {
        i64::from(b.left) - i64::from(a.right)
    } else if b.right < a.left {
        i64::from(a.left) - i64::from(b.right)
    } else {
        0
    }
}

pub(super) fn union_bbox(a: &BoundingBox, b: &BoundingBox) -> BoundingBox {
    BoundingBox {
        left: a.left.min(b.left),
        top: a.top.min(b.top),
        right: a.right.max(b.right),
        bottom: a.bottom.max(b.bottom),
    }
}
