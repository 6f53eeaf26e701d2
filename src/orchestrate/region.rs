use std::collections::{HashMap, HashSet};

use crate::config::EffectiveConfig;
use crate::foundation::core::{Point, Rect, Segment, Size, Vec2};
use crate::foundation::ids::RegionKey;
use crate::render::Bounds;

/// Build one segment per measured line box.
///
/// The first segment's leading edge and the last segment's trailing edge take the provider's
/// flags; edges created by wrapping inside the region always continue.
pub(crate) fn segments_for(boxes: &[Rect], before: bool, after: bool) -> Vec<Segment> {
    let last = boxes.len().saturating_sub(1);
    boxes
        .iter()
        .enumerate()
        .map(|(i, b)| {
            Segment::new(*b).with_continuation(
                if i == 0 { before } else { true },
                if i == last { after } else { true },
            )
        })
        .collect()
}

/// Number of annotated regions on the parent chain of `key`, itself included.
///
/// Parents that are not among `parents` end the walk. A cycle ends it at the first repeat.
pub(crate) fn nesting_depth(key: &RegionKey, parents: &HashMap<RegionKey, Option<RegionKey>>) -> usize {
    let mut depth = 1;
    let mut seen = HashSet::from([key]);
    let mut current = parents.get(key).and_then(Option::as_ref);
    while let Some(parent) = current {
        if !parents.contains_key(parent) || !seen.insert(parent) {
            break;
        }
        depth += 1;
        current = parents.get(parent).and_then(Option::as_ref);
    }
    depth
}

/// Stacking order for a region at `depth`.
pub fn z_index_for_depth(depth: usize) -> i32 {
    if depth <= 1 {
        1
    } else {
        1000_i32.saturating_add(i32::try_from(depth).unwrap_or(i32::MAX))
    }
}

/// Overlay rectangle for a segment whose renderer reported `bounds`.
pub(crate) fn placement(segment: &Segment, bounds: &Bounds, config: &EffectiveConfig) -> (Point, Size) {
    let b = segment.bounds;
    let h = b.height();
    let top = b.y0 - bounds.vertical_offset - 0.1 * h + config.offset * h / 2.0;
    let left = b.x0 - bounds.horizontal_padding;
    (
        Point::new(left, top),
        Size::new(f64::from(bounds.width), h.max(bounds.total_height)),
    )
}

pub(crate) fn skew_for(segment: &Segment, config: &EffectiveConfig) -> Vec2 {
    let h = segment.height();
    Vec2::new(config.skew_x * h, config.skew_y * h)
}

#[cfg(test)]
#[path = "../../tests/unit/orchestrate/region.rs"]
mod tests;
