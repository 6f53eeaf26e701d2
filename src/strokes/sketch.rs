use crate::foundation::core::Point;
use crate::foundation::math::Rng64;
use crate::render::primitive::Primitive;
use crate::render::surface::Paint;
use crate::strokes::{StrokeInput, StrokeLayout};

const PIECES_PER_EDGE: usize = 8;
const STROKE_WIDTH: f64 = 2.0;

pub(crate) fn layout(input: &StrokeInput<'_>) -> StrokeLayout {
    StrokeLayout::padded(input, input.height() * 0.5, 4 * PIECES_PER_EDGE)
}

/// Hand-drawn rectangle around the segment box.
pub(crate) fn primitives(
    input: &StrokeInput<'_>,
    layout: &StrokeLayout,
    rng: &mut Rng64,
) -> Vec<Primitive> {
    let (w, h) = (input.width(), input.height());
    let padding = layout.horizontal_padding;
    let wobble = (h * 0.08).min(3.0);

    let corners = [
        Point::new(padding, padding),
        Point::new(padding + w, padding),
        Point::new(padding + w, padding + h),
        Point::new(padding, padding + h),
    ];

    let mut outline = Vec::with_capacity(4 * PIECES_PER_EDGE + 1);
    for edge in 0..4 {
        let (a, b) = (corners[edge], corners[(edge + 1) % 4]);
        for k in 0..PIECES_PER_EDGE {
            let t = k as f64 / PIECES_PER_EDGE as f64;
            let p = a.lerp(b, t);
            outline.push(Point::new(
                p.x + rng.centered() * wobble,
                p.y + rng.centered() * wobble,
            ));
        }
    }
    if let Some(&first) = outline.first() {
        outline.push(first);
    }

    let paint = Paint::Solid(input.color);
    outline
        .windows(2)
        .map(|pair| Primitive::Line {
            from: pair[0],
            to: pair[1],
            width: STROKE_WIDTH,
            paint,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/strokes/sketch.rs"]
mod tests;
