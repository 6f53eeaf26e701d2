use crate::foundation::core::Point;
use crate::foundation::math::Rng64;
use crate::render::primitive::Primitive;
use crate::render::surface::Paint;
use crate::strokes::{StrokeInput, StrokeLayout};

const LINE_COUNT: usize = 3;
const PIECES_PER_LINE: usize = 10;

pub(crate) fn layout(input: &StrokeInput<'_>) -> StrokeLayout {
    StrokeLayout::padded(input, input.height() * 0.5, LINE_COUNT * PIECES_PER_LINE)
}

/// Three loose parallel scribble lines across the segment.
pub(crate) fn primitives(
    input: &StrokeInput<'_>,
    layout: &StrokeLayout,
    rng: &mut Rng64,
) -> Vec<Primitive> {
    let (w, h) = (input.width(), input.height());
    let padding = layout.horizontal_padding;
    let line_width = h * 0.1;
    let spacing = line_width * 1.5;
    let step = w / PIECES_PER_LINE as f64;
    let paint = Paint::LinearGradient {
        start: Point::new(padding, 0.0),
        end: Point::new(padding + w, 0.0),
        from: input.color.lighten(10.0),
        to: input.color,
    };

    let lines: Vec<Vec<Primitive>> = (0..LINE_COUNT)
        .map(|line| {
            let baseline = padding + h / 2.0 + (line as f64 - 1.0) * spacing;
            let mut last = Point::new(padding, baseline);
            (0..PIECES_PER_LINE)
                .map(|k| {
                    let x = padding + (k + 1) as f64 * step;
                    let to = Point::new(x, baseline + rng.centered() * h * 0.8);
                    let ctrl = Point::new(x - step / 2.0, baseline + rng.centered() * h * 0.8);
                    let piece = Primitive::Quad {
                        from: last,
                        ctrl,
                        to,
                        width: line_width,
                        paint,
                    };
                    last = to;
                    piece
                })
                .collect()
        })
        .collect();

    let mut primitives = Vec::with_capacity(LINE_COUNT * PIECES_PER_LINE);
    for k in 0..PIECES_PER_LINE {
        for line in &lines {
            primitives.push(line[k].clone());
        }
    }

    primitives
}

#[cfg(test)]
#[path = "../../tests/unit/strokes/scribble.rs"]
mod tests;
