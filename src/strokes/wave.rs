use std::f64::consts::TAU;

use crate::foundation::core::{Point, Size};
use crate::foundation::math::{Rng64, map_range};
use crate::render::primitive::Primitive;
use crate::render::surface::Paint;
use crate::strokes::{StrokeInput, StrokeLayout};

const SUB_SEGMENTS: usize = 100;
const LINE_HEIGHT: f64 = 1.0;
const STROKE_WIDTH: f64 = LINE_HEIGHT * 2.0;
const GRADIENT_SPREAD: f64 = 10.0;
const PAINTERLY_SPREAD: f64 = 10.0;
/// Fray multiplier on edges where the text continues.
const CONTINUING_FRAY: f64 = 0.1;

struct Row {
    points: Vec<Point>,
    paint: Paint,
}

/// Band measurements shared by sizing and geometry.
struct Band {
    padding: f64,
    height: f64,
    line_count: usize,
    amplitude: f64,
    v_pad: f64,
    span: f64,
}

impl Band {
    fn measure(input: &StrokeInput<'_>) -> Self {
        let cfg = input.config;
        let (w, h) = (input.width(), input.height());
        let padding = cfg.padding * h;
        let height = cfg.effective_height(h).max(0.0);
        let amplitude = cfg.amplitude * h / 10.0;
        Self {
            padding,
            height,
            line_count: (height / LINE_HEIGHT).ceil() as usize,
            amplitude,
            v_pad: (amplitude * (1.0 + cfg.highlight.jitter) + STROKE_WIDTH).max(0.2 * h),
            span: (w + 2.0 * padding).max(0.0),
        }
    }
}

/// One row per pixel of the band, each cut into `SUB_SEGMENTS` lines.
pub(crate) fn layout(input: &StrokeInput<'_>) -> StrokeLayout {
    let band = Band::measure(input);
    StrokeLayout {
        canvas: Size::new(band.span + STROKE_WIDTH, band.height + 2.0 * band.v_pad),
        vertical_offset: band.v_pad - (input.height() - band.height) / 2.0,
        horizontal_padding: band.padding + STROKE_WIDTH / 2.0,
        primitive_count: band.line_count.saturating_mul(SUB_SEGMENTS),
    }
}

/// Marker-pen highlight: one wavy line per pixel row of the highlighted band.
pub(crate) fn primitives(input: &StrokeInput<'_>, rng: &mut Rng64) -> Vec<Primitive> {
    let cfg = input.config;
    let h = input.height();
    let Band {
        line_count,
        amplitude,
        v_pad,
        span,
        ..
    } = Band::measure(input);

    let fray = 4.0 * cfg.highlight.rough_ends;
    let wavelength = cfg.wavelength * h;
    let jitter = cfg.highlight.jitter;
    let margin = STROKE_WIDTH / 2.0;

    let before = if input.segment.continues_before {
        CONTINUING_FRAY
    } else {
        1.0
    };
    let after = if input.segment.continues_after {
        CONTINUING_FRAY
    } else {
        1.0
    };

    let rows: Vec<Row> = (0..line_count)
        .map(|line| {
            let painterly = rng.next_f64_01() * PAINTERLY_SPREAD;
            let amp = amplitude * (1.0 + jitter * 2.0 * rng.centered());
            let start_x = margin + fray * before * rng.next_f64_01();
            let end_x = margin + span - fray * after * rng.next_f64_01();
            let y = v_pad + line as f64 * LINE_HEIGHT + LINE_HEIGHT / 2.0;

            let points = (0..=SUB_SEGMENTS)
                .map(|i| {
                    let x = start_x + (end_x - start_x) * i as f64 / SUB_SEGMENTS as f64;
                    let phase = if wavelength > 0.0 {
                        (x - start_x) / wavelength
                    } else {
                        0.0
                    };
                    Point::new(x, y + (phase * TAU).sin() * amp)
                })
                .collect();

            let v = map_range(line as f64, 0.0, line_count as f64, 0.0, GRADIENT_SPREAD) + painterly;
            let paint = Paint::LinearGradient {
                start: Point::new(margin, y),
                end: Point::new(margin + span, y),
                from: input.color.lighten(v),
                to: input.color.darken(v),
            };
            Row { points, paint }
        })
        .collect();

    // Column-major so every row advances left to right together.
    let mut primitives = Vec::with_capacity(rows.len() * SUB_SEGMENTS);
    for i in 0..SUB_SEGMENTS {
        for row in &rows {
            primitives.push(Primitive::Line {
                from: row.points[i],
                to: row.points[i + 1],
                width: STROKE_WIDTH,
                paint: row.paint,
            });
        }
    }

    primitives
}

#[cfg(test)]
#[path = "../../tests/unit/strokes/wave.rs"]
mod tests;
