use std::f64::consts::TAU;

use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::{Rng64, quad_bezier};
use crate::render::primitive::Primitive;
use crate::render::surface::Paint;
use crate::strokes::{StrokeInput, StrokeLayout};

const CHUNKS_PER_LOOP: f64 = 1000.0;
const DRIFT_SMOOTHING: f64 = 0.05;
const MAX_DARKEN: f64 = 30.0;

/// Superellipse exponent: 2 is an ellipse, larger values approach a rectangle.
fn exponent(curve: f64) -> f64 {
    2.0 + (1.0 - curve.clamp(0.0, 1.0)) * 8.0
}

/// Unit superellipse point at parameter `t` in `[0, 1)`.
fn superellipse(t: f64, n: f64) -> Vec2 {
    let (s, c) = (t * TAU).sin_cos();
    let e = 2.0 / n;
    Vec2::new(c.signum() * c.abs().powf(e), s.signum() * s.abs().powf(e))
}

/// Thin, then thick, then settled, over overall loop progress.
fn thickness_factor(p: f64) -> f64 {
    if p < 0.5 {
        quad_bezier(p / 0.5, 0.2, 0.2, 1.2)
    } else {
        quad_bezier((p - 0.5) / 0.5, 1.2, 1.0, 1.0)
    }
}

fn wobble_offset(t: f64, wobble: f64, p: f64) -> Vec2 {
    let frequency = 2.0 + 4.0 * p;
    let amplitude = wobble * (0.5 + 1.5 * p);
    Vec2::new(
        (t * TAU * frequency).sin() * amplitude,
        ((t + 0.25) * TAU * frequency).cos() * amplitude,
    )
}

fn chunk_count(loops: f64) -> usize {
    (CHUNKS_PER_LOOP * loops).round().max(1.0) as usize
}

pub(crate) fn layout(input: &StrokeInput<'_>) -> StrokeLayout {
    let padding = input.width().max(input.height()) * 0.25;
    StrokeLayout::padded(input, padding, chunk_count(input.config.circle.loops))
}

/// Hand-drawn loop traced `circle.loops` times around the segment.
pub(crate) fn primitives(
    input: &StrokeInput<'_>,
    layout: &StrokeLayout,
    rng: &mut Rng64,
) -> Vec<Primitive> {
    let cfg = input.config;
    let opts = cfg.circle;
    let (w, h) = (input.width(), input.height());

    let padding = layout.horizontal_padding;
    let center = Point::new(w / 2.0 + padding, h / 2.0 + padding);
    let radius = Vec2::new(
        ((w / 2.0 + cfg.padding * h) * 0.9).max(0.0),
        (h / 2.0 * cfg.height * 0.9).max(0.0),
    );
    let n = exponent(opts.curve);

    let total = chunk_count(opts.loops);
    let max_drift = padding * 0.1;
    let mut drift = Vec2::ZERO;
    let mut radial_drift = 0.0;

    let points: Vec<Point> = (0..=total)
        .map(|i| {
            let t = (i as f64 / CHUNKS_PER_LOOP).fract();
            let p = i as f64 / total as f64;

            let target = Vec2::new(rng.centered(), rng.centered()) * max_drift;
            drift += (target - drift) * DRIFT_SMOOTHING;
            radial_drift += (rng.centered() * max_drift - radial_drift) * DRIFT_SMOOTHING;

            let unit = superellipse(t, n);
            let base = Vec2::new(unit.x * radius.x, unit.y * radius.y);
            let radial = if unit.hypot() > 0.0 {
                unit.normalize() * radial_drift
            } else {
                Vec2::ZERO
            };
            center + base + radial + drift + wobble_offset(t, opts.wobble, p)
        })
        .collect();

    points
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let p = (i + 1) as f64 / total as f64;
            Primitive::Line {
                from: pair[0],
                to: pair[1],
                width: opts.thickness * thickness_factor(p),
                paint: Paint::Solid(input.color.darken(p * MAX_DARKEN)),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/strokes/outline.rs"]
mod tests;
