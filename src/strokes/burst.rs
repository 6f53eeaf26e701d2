use std::f64::consts::{FRAC_PI_2, PI, TAU};

use smallvec::SmallVec;

use crate::config::BurstStyle;
use crate::foundation::color::Color;
use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::Rng64;
use crate::render::primitive::{Dot, Primitive};
use crate::render::surface::Paint;
use crate::strokes::{StrokeInput, StrokeLayout};

const CLUSTER_STEPS: [f64; 3] = [0.4, 0.6, 0.8];

fn ray_color(base: Color, rng: &mut Rng64) -> Color {
    let amount = 20.0 * rng.next_f64_01();
    if rng.coin() {
        base.lighten(amount)
    } else {
        base.darken(amount)
    }
}

pub(crate) fn layout(input: &StrokeInput<'_>) -> StrokeLayout {
    let opts = input.config.burst;
    let h = input.height();
    let padding = h * (1.3 * opts.power).max(1.5) + opts.gap * h + 4.0;
    StrokeLayout::padded(input, padding, opts.count.max(1))
}

/// Rays or dot clusters spread around the segment's elliptical perimeter.
pub(crate) fn primitives(
    input: &StrokeInput<'_>,
    layout: &StrokeLayout,
    rng: &mut Rng64,
) -> Vec<Primitive> {
    let opts = input.config.burst;
    let (w, h) = (input.width(), input.height());

    let gap = opts.gap * h;
    let padding = layout.horizontal_padding;
    let center = Point::new(w / 2.0 + padding, h / 2.0 + padding);
    let base_len = h * opts.power;
    let count = opts.count.max(1);

    (0..count)
        .map(|i| {
            let angle = TAU * i as f64 / count as f64 + rng.centered() * opts.randomness * PI;
            let length = base_len * rng.range(0.7, 1.3);
            let dir = Vec2::from_angle(angle);
            let start = center + Vec2::new(w / 2.0 * dir.x, h / 2.0 * dir.y) + dir * gap;
            let end = start + dir * length;

            match opts.style {
                BurstStyle::Lines => Primitive::Line {
                    from: start,
                    to: end,
                    width: rng.range(1.0, 4.0),
                    paint: Paint::Solid(ray_color(input.color, rng)),
                },
                BurstStyle::Burst => {
                    let span = end - start;
                    let ctrl = start.midpoint(end)
                        + Vec2::new(rng.centered() * span.x, rng.centered() * span.y) * 0.5;
                    Primitive::Quad {
                        from: start,
                        ctrl,
                        to: end,
                        width: rng.range(1.0, 4.0),
                        paint: Paint::Solid(ray_color(input.color, rng)),
                    }
                }
                BurstStyle::Curve => Primitive::Quad {
                    from: start,
                    ctrl: start + Vec2::from_angle(angle + FRAC_PI_2) * (length * 0.5),
                    to: end,
                    width: rng.range(1.0, 4.0),
                    paint: Paint::Solid(ray_color(input.color, rng)),
                },
                BurstStyle::Cloud => {
                    let radius = (length * 0.15).max(0.5);
                    let dots: SmallVec<[Dot; 3]> = CLUSTER_STEPS
                        .iter()
                        .enumerate()
                        .map(|(k, step)| {
                            let scatter = Vec2::new(rng.centered(), rng.centered()) * radius;
                            Dot {
                                center: start + dir * (length * step) + scatter,
                                radius: radius * (1.0 - 0.2 * k as f64),
                                color: input.color.lighten(rng.range(30.0, 50.0)),
                            }
                        })
                        .collect();
                    Primitive::Dots(dots)
                }
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/strokes/burst.rs"]
mod tests;
