//! Geometry generators for the five stroke variants.
//!
//! Each generator turns a segment box, an effective configuration and a base color into an
//! ordered primitive list in surface coordinates. All randomness comes from the caller's
//! [`Rng64`], so equal seeds give equal geometry.

pub(crate) mod burst;
pub(crate) mod outline;
pub(crate) mod scribble;
pub(crate) mod sketch;
pub(crate) mod wave;

use crate::config::{DrawingMode, EffectiveConfig};
use crate::foundation::color::Color;
use crate::foundation::core::{Segment, Size};
use crate::foundation::math::Rng64;
use crate::render::primitive::Primitive;

pub(crate) struct StrokeInput<'a> {
    pub(crate) segment: &'a Segment,
    pub(crate) config: &'a EffectiveConfig,
    pub(crate) color: Color,
}

impl StrokeInput<'_> {
    fn width(&self) -> f64 {
        self.segment.width()
    }

    fn height(&self) -> f64 {
        self.segment.height()
    }
}

/// Canvas size and segment placement of one renderer, known before any geometry exists.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct StrokeLayout {
    pub(crate) canvas: Size,
    /// Offset from the canvas top to the segment box top.
    pub(crate) vertical_offset: f64,
    /// Offset from the canvas left to the segment box left.
    pub(crate) horizontal_padding: f64,
    /// Number of primitives the geometry pass will emit.
    pub(crate) primitive_count: usize,
}

impl StrokeLayout {
    /// Canvas with `padding` on every side of the segment box.
    fn padded(input: &StrokeInput<'_>, padding: f64, primitive_count: usize) -> Self {
        Self {
            canvas: Size::new(
                input.width() + 2.0 * padding,
                input.height() + 2.0 * padding,
            ),
            vertical_offset: padding,
            horizontal_padding: padding,
            primitive_count,
        }
    }
}

/// Closed-form sizing for `mode`. Draws no randomness and builds no geometry.
pub(crate) fn layout(mode: DrawingMode, input: &StrokeInput<'_>) -> StrokeLayout {
    match mode {
        DrawingMode::Highlight => wave::layout(input),
        DrawingMode::Circle => outline::layout(input),
        DrawingMode::Burst => burst::layout(input),
        DrawingMode::Scribble => scribble::layout(input),
        DrawingMode::Sketchout => sketch::layout(input),
    }
}

/// Mode-keyed geometry factory, placed on the canvas described by `layout`.
pub(crate) fn primitives(
    mode: DrawingMode,
    input: &StrokeInput<'_>,
    layout: &StrokeLayout,
    rng: &mut Rng64,
) -> Vec<Primitive> {
    match mode {
        DrawingMode::Highlight => wave::primitives(input, rng),
        DrawingMode::Circle => outline::primitives(input, layout, rng),
        DrawingMode::Burst => burst::primitives(input, layout, rng),
        DrawingMode::Scribble => scribble::primitives(input, layout, rng),
        DrawingMode::Sketchout => sketch::primitives(input, layout, rng),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/strokes/mod.rs"]
mod tests;
