use smallvec::SmallVec;

use crate::foundation::color::Color;
use crate::foundation::core::{Point, Rect};
use crate::render::surface::{Paint, Surface};

/// Filled disc belonging to a [`Primitive::Dots`] cluster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Dot {
    pub(crate) center: Point,
    pub(crate) radius: f64,
    pub(crate) color: Color,
}

/// Smallest unit of progressive reveal. A renderer's geometry is an ordered list of these.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Primitive {
    Line {
        from: Point,
        to: Point,
        width: f64,
        paint: Paint,
    },
    Quad {
        from: Point,
        ctrl: Point,
        to: Point,
        width: f64,
        paint: Paint,
    },
    Dots(SmallVec<[Dot; 3]>),
}

impl Primitive {
    pub(crate) fn paint_onto(&self, surface: &mut dyn Surface) {
        match self {
            Self::Line {
                from,
                to,
                width,
                paint,
            } => surface.stroke_line(*from, *to, *width, paint),
            Self::Quad {
                from,
                ctrl,
                to,
                width,
                paint,
            } => surface.stroke_quad(*from, *ctrl, *to, *width, paint),
            Self::Dots(dots) => {
                for d in dots {
                    surface.fill_circle(d.center, d.radius, &Paint::Solid(d.color));
                }
            }
        }
    }

    /// Conservative box covering everything this primitive paints.
    pub(crate) fn extent(&self) -> Rect {
        match self {
            Self::Line {
                from, to, width, ..
            } => Rect::from_points(*from, *to).inflate(width / 2.0, width / 2.0),
            Self::Quad {
                from,
                ctrl,
                to,
                width,
                ..
            } => Rect::from_points(*from, *to)
                .union_pt(*ctrl)
                .inflate(width / 2.0, width / 2.0),
            Self::Dots(dots) => dots
                .iter()
                .map(|d| Rect::from_center_size(d.center, (2.0 * d.radius, 2.0 * d.radius)))
                .reduce(|a, b| a.union(b))
                .unwrap_or(Rect::ZERO),
        }
    }
}
