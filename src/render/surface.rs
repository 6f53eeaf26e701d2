use crate::foundation::color::Color;
use crate::foundation::core::Point;
use crate::foundation::error::InkResult;

/// How a stroke or fill is colored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    /// Single color.
    Solid(Color),
    /// Two-stop linear gradient between `start` and `end` in surface coordinates.
    LinearGradient {
        /// Point where `from` applies.
        start: Point,
        /// Point where `to` applies.
        end: Point,
        /// Color at `start`.
        from: Color,
        /// Color at `end`.
        to: Color,
    },
}

impl Paint {
    /// Color of this paint at `p`. Gradients clamp outside their axis.
    pub fn color_at(&self, p: Point) -> Color {
        match *self {
            Self::Solid(c) => c,
            Self::LinearGradient {
                start,
                end,
                from,
                to,
            } => {
                let axis = end - start;
                let len2 = axis.hypot2();
                if len2 <= f64::EPSILON {
                    return from;
                }
                let t = ((p - start).dot(axis) / len2).clamp(0.0, 1.0);
                from.lerp(to, t)
            }
        }
    }
}

/// Drawing target for one segment's overlay element.
///
/// Coordinates are surface pixels with the origin at the top-left corner. Drawing calls may be
/// buffered until [`Surface::present`].
pub trait Surface {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Stroke a straight line with round caps.
    fn stroke_line(&mut self, from: Point, to: Point, width: f64, paint: &Paint);

    /// Stroke a quadratic Bezier curve with round caps.
    fn stroke_quad(&mut self, from: Point, ctrl: Point, to: Point, width: f64, paint: &Paint);

    /// Fill a disc.
    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint);

    /// Make buffered drawing visible.
    fn present(&mut self) {}

    /// Straight-alpha RGBA8 pixels, for raster surfaces.
    fn read_rgba8(&self) -> Option<Vec<u8>> {
        None
    }
}

/// Allocates drawing surfaces for overlay elements.
pub trait SurfaceFactory {
    /// Allocate a transparent `width` x `height` surface.
    ///
    /// Failure is a [`crate::InkError::Surface`] and aborts the requesting segment.
    fn allocate(&mut self, width: u32, height: u32) -> InkResult<Box<dyn Surface>>;
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
