use crate::foundation::error::{InkError, InkResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// One visual line of a region: its bounding box plus continuation flags.
///
/// `continues_before` / `continues_after` say whether the region's content visually extends past
/// the leading / trailing edge. Strokes fray less on continuing edges.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    /// Box in host layout coordinates.
    pub bounds: Rect,
    /// Content continues past the leading edge.
    pub continues_before: bool,
    /// Content continues past the trailing edge.
    pub continues_after: bool,
}

impl Segment {
    /// Segment with both edges treated as true boundaries.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            continues_before: false,
            continues_after: false,
        }
    }

    /// Build from `{left, top, width, height}` as reported by layout measurement.
    pub fn from_ltwh(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::new(Rect::new(left, top, left + width, top + height))
    }

    /// Replace the continuation flags.
    pub fn with_continuation(mut self, before: bool, after: bool) -> Self {
        self.continues_before = before;
        self.continues_after = after;
        self
    }

    /// Box width.
    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    /// Box height.
    pub fn height(&self) -> f64 {
        self.bounds.height()
    }

    /// Reject boxes that cannot carry geometry (non-finite or inverted).
    pub fn validate(&self) -> InkResult<()> {
        let r = self.bounds;
        if ![r.x0, r.y0, r.x1, r.y1].iter().all(|v| v.is_finite()) {
            return Err(InkError::construction("segment box must be finite"));
        }
        if r.x1 < r.x0 || r.y1 < r.y0 {
            return Err(InkError::construction(
                "segment box must have non-negative width and height",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
