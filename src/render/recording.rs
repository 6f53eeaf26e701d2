use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::core::Point;
use crate::foundation::error::{InkError, InkResult};
use crate::render::surface::{Paint, Surface, SurfaceFactory};

/// One recorded drawing call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCmd {
    /// Surface was cleared.
    Clear,
    /// [`Surface::stroke_line`].
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Stroke width.
        width: f64,
        /// Stroke paint.
        paint: Paint,
    },
    /// [`Surface::stroke_quad`].
    Quad {
        /// Start point.
        from: Point,
        /// Control point.
        ctrl: Point,
        /// End point.
        to: Point,
        /// Stroke width.
        width: f64,
        /// Stroke paint.
        paint: Paint,
    },
    /// [`Surface::fill_circle`].
    Circle {
        /// Disc center.
        center: Point,
        /// Disc radius.
        radius: f64,
        /// Fill paint.
        paint: Paint,
    },
}

type DisplayList = Rc<RefCell<Vec<DrawCmd>>>;

/// Surface that records a display list instead of rasterizing.
///
/// The list is shared with the [`RecordingSurfaceFactory`] that allocated it, so callers can
/// inspect drawing after the surface has been handed to a renderer.
#[derive(Debug)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    list: DisplayList,
    presents: Rc<RefCell<usize>>,
}

impl RecordingSurface {
    /// Standalone recording surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            list: DisplayList::default(),
            presents: Rc::default(),
        }
    }

    /// Every command recorded so far, including clears.
    pub fn commands(&self) -> Vec<DrawCmd> {
        self.list.borrow().clone()
    }

    fn record(&mut self, cmd: DrawCmd) {
        self.list.borrow_mut().push(cmd);
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.record(DrawCmd::Clear);
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, paint: &Paint) {
        self.record(DrawCmd::Line {
            from,
            to,
            width,
            paint: *paint,
        });
    }

    fn stroke_quad(&mut self, from: Point, ctrl: Point, to: Point, width: f64, paint: &Paint) {
        self.record(DrawCmd::Quad {
            from,
            ctrl,
            to,
            width,
            paint: *paint,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        self.record(DrawCmd::Circle {
            center,
            radius,
            paint: *paint,
        });
    }

    fn present(&mut self) {
        *self.presents.borrow_mut() += 1;
    }
}

/// Snapshot of one allocation made through a [`RecordingSurfaceFactory`].
#[derive(Clone, Debug)]
pub struct SurfaceRecord {
    /// Allocated width.
    pub width: u32,
    /// Allocated height.
    pub height: u32,
    list: DisplayList,
    presents: Rc<RefCell<usize>>,
}

impl SurfaceRecord {
    /// Every command recorded so far, including clears.
    pub fn commands(&self) -> Vec<DrawCmd> {
        self.list.borrow().clone()
    }

    /// Commands after the most recent clear: what is currently on the surface.
    pub fn visible(&self) -> Vec<DrawCmd> {
        let list = self.list.borrow();
        let start = list
            .iter()
            .rposition(|c| matches!(c, DrawCmd::Clear))
            .map_or(0, |i| i + 1);
        list[start..].to_vec()
    }

    /// How many times the surface was presented.
    pub fn presents(&self) -> usize {
        *self.presents.borrow()
    }
}

/// Allocates [`RecordingSurface`]s and keeps a handle to each display list.
///
/// Clones share state, so a test can keep one clone while the orchestrator owns another.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurfaceFactory {
    allocations: Rc<RefCell<Vec<SurfaceRecord>>>,
    max_side: Option<u32>,
}

impl RecordingSurfaceFactory {
    /// Factory without a size limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail allocations with either side larger than `max_side`.
    pub fn with_max_size(max_side: u32) -> Self {
        Self {
            max_side: Some(max_side),
            ..Self::default()
        }
    }

    /// Every successful allocation, in order.
    pub fn allocations(&self) -> Vec<SurfaceRecord> {
        self.allocations.borrow().clone()
    }
}

impl SurfaceFactory for RecordingSurfaceFactory {
    fn allocate(&mut self, width: u32, height: u32) -> InkResult<Box<dyn Surface>> {
        if width == 0 || height == 0 {
            return Err(InkError::surface(format!(
                "cannot allocate {width}x{height} surface with zero area"
            )));
        }
        if let Some(max) = self.max_side
            && (width > max || height > max)
        {
            return Err(InkError::surface(format!(
                "{width}x{height} exceeds the {max}px surface limit"
            )));
        }
        let surface = RecordingSurface::new(width, height);
        self.allocations.borrow_mut().push(SurfaceRecord {
            width,
            height,
            list: Rc::clone(&surface.list),
            presents: Rc::clone(&surface.presents),
        });
        Ok(Box::new(surface))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
