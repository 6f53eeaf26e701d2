use crate::config::EffectiveConfig;
use crate::foundation::color::Color;
use crate::foundation::core::{Point, Rect, Segment};
use crate::foundation::error::{InkError, InkResult};
use crate::foundation::math::Rng64;
use crate::render::primitive::Primitive;
use crate::render::surface::{Surface, SurfaceFactory};
use crate::strokes::{self, StrokeInput};

/// Upper bound on the primitives one renderer may generate.
const MAX_PRIMITIVES: usize = 500_000;

/// Placement data returned by [`Renderer::set_bounds`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    /// Allocated surface width in pixels.
    pub width: u32,
    /// Full height of the drawing area, including overflow.
    pub total_height: f64,
    /// Distance from the surface top to the segment box top.
    pub vertical_offset: f64,
    /// Distance from the surface left to the segment box left.
    pub horizontal_padding: f64,
}

/// Lifecycle of one renderer within a generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum RevealState {
    /// Built, nothing painted yet.
    #[default]
    Idle,
    /// Ticks are advancing progress.
    Animating,
    /// Everything painted.
    Completed,
}

/// Procedural stroke for one segment, revealed progressively.
///
/// Geometry is generated once by [`Renderer::set_bounds`] as an ordered list of primitives;
/// [`Renderer::step`] paints index ranges of that list and never paints an index twice.
pub struct Renderer {
    config: EffectiveConfig,
    color: Color,
    segment: Segment,
    seed: u64,
    surface: Option<Box<dyn Surface>>,
    bounds: Option<Bounds>,
    primitives: Vec<Primitive>,
    painted: Vec<bool>,
    progress: f64,
    state: RevealState,
    started_at: Option<f64>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("mode", &self.config.drawing_mode)
            .field("segment", &self.segment)
            .field("bounds", &self.bounds)
            .field("primitives", &self.primitives.len())
            .field("progress", &self.progress)
            .field("state", &self.state)
            .finish()
    }
}

impl Renderer {
    /// Build a renderer for `segment`. `seed` selects the random stream used for geometry.
    pub fn new(
        config: EffectiveConfig,
        color: Color,
        segment: Segment,
        seed: u64,
    ) -> InkResult<Self> {
        segment.validate()?;
        Ok(Self {
            config,
            color,
            segment,
            seed,
            surface: None,
            bounds: None,
            primitives: Vec::new(),
            painted: Vec::new(),
            progress: 0.0,
            state: RevealState::Idle,
            started_at: None,
        })
    }

    /// Allocate the surface and generate all static geometry. Must be called exactly once.
    ///
    /// Sizing is computed in closed form first; geometry is only generated once the surface
    /// exists, so an oversized segment fails before any primitive is built.
    pub fn set_bounds(&mut self, factory: &mut dyn SurfaceFactory) -> InkResult<Bounds> {
        if self.surface.is_some() {
            return Err(InkError::lifecycle("set_bounds called twice"));
        }

        let input = StrokeInput {
            segment: &self.segment,
            config: &self.config,
            color: self.color,
        };
        let mode = self.config.drawing_mode;
        let layout = strokes::layout(mode, &input);
        if layout.primitive_count > MAX_PRIMITIVES {
            return Err(InkError::construction(format!(
                "{} stroke needs {} primitives, limit is {MAX_PRIMITIVES}",
                mode.name(),
                layout.primitive_count
            )));
        }

        let width = pixel_extent(layout.canvas.width);
        let height = pixel_extent(layout.canvas.height);
        let surface = factory.allocate(width, height)?;

        let primitives = strokes::primitives(mode, &input, &layout, &mut Rng64::new(self.seed));
        let canvas = Rect::from_origin_size(Point::ZERO, layout.canvas);
        let overflow = primitives
            .iter()
            .filter(|p| !inside(canvas, p.extent()))
            .count();
        if overflow > 0 {
            tracing::debug!(overflow, "primitives extend past the canvas and will be clipped");
        }

        let bounds = Bounds {
            width: surface.width(),
            total_height: layout.canvas.height,
            vertical_offset: layout.vertical_offset,
            horizontal_padding: layout.horizontal_padding,
        };
        self.painted = vec![false; primitives.len()];
        self.primitives = primitives;
        self.surface = Some(surface);
        self.bounds = Some(bounds);
        tracing::debug!(
            mode = self.config.drawing_mode.name(),
            width,
            height,
            primitives = self.primitives.len(),
            "renderer bounds set"
        );
        Ok(bounds)
    }

    /// Paint primitives `[floor(from * N), ceil(to * N))` that are not painted yet.
    pub fn step(&mut self, from: f64, to: f64) -> InkResult<()> {
        let surface = self
            .surface
            .as_deref_mut()
            .ok_or_else(|| InkError::lifecycle("step called before set_bounds"))?;

        let from = clamp_progress(from);
        let to = clamp_progress(to);
        let n = self.primitives.len();
        let start = (from * n as f64).floor() as usize;
        let end = ((to * n as f64).ceil() as usize).min(n);

        let mut painted_any = false;
        for i in start..end {
            if self.painted[i] {
                continue;
            }
            self.primitives[i].paint_onto(surface);
            self.painted[i] = true;
            painted_any = true;
        }
        if painted_any {
            surface.present();
        }

        self.progress = self.progress.max(to);
        Ok(())
    }

    /// Begin the reveal. With `skip`, or when already completed, paint everything at once.
    pub fn start_animation(&mut self, skip: bool) -> InkResult<()> {
        if skip || self.state == RevealState::Completed {
            self.step(0.0, 1.0)?;
            self.finish();
            return Ok(());
        }
        if self.state == RevealState::Idle {
            self.state = RevealState::Animating;
            self.started_at = None;
        }
        Ok(())
    }

    /// Per-tick driver. Returns `true` while more ticks are needed.
    pub fn advance(&mut self, now_ms: f64) -> InkResult<bool> {
        if self.state != RevealState::Animating {
            return Ok(false);
        }
        let start = *self.started_at.get_or_insert(now_ms);
        let raw = ((now_ms - start).max(0.0) / self.config.animation_speed).min(1.0);
        let target = self.config.easing.apply(raw);

        if target > self.progress {
            let from = self.progress;
            self.step(from, target)?;
        }
        if raw >= 1.0 {
            self.finish();
            return Ok(false);
        }
        Ok(true)
    }

    /// Clear the surface and paint the complete geometry again.
    pub fn redraw_full(&mut self) -> InkResult<()> {
        let surface = self
            .surface
            .as_deref_mut()
            .ok_or_else(|| InkError::lifecycle("redraw_full called before set_bounds"))?;
        surface.clear();
        self.painted.fill(false);
        self.step(0.0, 1.0)?;
        self.finish();
        Ok(())
    }

    /// Reset to `Idle` with nothing painted so the reveal can run again on the same geometry.
    pub fn rearm(&mut self) {
        if let Some(surface) = self.surface.as_deref_mut() {
            surface.clear();
            surface.present();
        }
        self.painted.fill(false);
        self.progress = 0.0;
        self.state = RevealState::Idle;
        self.started_at = None;
    }

    fn finish(&mut self) {
        self.progress = 1.0;
        self.state = RevealState::Completed;
        self.started_at = None;
    }

    /// Painted fraction in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Ticks are advancing progress.
    pub fn is_animating(&self) -> bool {
        self.state == RevealState::Animating
    }

    /// Everything is painted.
    pub fn is_completed(&self) -> bool {
        self.state == RevealState::Completed
    }

    /// `None` until [`Renderer::set_bounds`] succeeded.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Segment this renderer draws.
    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    /// Configuration the geometry was built from.
    pub fn config(&self) -> &EffectiveConfig {
        &self.config
    }

    /// Number of primitives in the precomputed geometry.
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    /// Number of primitives currently painted.
    pub fn painted_count(&self) -> usize {
        self.painted.iter().filter(|p| **p).count()
    }

    /// Drawing surface, once bounds are set.
    pub fn surface(&self) -> Option<&dyn Surface> {
        self.surface.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }
}

fn clamp_progress(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

fn inside(outer: Rect, inner: Rect) -> bool {
    inner.x0 >= outer.x0 && inner.y0 >= outer.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}

fn pixel_extent(v: f64) -> u32 {
    if v.is_finite() && v > 1.0 {
        v.ceil().min(f64::from(u32::MAX)) as u32
    } else {
        1
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
