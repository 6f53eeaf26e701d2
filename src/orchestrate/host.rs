//! Environment bindings the orchestrator drives. A host (a document view, a terminal UI, a
//! headless test harness) implements these traits and forwards its callbacks to
//! [`crate::RegionOrchestrator`].

use crate::config::OptionMap;
use crate::foundation::core::{Point, Rect, Size, Vec2};
use crate::foundation::ids::{ElementId, RegionKey, SegmentRef, SubscriptionId, TickHandle};
use crate::render::SurfaceFactory;

/// One annotated region as reported by a [`RegionSource`].
#[derive(Clone, Debug, PartialEq)]
pub struct RegionInfo {
    /// Stable key, unique within one scan.
    pub key: RegionKey,
    /// Enclosing annotated region, if any.
    pub parent: Option<RegionKey>,
    /// Named style from the [`crate::StyleRegistry`].
    pub style: Option<String>,
    /// Raw per-region option overrides.
    pub overrides: OptionMap,
    /// Base color string, e.g. `#ffd54f` or `rgb(255, 213, 79)`.
    pub color: String,
}

impl RegionInfo {
    /// Top-level region with no style and no overrides.
    pub fn new(key: impl Into<RegionKey>, color: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            parent: None,
            style: None,
            overrides: OptionMap::new(),
            color: color.into(),
        }
    }

    /// Nest inside the region keyed `parent`.
    pub fn with_parent(mut self, parent: impl Into<RegionKey>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Apply a named style.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Replace the per-region overrides.
    pub fn with_overrides(mut self, overrides: OptionMap) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Discovers annotated regions.
pub trait RegionSource {
    /// Current regions in document order.
    fn scan(&mut self) -> Vec<RegionInfo>;
}

/// Layout measurement.
pub trait GeometryProvider {
    /// One box per visual line, in order. Empty when the region is not laid out.
    fn measure(&self, region: &RegionKey) -> Vec<Rect>;

    /// Content visually continues before the region's first line.
    fn continues_before(&self, region: &RegionKey) -> bool;

    /// Content visually continues after the region's last line.
    fn continues_after(&self, region: &RegionKey) -> bool;
}

/// Viewport intersection detection.
///
/// Intersections are reported back through [`crate::RegionOrchestrator::on_visibility`].
pub trait VisibilityObserver {
    /// Report `element` once its intersection ratio reaches `threshold`.
    fn watch(&mut self, element: ElementId, threshold: f64);

    /// Stop reporting `element`. Unknown elements are ignored.
    fn unwatch(&mut self, element: ElementId);

    /// The whole element is inside the viewport right now.
    fn is_fully_visible(&self, element: ElementId) -> bool;
}

/// One-shot per-frame callbacks.
///
/// Fired ticks are delivered through [`crate::RegionOrchestrator::on_tick`].
pub trait FrameScheduler {
    /// Request a callback before the next paint.
    fn request_tick(&mut self) -> TickHandle;

    /// Cancel a pending callback. Unknown handles are ignored.
    fn cancel_tick(&mut self, handle: TickHandle);
}

/// Visual element created for one segment.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayElement {
    /// Segment drawn by this element.
    pub segment: SegmentRef,
    /// Stacking order; nested regions paint above their ancestors.
    pub z_index: i32,
    /// Top-left corner in host layout coordinates.
    pub origin: Point,
    /// Equal to the renderer's surface width; height is at least the line height.
    pub size: Size,
    /// Skew angles in degrees.
    pub skew_deg: Vec2,
    /// Draw an inspection outline around the element.
    pub debug_outline: bool,
}

impl OverlayElement {
    /// Placement rectangle in host layout coordinates.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }
}

/// Hosts overlay elements.
pub trait OverlayHost {
    /// Add an element and return its id.
    fn insert(&mut self, element: OverlayElement) -> ElementId;

    /// Remove an element. Unknown ids are ignored.
    fn remove(&mut self, id: ElementId);
}

/// Environment invalidation signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnvironmentEvent {
    /// Viewport size changed. Forwarded to [`crate::RegionOrchestrator::on_resize`].
    Resize,
    /// Annotated content changed structurally. Forwarded to
    /// [`crate::RegionOrchestrator::on_content_mutation`].
    ContentMutation,
    /// Zoom level changed. Forwarded to [`crate::RegionOrchestrator::on_zoom`].
    Zoom,
}

impl EnvironmentEvent {
    /// Every event, in subscription order.
    pub const ALL: [Self; 3] = [Self::Resize, Self::ContentMutation, Self::Zoom];
}

/// Subscription registry for [`EnvironmentEvent`]s.
pub trait EventSource {
    /// Start delivering `event`.
    fn subscribe(&mut self, event: EnvironmentEvent) -> SubscriptionId;

    /// Stop a subscription. Unknown ids are ignored.
    fn unsubscribe(&mut self, id: SubscriptionId);
}

/// Everything the orchestrator needs from its environment.
pub struct HostBindings {
    /// Region discovery.
    pub regions: Box<dyn RegionSource>,
    /// Line box measurement.
    pub geometry: Box<dyn GeometryProvider>,
    /// Viewport intersection.
    pub visibility: Box<dyn VisibilityObserver>,
    /// Frame ticks.
    pub frames: Box<dyn FrameScheduler>,
    /// Overlay element hosting.
    pub overlay: Box<dyn OverlayHost>,
    /// Environment event subscriptions.
    pub events: Box<dyn EventSource>,
    /// Allocates one drawing surface per segment.
    pub surfaces: Box<dyn SurfaceFactory>,
}
