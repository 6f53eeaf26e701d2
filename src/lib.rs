//! inkmark draws procedural, progressively revealed highlight strokes over text regions.
//!
//! The crate has two layers:
//!
//! - [`Renderer`]: one segment (one visual line of a region) turned into static stroke geometry
//!   (wave highlight, rounded outline, burst, scribble or sketch) that is painted piecewise as
//!   reveal progress advances.
//! - [`RegionOrchestrator`]: discovers regions through host bindings, resolves their cascading
//!   options, builds renderers per generation and drives their reveal from frame ticks.
//!
//! Hosts implement the traits in [`HostBindings`]; [`CpuSurfaceFactory`] and
//! [`RecordingSurfaceFactory`] are ready-made drawing surfaces.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

pub(crate) mod animation;
/// Option schema, validation, cascading resolution and named styles.
pub mod config;
/// Region discovery, trigger policy and generation management.
pub mod orchestrate;
/// Drawing surfaces and the progressive-reveal renderer.
pub mod render;
pub(crate) mod strokes;

pub use crate::animation::ease::Easing;
pub use crate::config::{
    ConfigResolver, ConfigWarning, DrawingMode, EffectiveConfig, OptionMap, StyleRegistry,
};
pub use crate::foundation::color::Color;
pub use crate::foundation::core::{Point, Rect, Segment, Size, Vec2};
pub use crate::foundation::error::{InkError, InkResult};
pub use crate::foundation::ids::{ElementId, RegionKey, SegmentRef, SubscriptionId, TickHandle};
pub use crate::orchestrate::{HostBindings, RegionInfo, RegionOrchestrator};
pub use crate::render::{
    Bounds, CpuSurfaceFactory, RecordingSurfaceFactory, Renderer, Surface, SurfaceFactory,
};
