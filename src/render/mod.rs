pub(crate) mod cpu;
pub(crate) mod primitive;
pub(crate) mod recording;
pub(crate) mod renderer;
pub(crate) mod surface;

pub use cpu::{CpuSurface, CpuSurfaceFactory};
pub use recording::{DrawCmd, RecordingSurface, RecordingSurfaceFactory, SurfaceRecord};
pub use renderer::{Bounds, Renderer, RevealState};
pub use surface::{Paint, Surface, SurfaceFactory};
