pub(crate) mod host;
pub(crate) mod orchestrator;
pub(crate) mod region;
pub(crate) mod scheduler;

pub use host::{
    EnvironmentEvent, EventSource, FrameScheduler, GeometryProvider, HostBindings, OverlayElement,
    OverlayHost, RegionInfo, RegionSource, VisibilityObserver,
};
pub use orchestrator::{RebuildReport, RegionOrchestrator, VISIBILITY_THRESHOLD};
pub use region::z_index_for_depth;
