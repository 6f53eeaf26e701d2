use std::collections::HashMap;

use crate::foundation::ids::{RegionKey, SegmentRef, TickHandle};
use crate::orchestrate::host::FrameScheduler;

/// Bookkeeping for outstanding frame ticks.
///
/// Holds at most one live handle per segment and at most one pending relayout. Handles not
/// tracked here (already fired or cancelled) are stale and must be ignored by the caller.
#[derive(Debug, Default)]
pub(crate) struct AnimationScheduler {
    by_handle: HashMap<TickHandle, SegmentRef>,
    by_segment: HashMap<SegmentRef, TickHandle>,
    relayout: Option<TickHandle>,
}

impl AnimationScheduler {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Request the next tick for `segment`, replacing any handle it already holds.
    pub(crate) fn schedule(&mut self, frames: &mut dyn FrameScheduler, segment: SegmentRef) -> TickHandle {
        self.cancel_segment(frames, &segment);
        let handle = frames.request_tick();
        self.by_handle.insert(handle, segment.clone());
        self.by_segment.insert(segment, handle);
        handle
    }

    /// Claim a fired tick. `None` for stale handles.
    pub(crate) fn take(&mut self, handle: TickHandle) -> Option<SegmentRef> {
        let segment = self.by_handle.remove(&handle)?;
        self.by_segment.remove(&segment);
        Some(segment)
    }

    pub(crate) fn cancel_segment(&mut self, frames: &mut dyn FrameScheduler, segment: &SegmentRef) {
        if let Some(handle) = self.by_segment.remove(segment) {
            self.by_handle.remove(&handle);
            frames.cancel_tick(handle);
        }
    }

    /// Cancel every segment tick belonging to `region`.
    pub(crate) fn cancel_region(&mut self, frames: &mut dyn FrameScheduler, region: &RegionKey) -> usize {
        let doomed: Vec<SegmentRef> = self
            .by_segment
            .keys()
            .filter(|s| &s.region == region)
            .cloned()
            .collect();
        for s in &doomed {
            self.cancel_segment(frames, s);
        }
        doomed.len()
    }

    /// Cancel every segment tick. The pending relayout, if any, survives.
    pub(crate) fn cancel_segments(&mut self, frames: &mut dyn FrameScheduler) -> usize {
        let n = self.by_handle.len();
        for (handle, _) in self.by_handle.drain() {
            frames.cancel_tick(handle);
        }
        self.by_segment.clear();
        n
    }

    /// Request a relayout tick, cancelling a pending one.
    pub(crate) fn request_relayout(&mut self, frames: &mut dyn FrameScheduler) -> TickHandle {
        if let Some(old) = self.relayout.take() {
            frames.cancel_tick(old);
        }
        let handle = frames.request_tick();
        self.relayout = Some(handle);
        handle
    }

    /// `true` when `handle` is the pending relayout; clears it.
    pub(crate) fn take_relayout(&mut self, handle: TickHandle) -> bool {
        if self.relayout == Some(handle) {
            self.relayout = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn cancel_relayout(&mut self, frames: &mut dyn FrameScheduler) {
        if let Some(old) = self.relayout.take() {
            frames.cancel_tick(old);
        }
    }

    pub(crate) fn has_pending_relayout(&self) -> bool {
        self.relayout.is_some()
    }

    pub(crate) fn live_segments(&self) -> usize {
        self.by_segment.len()
    }

    #[cfg(test)]
    pub(crate) fn handle_for(&self, segment: &SegmentRef) -> Option<TickHandle> {
        self.by_segment.get(segment).copied()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/orchestrate/scheduler.rs"]
mod tests;
