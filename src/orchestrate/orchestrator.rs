use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde_json::Value;

use crate::config::{
    AnimationTrigger, ConfigResolver, ConfigWarning, EffectiveConfig, OptionLayers, OptionMap,
    StyleRegistry, merge_tiers, validate_options,
};
use crate::foundation::color::Color;
use crate::foundation::core::Segment;
use crate::foundation::error::InkResult;
use crate::foundation::ids::{ElementId, RegionKey, SegmentRef, SubscriptionId, TickHandle};
use crate::foundation::math::segment_seed;
use crate::orchestrate::host::{
    EnvironmentEvent, FrameScheduler, HostBindings, OverlayElement, RegionInfo,
};
use crate::orchestrate::region::{
    nesting_depth, placement, segments_for, skew_for, z_index_for_depth,
};
use crate::orchestrate::scheduler::AnimationScheduler;
use crate::render::{Renderer, Surface};

/// Intersection ratio at which a visibility-gated segment starts.
pub const VISIBILITY_THRESHOLD: f64 = 0.5;

/// Summary of one [`RegionOrchestrator::rebuild`].
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RebuildReport {
    /// Generation number, starting at 1.
    pub generation: u64,
    /// Segments were snapped instead of re-animated.
    pub relayout_only: bool,
    /// Regions returned by the scan (duplicates excluded).
    pub regions: usize,
    /// Segments with a renderer and an overlay element.
    pub segments_built: usize,
    /// Segments whose renderer or surface could not be built. Siblings are unaffected.
    pub segments_failed: usize,
    /// Previous-generation elements removed after the new ones were inserted.
    pub elements_removed: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Gate {
    /// No tick or watch outstanding.
    Inactive,
    /// Waiting for the start delay; `armed_at` is set by the first tick.
    Delayed { delay_ms: f64, armed_at: Option<f64> },
    Running,
    /// Waiting for a visibility report.
    Watching,
}

struct SegmentSlot {
    index: usize,
    element: ElementId,
    renderer: Renderer,
    gate: Gate,
}

struct RegionState {
    info: RegionInfo,
    config: EffectiveConfig,
    warnings: Vec<ConfigWarning>,
    depth: usize,
    slots: Vec<SegmentSlot>,
}

/// Drives highlight overlays for every annotated region of one host.
///
/// Each rebuild is a generation: regions are rescanned, one [`Renderer`] and overlay element is
/// built per line segment, and the previous generation's elements are removed only after the new
/// ones are in place. Animation is advanced from host frame ticks via [`Self::on_tick`].
pub struct RegionOrchestrator {
    host: HostBindings,
    resolver: ConfigResolver,
    global: OptionMap,
    regions: Vec<RegionState>,
    elements: HashMap<ElementId, SegmentRef>,
    scheduler: AnimationScheduler,
    subscriptions: Vec<SubscriptionId>,
    generation: u64,
    started: bool,
    disposed: bool,
}

impl RegionOrchestrator {
    /// Orchestrator resolving named styles from [`StyleRegistry::global`].
    pub fn new(host: HostBindings, global: OptionMap) -> Self {
        Self::with_styles(host, global, StyleRegistry::global())
    }

    /// Orchestrator with an explicit style registry.
    pub fn with_styles(host: HostBindings, global: OptionMap, styles: Arc<StyleRegistry>) -> Self {
        Self {
            host,
            resolver: ConfigResolver::new(styles),
            global: validated_global(&global),
            regions: Vec::new(),
            elements: HashMap::new(),
            scheduler: AnimationScheduler::new(),
            subscriptions: Vec::new(),
            generation: 0,
            started: false,
            disposed: false,
        }
    }

    /// Subscribe to environment events and build the first generation.
    ///
    /// Returns `None` (and logs a warning) when already started or disposed.
    pub fn start(&mut self) -> Option<RebuildReport> {
        if self.started || self.disposed {
            tracing::warn!("orchestrator already started; start() ignored");
            return None;
        }
        self.started = true;
        for event in EnvironmentEvent::ALL {
            let id = self.host.events.subscribe(event);
            self.subscriptions.push(id);
        }
        Some(self.rebuild(false))
    }

    /// Replace the current generation.
    ///
    /// With `relayout_only`, segments are painted complete instead of re-animated (visibility
    /// gated segments that are already fully visible included).
    #[tracing::instrument(level = "debug", skip(self), fields(generation = self.generation + 1))]
    pub fn rebuild(&mut self, relayout_only: bool) -> RebuildReport {
        self.generation += 1;
        let mut report = RebuildReport {
            generation: self.generation,
            relayout_only,
            ..RebuildReport::default()
        };

        // The old generation stays on screen until its replacement is inserted.
        let old = std::mem::take(&mut self.regions);
        let old_elements: Vec<ElementId> = old
            .iter()
            .flat_map(|r| r.slots.iter().map(|s| s.element))
            .collect();

        let cancelled = self.scheduler.cancel_segments(self.host.frames.as_mut());
        self.scheduler.cancel_relayout(self.host.frames.as_mut());
        for id in &old_elements {
            self.host.visibility.unwatch(*id);
        }
        tracing::debug!(cancelled, "previous generation quiesced");

        let infos = self.host.regions.scan();
        let parents: HashMap<RegionKey, Option<RegionKey>> = infos
            .iter()
            .map(|i| (i.key.clone(), i.parent.clone()))
            .collect();

        let mut seen = HashSet::new();
        for info in infos {
            if !seen.insert(info.key.clone()) {
                tracing::warn!(region = %info.key, "duplicate region key in scan; skipped");
                continue;
            }
            let depth = nesting_depth(&info.key, &parents);
            let state = self.build_region(info, depth, relayout_only, &mut report);
            self.regions.push(state);
            report.regions += 1;
        }

        for id in old_elements {
            self.host.overlay.remove(id);
            self.elements.remove(&id);
            report.elements_removed += 1;
        }
        drop(old);

        tracing::debug!(
            regions = report.regions,
            built = report.segments_built,
            failed = report.segments_failed,
            removed = report.elements_removed,
            "generation built"
        );
        report
    }

    fn build_region(
        &mut self,
        info: RegionInfo,
        depth: usize,
        relayout_only: bool,
        report: &mut RebuildReport,
    ) -> RegionState {
        let resolved = self
            .resolver
            .resolve(&self.global, info.style.as_deref(), &info.overrides);
        let mut state = RegionState {
            config: resolved.config,
            warnings: resolved.warnings,
            depth,
            slots: Vec::new(),
            info,
        };
        let key = state.info.key.clone();

        let boxes = self.host.geometry.measure(&key);
        if boxes.is_empty() {
            tracing::debug!(region = %key, "region has no line boxes; nothing to build");
            return state;
        }
        let segments = segments_for(
            &boxes,
            self.host.geometry.continues_before(&key),
            self.host.geometry.continues_after(&key),
        );

        let color = match Color::parse(&state.info.color) {
            Ok(c) => c,
            Err(err) => {
                tracing::warn!(region = %key, %err, "region color rejected; segments skipped");
                report.segments_failed += segments.len();
                return state;
            }
        };

        let z_index = z_index_for_depth(depth);
        for (index, segment) in segments.into_iter().enumerate() {
            match self.build_segment(&key, index, segment, &state.config, color, z_index) {
                Ok(slot) => {
                    state.slots.push(slot);
                    report.segments_built += 1;
                }
                Err(err) => {
                    tracing::warn!(region = %key, index, %err, "segment construction failed");
                    report.segments_failed += 1;
                }
            }
        }

        for slot in &mut state.slots {
            self.arm(&key, slot, relayout_only);
        }
        state
    }

    fn build_segment(
        &mut self,
        key: &RegionKey,
        index: usize,
        segment: Segment,
        config: &EffectiveConfig,
        color: Color,
        z_index: i32,
    ) -> InkResult<SegmentSlot> {
        let seed = segment_seed(key.as_str(), index, config.seed);
        let mut renderer = Renderer::new(*config, color, segment, seed)?;
        let bounds = renderer.set_bounds(self.host.surfaces.as_mut())?;
        let (origin, size) = placement(&segment, &bounds, config);

        let seg_ref = SegmentRef::new(key.clone(), index);
        let element = self.host.overlay.insert(OverlayElement {
            segment: seg_ref.clone(),
            z_index,
            origin,
            size,
            skew_deg: skew_for(&segment, config),
            debug_outline: config.debug,
        });
        self.elements.insert(element, seg_ref);

        Ok(SegmentSlot {
            index,
            element,
            renderer,
            gate: Gate::Inactive,
        })
    }

    /// Apply the trigger policy to a freshly built segment.
    fn arm(&mut self, key: &RegionKey, slot: &mut SegmentSlot, relayout_only: bool) {
        let config = *slot.renderer.config();
        if !config.animate {
            snap(slot);
            return;
        }
        match config.animation_trigger {
            AnimationTrigger::Load if relayout_only => snap(slot),
            AnimationTrigger::Load => begin(
                slot,
                SegmentRef::new(key.clone(), slot.index),
                &mut self.scheduler,
                self.host.frames.as_mut(),
            ),
            AnimationTrigger::ScrollIntoView
                if relayout_only && self.host.visibility.is_fully_visible(slot.element) =>
            {
                tracing::debug!(region = %key, index = slot.index, "visible on relayout; snapped");
                snap(slot);
            }
            AnimationTrigger::ScrollIntoView => {
                self.host
                    .visibility
                    .watch(slot.element, VISIBILITY_THRESHOLD);
                slot.gate = Gate::Watching;
            }
        }
    }

    /// Deliver a fired frame tick. Stale or cancelled handles are ignored.
    pub fn on_tick(&mut self, handle: TickHandle, now_ms: f64) {
        if self.disposed {
            return;
        }
        if self.scheduler.take_relayout(handle) {
            self.rebuild(true);
            return;
        }
        let Some(seg) = self.scheduler.take(handle) else {
            tracing::debug!(?handle, "stale tick ignored");
            return;
        };
        let again = match find_slot_mut(&mut self.regions, &seg) {
            Some(slot) => tick_slot(slot, now_ms),
            None => false,
        };
        if again {
            self.scheduler.schedule(self.host.frames.as_mut(), seg);
        }
    }

    /// Deliver a visibility report for `element`.
    ///
    /// The first report at or above [`VISIBILITY_THRESHOLD`] starts a watching segment; later
    /// reports are ignored.
    pub fn on_visibility(&mut self, element: ElementId, ratio: f64) {
        if self.disposed || ratio < VISIBILITY_THRESHOLD {
            return;
        }
        let Some(seg) = self.elements.get(&element).cloned() else {
            return;
        };
        let Some(slot) = find_slot_mut(&mut self.regions, &seg) else {
            return;
        };
        if slot.gate != Gate::Watching {
            return;
        }
        self.host.visibility.unwatch(element);
        if slot.renderer.is_completed() {
            slot.gate = Gate::Inactive;
            return;
        }
        tracing::debug!(segment = %seg, ratio, "segment scrolled into view");
        begin(slot, seg, &mut self.scheduler, self.host.frames.as_mut());
    }

    /// Viewport resized. Coalesced into one relayout-only rebuild on the next tick.
    pub fn on_resize(&mut self) {
        if self.disposed {
            return;
        }
        self.scheduler.request_relayout(self.host.frames.as_mut());
    }

    /// Annotated content changed structurally: rebuild and re-animate.
    pub fn on_content_mutation(&mut self) -> Option<RebuildReport> {
        (!self.disposed).then(|| self.rebuild(false))
    }

    /// Zoom changed: rebuild without re-animating.
    pub fn on_zoom(&mut self) -> Option<RebuildReport> {
        (!self.disposed).then(|| self.rebuild(true))
    }

    /// Rebuild everything and re-animate.
    pub fn rerun(&mut self) -> Option<RebuildReport> {
        (!self.disposed).then(|| self.rebuild(false))
    }

    /// Replay the reveal of every segment of `region` on its existing geometry.
    ///
    /// Returns the number of segments re-triggered.
    pub fn reanimate(&mut self, region: &RegionKey) -> usize {
        let Some(state) = self.regions.iter_mut().find(|r| &r.info.key == region) else {
            return 0;
        };
        self.scheduler
            .cancel_region(self.host.frames.as_mut(), region);
        for slot in &mut state.slots {
            if slot.gate == Gate::Watching {
                self.host.visibility.unwatch(slot.element);
            }
            slot.renderer.rearm();
            begin(
                slot,
                SegmentRef::new(region.clone(), slot.index),
                &mut self.scheduler,
                self.host.frames.as_mut(),
            );
        }
        state.slots.len()
    }

    /// Cancel ticks and watches of `region`. Painted progress is kept.
    pub fn stop(&mut self, region: &RegionKey) {
        let Some(state) = self.regions.iter_mut().find(|r| &r.info.key == region) else {
            return;
        };
        let cancelled = self
            .scheduler
            .cancel_region(self.host.frames.as_mut(), region);
        for slot in &mut state.slots {
            if slot.gate == Gate::Watching {
                self.host.visibility.unwatch(slot.element);
            }
            slot.gate = Gate::Inactive;
        }
        tracing::debug!(region = %region, cancelled, "region stopped");
    }

    /// Set one global option. Takes effect on the next rebuild.
    pub fn set_option(&mut self, key: &str, value: Value) {
        let mut patch = OptionMap::new();
        patch.insert(key.to_owned(), value);
        self.set_options(&patch);
    }

    /// Merge `options` into the global tier. Takes effect on the next rebuild.
    pub fn set_options(&mut self, options: &OptionMap) {
        let merged = merge_tiers([&self.global, options]);
        self.global = validated_global(&merged);
    }

    /// Validated global tier.
    pub fn global_options(&self) -> &OptionMap {
        &self.global
    }

    /// Registry consulted for named styles. Definitions added here apply from the next rebuild.
    pub fn styles(&self) -> &Arc<StyleRegistry> {
        self.resolver.styles()
    }

    /// Per-tier option breakdown for `region`.
    pub fn describe_options(&self, region: &RegionKey) -> Option<OptionLayers> {
        let state = self.region(region)?;
        Some(self.resolver.layers(
            &self.global,
            state.info.style.as_deref(),
            &state.info.overrides,
        ))
    }

    /// Tear everything down: ticks, watches, elements and subscriptions.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.scheduler.cancel_segments(self.host.frames.as_mut());
        self.scheduler.cancel_relayout(self.host.frames.as_mut());
        for state in std::mem::take(&mut self.regions) {
            for slot in state.slots {
                self.host.visibility.unwatch(slot.element);
                self.host.overlay.remove(slot.element);
            }
        }
        self.elements.clear();
        for id in self.subscriptions.drain(..) {
            self.host.events.unsubscribe(id);
        }
        tracing::debug!(generation = self.generation, "orchestrator disposed");
    }

    fn region(&self, key: &RegionKey) -> Option<&RegionState> {
        self.regions.iter().find(|r| &r.info.key == key)
    }

    /// Region keys of the current generation, in document order.
    pub fn region_keys(&self) -> Vec<RegionKey> {
        self.regions.iter().map(|r| r.info.key.clone()).collect()
    }

    /// Effective configuration `region` was built with.
    pub fn config(&self, region: &RegionKey) -> Option<&EffectiveConfig> {
        self.region(region).map(|r| &r.config)
    }

    /// Option diagnostics from the last resolution of `region`.
    pub fn warnings(&self, region: &RegionKey) -> &[ConfigWarning] {
        self.region(region)
            .map(|r| r.warnings.as_slice())
            .unwrap_or_default()
    }

    /// Nesting depth computed for `region` in the current generation.
    pub fn depth(&self, region: &RegionKey) -> Option<usize> {
        self.region(region).map(|r| r.depth)
    }

    /// Renderer of segment `index` of `region`.
    pub fn renderer(&self, region: &RegionKey, index: usize) -> Option<&Renderer> {
        self.region(region)?
            .slots
            .iter()
            .find(|s| s.index == index)
            .map(|s| &s.renderer)
    }

    /// Renderers of `region` in segment order.
    pub fn renderers(&self, region: &RegionKey) -> Vec<&Renderer> {
        self.region(region)
            .map(|r| r.slots.iter().map(|s| &s.renderer).collect())
            .unwrap_or_default()
    }

    /// Element hosting segment `index` of `region`.
    pub fn element(&self, region: &RegionKey, index: usize) -> Option<ElementId> {
        self.region(region)?
            .slots
            .iter()
            .find(|s| s.index == index)
            .map(|s| s.element)
    }

    /// Drawing surface behind `element`.
    pub fn surface(&self, element: ElementId) -> Option<&dyn Surface> {
        let seg = self.elements.get(&element)?;
        self.renderer(&seg.region, seg.index)?.surface()
    }

    /// Number of rebuilds so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `true` once [`Self::start`] has run.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Segment ticks currently outstanding.
    pub fn pending_ticks(&self) -> usize {
        self.scheduler.live_segments()
    }

    /// A resize is waiting for its relayout tick.
    pub fn has_pending_relayout(&self) -> bool {
        self.scheduler.has_pending_relayout()
    }
}

impl Drop for RegionOrchestrator {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn validated_global(raw: &OptionMap) -> OptionMap {
    let validated = validate_options(raw);
    for w in &validated.warnings {
        tracing::warn!(path = %w.path, kind = ?w.kind, "global option: {}", w.message);
    }
    validated.options
}

fn find_slot_mut<'a>(regions: &'a mut [RegionState], seg: &SegmentRef) -> Option<&'a mut SegmentSlot> {
    regions
        .iter_mut()
        .find(|r| r.info.key == seg.region)?
        .slots
        .iter_mut()
        .find(|s| s.index == seg.index)
}

/// Paint a segment complete with no ticks.
fn snap(slot: &mut SegmentSlot) {
    if let Err(err) = slot.renderer.start_animation(true) {
        tracing::warn!(element = ?slot.element, %err, "snap failed");
    }
    slot.gate = Gate::Inactive;
}

/// Arm a segment's reveal, honoring its start delay, and request its first tick.
fn begin(
    slot: &mut SegmentSlot,
    seg: SegmentRef,
    scheduler: &mut AnimationScheduler,
    frames: &mut dyn FrameScheduler,
) {
    let delay_ms = slot.renderer.config().start_delay_ms(slot.index);
    if delay_ms > 0.0 {
        slot.gate = Gate::Delayed {
            delay_ms,
            armed_at: None,
        };
    } else {
        if let Err(err) = slot.renderer.start_animation(false) {
            tracing::warn!(segment = %seg, %err, "animation start failed");
            slot.gate = Gate::Inactive;
            return;
        }
        slot.gate = Gate::Running;
    }
    tracing::debug!(segment = %seg, delay_ms, "segment armed");
    scheduler.schedule(frames, seg);
}

/// Advance one segment for a fired tick. Returns whether another tick is needed.
fn tick_slot(slot: &mut SegmentSlot, now_ms: f64) -> bool {
    match slot.gate {
        Gate::Delayed { delay_ms, armed_at } => {
            let armed = armed_at.unwrap_or(now_ms);
            if now_ms - armed < delay_ms {
                slot.gate = Gate::Delayed {
                    delay_ms,
                    armed_at: Some(armed),
                };
                return true;
            }
            if let Err(err) = slot.renderer.start_animation(false) {
                tracing::warn!(element = ?slot.element, %err, "animation start failed");
                slot.gate = Gate::Inactive;
                return false;
            }
            slot.gate = Gate::Running;
        }
        Gate::Running => {}
        Gate::Watching | Gate::Inactive => return false,
    }

    match slot.renderer.advance(now_ms) {
        Ok(true) => true,
        Ok(false) => {
            slot.gate = Gate::Inactive;
            false
        }
        Err(err) => {
            tracing::warn!(element = ?slot.element, %err, "tick failed");
            slot.gate = Gate::Inactive;
            false
        }
    }
}
