use crate::prelude::EngineConfig;
use crate::processing::{
    ssid_index, AccessPointGroup, GroupingEngine, RadarLayout, RenderNode, SignalGeometry,
};
use crate::render::{DrawSurface, FrameHandle, FrameScheduler, Palette, RadarPainter};
use crate::scan_interface::ScanRecord;
use crate::selection::{
    DetailView, PointerOutcome, PointerSample, SelectionController, VendorTable,
};
use crate::telemetry::{LogManager, Metrics, MetricsRecorder};
use serde::Serialize;
use std::collections::BTreeMap;

/// Redraw loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoopState {
    Running,
    Paused,
    /// Terminal: no surface, or the surface left the host.
    Stopped,
}

/// Introspection view of one engine, for automated checks and the HTTP bridge.
#[derive(Debug, Clone, Serialize)]
pub struct DebugSnapshot {
    pub state: LoopState,
    pub light_mode: bool,
    pub record_count: usize,
    pub groups: Vec<AccessPointGroup>,
    pub selected_key: Option<String>,
    pub selection: Option<AccessPointGroup>,
    pub detail: Option<DetailView>,
    pub last_pointer: Option<PointerSample>,
    pub ssid_counts: BTreeMap<String, usize>,
    pub metrics: Metrics,
}

/// One radar visualization: owns its records, groups, selection and
/// animation handle.
pub struct RadarEngine<S: DrawSurface> {
    config: EngineConfig,
    surface: Option<S>,
    scheduler: Box<dyn FrameScheduler>,
    grouping: GroupingEngine,
    painter: RadarPainter,
    vendors: VendorTable,
    records: Vec<ScanRecord>,
    groups: Vec<AccessPointGroup>,
    nodes: Vec<RenderNode>,
    selection: SelectionController,
    detail: Option<DetailView>,
    animation: Option<FrameHandle>,
    state: LoopState,
    started_at_ms: Option<f64>,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl<S: DrawSurface> RadarEngine<S> {
    /// Mounts an engine and starts its redraw loop.
    ///
    /// Without a surface the engine stays inert: it still accepts records, but
    /// never schedules a frame.
    pub fn mount(
        config: EngineConfig,
        surface: Option<S>,
        scheduler: Box<dyn FrameScheduler>,
    ) -> Self {
        let mut engine = Self {
            config,
            surface,
            scheduler,
            grouping: GroupingEngine::new(),
            painter: RadarPainter::new(Palette::for_mode(config.light_mode)),
            vendors: VendorTable::builtin(),
            records: Vec::new(),
            groups: Vec::new(),
            nodes: Vec::new(),
            selection: SelectionController::new(),
            detail: None,
            animation: None,
            state: LoopState::Stopped,
            started_at_ms: None,
            metrics: MetricsRecorder::new(),
            logger: LogManager::new("engine"),
        };

        if engine.surface.is_some() {
            engine.state = LoopState::Running;
            engine.animation = Some(engine.scheduler.request_frame());
            engine.logger.record("radar mounted, redraw loop running");
        } else {
            engine
                .logger
                .warn("no drawing surface available; radar not started");
        }
        engine
    }

    pub fn with_vendors(mut self, vendors: VendorTable) -> Self {
        self.vendors = vendors;
        self
    }

    /// Seeds the generator behind fallback identifiers of anonymous groups.
    pub fn with_grouping_seed(mut self, seed: u64) -> Self {
        self.grouping = GroupingEngine::with_seed(seed);
        self
    }

    /// Replaces the scan records and regroups them.
    ///
    /// Identical records are a no-op. Otherwise a selection survives when a
    /// group with the same key still exists; address-less groups must also keep
    /// their SSID.
    pub fn load_records(&mut self, records: Vec<ScanRecord>) {
        if records == self.records {
            self.logger.detail("scan unchanged; keeping groups");
            return;
        }

        let previous = self
            .selected_group()
            .map(|group| (group.key.clone(), group.normalized_ssid().to_string()));
        let previous_groups = std::mem::take(&mut self.groups);
        self.groups = self.grouping.regroup(&records, &previous_groups);
        self.records = records;
        self.nodes.clear();

        let retained = previous.and_then(|(key, ssid)| {
            self.groups.iter().position(|group| {
                group.key == key && (group.has_address() || group.normalized_ssid() == ssid)
            })
        });
        self.selection.reselect(retained);
        self.refresh_detail();
    }

    /// Delivers one frame from the host.
    ///
    /// Returns `true` when a frame was painted.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if let Some(handle) = self.animation.take() {
            self.scheduler.acknowledge(handle);
        }
        if self.state != LoopState::Running {
            return false;
        }

        let surface = match self.surface.as_mut() {
            Some(surface) if surface.is_attached() => surface,
            _ => {
                self.state = LoopState::Stopped;
                self.logger
                    .record("drawing surface detached; redraw loop stopped");
                return false;
            }
        };

        let logical = surface.logical_size();
        if logical != surface.pixel_size() {
            surface.configure(logical.0, logical.1);
            self.logger.detail(&format!(
                "surface resized to {:.0}x{:.0}",
                logical.0, logical.1
            ));
        }

        let started = *self.started_at_ms.get_or_insert(now_ms);
        self.nodes = self.painter.paint(
            surface,
            &self.groups,
            self.selection.selected(),
            now_ms,
            now_ms - started,
        );
        self.metrics.record_frame();
        self.animation = Some(self.scheduler.request_frame());
        true
    }

    /// Host visibility hook: hidden pauses the loop, visible resumes it.
    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn pause(&mut self) {
        if self.state != LoopState::Running {
            return;
        }
        if let Some(handle) = self.animation.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.state = LoopState::Paused;
        self.logger.record("redraw loop paused");
    }

    pub fn resume(&mut self) {
        if self.state != LoopState::Paused {
            return;
        }
        self.state = LoopState::Running;
        if self.animation.is_none() {
            self.animation = Some(self.scheduler.request_frame());
        }
        self.logger.record("redraw loop resumed");
    }

    /// Stops the loop permanently.
    pub fn stop(&mut self) {
        if let Some(handle) = self.animation.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.state = LoopState::Stopped;
    }

    /// Hit-tests pointer input and toggles the selection.
    ///
    /// Uses the nodes of the last painted frame; before the first frame the
    /// nodes are mapped at `now_ms`.
    pub fn handle_pointer(&mut self, x: f64, y: f64, now_ms: f64) -> PointerOutcome {
        let Some(surface) = self.surface.as_ref() else {
            return PointerOutcome::Ignored;
        };

        if self.nodes.len() != self.groups.len() {
            let (width, height) = surface.pixel_size();
            let layout = RadarLayout::fit(width, height);
            self.nodes = self
                .groups
                .iter()
                .map(|group| SignalGeometry::map_node(group, now_ms, &layout))
                .collect();
        }

        let outcome = self.selection.handle_pointer(&self.nodes, x, y, now_ms);
        match outcome {
            PointerOutcome::Ignored => {
                self.metrics.record_pointer_ignored();
                self.logger
                    .detail(&format!("pointer at ({:.1}, {:.1}) ignored", x, y));
            }
            _ => self.metrics.record_pointer(),
        }

        if outcome.changed() {
            self.refresh_detail();
            match self.selected_group() {
                Some(group) => self.logger.record(&format!("selected {}", group.key)),
                None => self.logger.record("selection cleared"),
            }
        }
        outcome
    }

    pub fn set_light_mode(&mut self, light_mode: bool) {
        self.config.light_mode = light_mode;
        self.painter.set_palette(Palette::for_mode(light_mode));
    }

    fn refresh_detail(&mut self) {
        self.detail = self
            .selected_group()
            .map(|group| DetailView::for_group(group, &self.vendors));
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_frame_pending(&self) -> bool {
        self.animation.is_some()
    }

    /// Outstanding requests as seen by the scheduler.
    pub fn scheduled_frames(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn records(&self) -> &[ScanRecord] {
        &self.records
    }

    pub fn groups(&self) -> &[AccessPointGroup] {
        &self.groups
    }

    pub fn nodes(&self) -> &[RenderNode] {
        &self.nodes
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selection.selected()
    }

    pub fn selected_group(&self) -> Option<&AccessPointGroup> {
        self.selection
            .selected()
            .and_then(|idx| self.groups.get(idx))
    }

    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics.snapshot()
    }

    pub fn snapshot(&self) -> DebugSnapshot {
        DebugSnapshot {
            state: self.state,
            light_mode: self.config.light_mode,
            record_count: self.records.len(),
            groups: self.groups.clone(),
            selected_key: self.selected_group().map(|group| group.key.clone()),
            selection: self.selected_group().cloned(),
            detail: self.detail.clone(),
            last_pointer: self.selection.last_pointer(),
            ssid_counts: ssid_index(&self.records)
                .into_iter()
                .map(|(ssid, records)| (ssid, records.len()))
                .collect(),
            metrics: self.metrics.snapshot(),
        }
    }
}
