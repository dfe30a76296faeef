use std::collections::HashMap;
use std::fmt;
use std::ops::Range;
use std::sync::{Arc, Mutex};

use carousel::{
    Engine, FrameReport, InputEvent, InputOutcome, Surface, VirtualIndex, VisibleRange,
};

use crate::RenderHost;

/// A controller shared across threads. The engine state is only ever touched under this one
/// lock.
pub type SharedController<T, H> = Arc<Mutex<Controller<T, H>>>;

/// What one controller frame did to the render host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameSummary {
    pub mounted: usize,
    pub released: usize,
    pub applied: usize,
    /// Handles the host reported as already gone.
    pub stale: usize,
    pub range: Option<VisibleRange>,
    pub at_rest: bool,
}

/// A framework-neutral controller that owns a [`carousel::Engine`] and a [`RenderHost`], and
/// keeps one render handle per live `(surface, index)`.
///
/// Adapters drive it by calling:
/// - `handle_input` when UI events occur
/// - `frame(now_ms)` once per display refresh (see [`crate::Mounted`] for an RAII loop)
pub struct Controller<T, H: RenderHost<T>> {
    engine: Engine<T>,
    host: H,
    handles: HashMap<(Surface, VirtualIndex), H::Handle>,
    surfaces: Vec<Surface>,
}

impl<T: fmt::Debug, H: RenderHost<T> + fmt::Debug> fmt::Debug for Controller<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("engine", &self.engine)
            .field("host", &self.host)
            .field("live_handles", &self.handles.len())
            .field("surfaces", &self.surfaces)
            .finish_non_exhaustive()
    }
}

impl<T, H: RenderHost<T>> Controller<T, H> {
    /// Renders all three surfaces.
    pub fn new(engine: Engine<T>, host: H) -> Self {
        Self::with_surfaces(engine, host, &Surface::ALL)
    }

    /// Renders only `surfaces` (e.g. a host without a minimap).
    pub fn with_surfaces(engine: Engine<T>, host: H, surfaces: &[Surface]) -> Self {
        let mut list = surfaces.to_vec();
        list.sort_unstable();
        list.dedup();
        Self {
            engine,
            host,
            handles: HashMap::new(),
            surfaces: list,
        }
    }

    pub fn engine(&self) -> &Engine<T> {
        &self.engine
    }

    /// Direct engine access, e.g. to change the minimap slot size.
    ///
    /// Resetting the engine window here is safe: the next [`Controller::frame`] releases the
    /// handles the rebuilt window no longer covers and keeps the ones it still does.
    pub fn engine_mut(&mut self) -> &mut Engine<T> {
        &mut self.engine
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Number of live render handles across all surfaces.
    pub fn live_handles(&self) -> usize {
        self.handles.len()
    }

    pub fn has_handle(&self, surface: Surface, index: VirtualIndex) -> bool {
        self.handles.contains_key(&(surface, index))
    }

    pub fn handle_input(&mut self, event: InputEvent, now_ms: u64) -> InputOutcome {
        self.engine.handle_input(event, now_ms)
    }

    pub fn into_shared(self) -> SharedController<T, H> {
        Arc::new(Mutex::new(self))
    }

    /// Runs one engine frame, then releases, mounts and moves render handles to match.
    pub fn frame(&mut self, now_ms: u64) -> FrameSummary {
        let report = self.engine.tick(now_ms);
        let mut summary = FrameSummary {
            range: report.range,
            at_rest: report.at_rest,
            ..FrameSummary::default()
        };
        self.sync_handles(&report, &mut summary);
        self.apply_transforms(&mut summary);
        if summary.mounted + summary.released > 0 {
            atrace!(
                mounted = summary.mounted,
                released = summary.released,
                live = self.handles.len(),
                "frame handles"
            );
        }
        summary
    }

    fn sync_handles(&mut self, report: &FrameReport, summary: &mut FrameSummary) {
        // A window rebuilt from scratch (e.g. after `engine_mut().teardown()`) reports no exits,
        // so handles it no longer covers are found by key instead.
        let rebuilt = report.range.filter(|range| {
            report.diff.exited.is_empty() && report.diff.entered == range.span()
        });
        if let Some(range) = rebuilt {
            summary.released += self.release_outside(range);
        } else {
            summary.released += self.release_span(report.diff.exited.clone());
        }
        for index in report.diff.entered.clone() {
            for i in 0..self.surfaces.len() {
                let surface = self.surfaces[i];
                if self.handles.contains_key(&(surface, index)) {
                    if rebuilt.is_none() {
                        awarn!(?surface, index, "slot already mounted");
                    }
                    continue;
                }
                self.mount(surface, index);
                summary.mounted += 1;
            }
        }
    }

    fn mount(&mut self, surface: Surface, index: VirtualIndex) {
        let label = self.engine.label_of(index);
        let handle = self
            .host
            .mount(surface, index, &label, self.engine.item_at(index));
        self.handles.insert((surface, index), handle);
    }

    fn release_outside(&mut self, range: VisibleRange) -> usize {
        self.release_where(|index| !range.contains(index))
    }

    /// Releases every handle whose index falls in `span`.
    fn release_span(&mut self, span: Range<VirtualIndex>) -> usize {
        if span.is_empty() {
            return 0;
        }
        self.release_where(|index| span.contains(&index))
    }

    fn release_where(&mut self, mut released: impl FnMut(VirtualIndex) -> bool) -> usize {
        let keys: Vec<(Surface, VirtualIndex)> = self
            .handles
            .keys()
            .filter(|(_, index)| released(*index))
            .copied()
            .collect();
        for key in &keys {
            if let Some(handle) = self.handles.remove(key) {
                self.host.release(handle);
            }
        }
        keys.len()
    }

    fn apply_transforms(&mut self, summary: &mut FrameSummary) {
        let Some(range) = self.engine.visible_range() else {
            return;
        };
        for &surface in &self.surfaces {
            for index in range.iter() {
                let Some(handle) = self.handles.get(&(surface, index)) else {
                    continue;
                };
                let Some(transform) = self.engine.transform(surface, index) else {
                    continue;
                };
                match self.host.apply(handle, transform) {
                    Ok(()) => summary.applied += 1,
                    Err(_stale) => {
                        awarn!(stale = %_stale, "skipping stale render handle");
                        summary.stale += 1;
                    }
                }
            }
        }
    }

    /// Releases every render handle and all engine per-element state. Returns the number of
    /// handles released.
    ///
    /// The next `frame` mounts a fresh window.
    pub fn teardown(&mut self) -> usize {
        self.engine.teardown();
        let released = self.handles.len();
        for (_, handle) in self.handles.drain() {
            self.host.release(handle);
        }
        adebug!(released, "Controller::teardown");
        released
    }
}
