use crate::{
    CarouselError, CarouselOptions, EngineState, FrameState, ItemRing, MotionIntegrator,
    ParallaxLayer, ScrollState, SnapController, SnapPhase, Surface, SurfaceGeometry,
    SurfaceTransform, VirtualIndex, VirtualWindow, VisibleRange, WindowDiff,
};

/// What one call to [`Engine::tick`] did.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    pub now_ms: u64,
    /// The window after this frame. `None` only if the target offset was never finite.
    pub range: Option<VisibleRange>,
    /// Indices whose render state must be released / created this frame.
    pub diff: WindowDiff,
    pub snapping: bool,
    /// No drag, no snap, current offset on target and every parallax layer settled.
    pub at_rest: bool,
}

/// The carousel engine.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects.
/// - Your adapter feeds it input events and a frame tick.
/// - Rendering reads per-element offsets via [`Engine::for_each_transform`].
///
/// Each [`Engine::tick`] runs, in order: the snap controller, the motion integrator, the
/// virtualization window, and the parallax layers. Input handlers (see [`crate::InputEvent`])
/// only write to the engine state between ticks.
///
/// For a frame loop with render-handle bookkeeping, see the `carousel-adapter` crate.
#[derive(Clone, Debug)]
pub struct Engine<T> {
    pub(crate) ring: ItemRing<T>,
    pub(crate) options: CarouselOptions,
    pub(crate) state: EngineState,
    pub(crate) motion: MotionIntegrator,
    pub(crate) snap: SnapController,
    pub(crate) window: VirtualWindow,
    primary_parallax: ParallaxLayer,
    minimap_parallax: ParallaxLayer,
    frames: u64,
}

impl<T> Engine<T> {
    /// Creates an engine over `items`.
    ///
    /// Fails if `items` is empty or `options` does not validate.
    pub fn new(items: Vec<T>, options: CarouselOptions) -> Result<Self, CarouselError> {
        let ring = ItemRing::with_mapping(items, options.index_mapping)?;
        Self::from_ring(ring, options)
    }

    pub fn from_ring(ring: ItemRing<T>, options: CarouselOptions) -> Result<Self, CarouselError> {
        options.validate()?;
        cdebug!(
            items = ring.len(),
            buffer_size = options.buffer_size,
            compact = options.compact,
            "Engine::new"
        );
        let parallax = || {
            ParallaxLayer::new(
                options.parallax_strength,
                options.parallax_lerp,
                options.parallax_epsilon,
            )
        };
        // Until the first layout the slot size is 1, so the initial offset is in slot units.
        let initial_offset = -(options.initial_index as f64);
        Ok(Self {
            state: EngineState::new(initial_offset, options.minimap_slot()),
            motion: MotionIntegrator::new(
                options.lerp_factor,
                options.settle_epsilon,
                options.drag_policy,
            ),
            snap: SnapController::new(
                options.snap_idle_ms,
                options.snap_duration_ms,
                options.snap_tolerance,
                options.snap_easing,
            ),
            window: VirtualWindow::new(options.buffer_size),
            primary_parallax: parallax(),
            minimap_parallax: parallax(),
            ring,
            options,
            frames: 0,
        })
    }

    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    pub fn ring(&self) -> &ItemRing<T> {
        &self.ring
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    pub fn item_at(&self, index: VirtualIndex) -> &T {
        self.ring.item_at(index)
    }

    pub fn label_of(&self, index: VirtualIndex) -> String {
        self.ring.label_of(index)
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn current_offset(&self) -> f64 {
        self.state.current
    }

    pub fn target_offset(&self) -> f64 {
        self.state.target
    }

    pub fn is_dragging(&self) -> bool {
        self.state.dragging
    }

    pub fn is_snapping(&self) -> bool {
        self.snap.is_snapping()
    }

    pub fn snap_phase(&self) -> SnapPhase {
        self.snap.phase()
    }

    /// Primary slot size safe to divide by.
    pub fn slot_size(&self) -> f64 {
        self.state.slot_size()
    }

    pub fn geometry(&self) -> SurfaceGeometry {
        SurfaceGeometry {
            primary_slot: self.state.primary_slot_size,
            minimap_slot: self.state.minimap_slot_size,
        }
    }

    /// Sets the slot size of the minimap and caption surfaces.
    pub fn set_minimap_slot_size(&mut self, size: f64) {
        self.state.minimap_slot_size = size;
    }

    /// The slot the target offset is nearest to; the window is centered on it.
    pub fn current_index(&self) -> VirtualIndex {
        self.window
            .center_for(self.state.target, self.slot_size())
            .or_else(|| self.window.range().map(|r| r.center()))
            .unwrap_or(self.options.initial_index)
    }

    /// The slot the rendered (smoothed) offset is nearest to.
    pub fn focused_index(&self) -> VirtualIndex {
        self.window
            .center_for(self.state.current, self.slot_size())
            .unwrap_or_else(|| self.current_index())
    }

    pub fn visible_range(&self) -> Option<VisibleRange> {
        self.window.range()
    }

    pub fn buffer_size(&self) -> usize {
        self.window.buffer_size()
    }

    /// Number of live parallax entries on a surface. Never exceeds `2 * buffer_size + 1`.
    pub fn live_len(&self, surface: Surface) -> usize {
        self.parallax_layer(surface).map_or(0, ParallaxLayer::len)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            current: self.state.current,
            target: self.state.target,
            dragging: self.state.dragging,
            snapping: self.snap.is_snapping(),
        }
    }

    pub fn frame_state(&self) -> FrameState {
        FrameState {
            scroll: self.scroll_state(),
            range: self.window.range(),
            primary_slot_size: self.state.primary_slot_size,
            minimap_slot_size: self.state.minimap_slot_size,
        }
    }

    pub fn is_at_rest(&self) -> bool {
        !self.state.dragging
            && !self.snap.is_snapping()
            && self.state.current == self.state.target
            && self.primary_parallax.is_settled()
            && self.minimap_parallax.is_settled()
    }

    /// Runs one frame: snap, motion, window, parallax.
    pub fn tick(&mut self, now_ms: u64) -> FrameReport {
        self.frames = self.frames.wrapping_add(1);
        let slot = self.slot_size();

        if let Some(target) = self.snap.update(
            self.state.target,
            slot,
            self.state.dragging,
            self.state.last_input_ms,
            now_ms,
        ) {
            self.state.target = target;
        }

        self.state.current =
            self.motion
                .step(self.state.current, self.state.target, self.state.dragging);

        let diff = self.window.update(self.state.target, slot);
        if !diff.is_empty() {
            self.primary_parallax.apply_diff(&diff);
            self.minimap_parallax.apply_diff(&diff);
        }

        let geometry = self.geometry();
        let current = self.state.current;
        self.primary_parallax.update(
            geometry.scroll_offset(Surface::Primary, current),
            geometry.slot(Surface::Primary),
        );
        self.minimap_parallax.update(
            geometry.scroll_offset(Surface::Minimap, current),
            geometry.slot(Surface::Minimap),
        );

        FrameReport {
            now_ms,
            range: self.window.range(),
            diff,
            snapping: self.snap.is_snapping(),
            at_rest: self.is_at_rest(),
        }
    }

    /// The transform of one element, or `None` if `index` is not live.
    pub fn transform(&self, surface: Surface, index: VirtualIndex) -> Option<SurfaceTransform> {
        if !self.window.range()?.contains(index) {
            return None;
        }
        let offset = self
            .geometry()
            .position(surface, index, self.state.current);
        let parallax = match self.parallax_layer(surface) {
            Some(layer) => Some(layer.get(index)?.value),
            None => None,
        };
        Some(SurfaceTransform {
            surface,
            index,
            offset,
            parallax,
        })
    }

    /// Emits the transform of every live element on every surface, surface by surface, in
    /// ascending index order.
    pub fn for_each_transform(&self, mut f: impl FnMut(SurfaceTransform)) {
        let Some(range) = self.window.range() else {
            return;
        };
        for surface in Surface::ALL {
            for index in range.iter() {
                if let Some(t) = self.transform(surface, index) {
                    f(t);
                }
            }
        }
    }

    pub fn collect_transforms(&self, out: &mut Vec<SurfaceTransform>) {
        out.clear();
        self.for_each_transform(|t| out.push(t));
    }

    /// Releases all per-element state and returns the range that was live.
    ///
    /// Scroll state is kept; the next tick repopulates the window from scratch.
    pub fn teardown(&mut self) -> Option<VisibleRange> {
        self.primary_parallax.clear();
        self.minimap_parallax.clear();
        let range = self.window.clear();
        cdebug!(?range, "Engine::teardown");
        range
    }

    pub(crate) fn parallax_layer(&self, surface: Surface) -> Option<&ParallaxLayer> {
        match surface {
            Surface::Primary => Some(&self.primary_parallax),
            Surface::Minimap => Some(&self.minimap_parallax),
            Surface::Caption => None,
        }
    }
}
