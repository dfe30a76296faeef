use crate::{DragAnchor, Engine, Point, Rect, SnapPhase, VirtualIndex, effective_slot};

/// A device or programmatic input, already translated out of the host's event types.
///
/// Pointer positions are in the same coordinate space as the bounds passed with `Resize`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputEvent {
    /// Wheel or trackpad delta along the scroll axis (positive = scroll forward).
    Wheel { delta: f64, position: Point },
    TouchStart { position: Point },
    TouchMove { position: Point },
    TouchEnd,
    /// The primary surface was laid out (or resized) to `bounds`.
    Resize { bounds: Rect },
    /// Ease to a specific slot.
    SnapTo { index: VirtualIndex },
    /// Ease `by` slots forward (positive) or backward from the current one.
    Step { by: i64 },
}

/// Whether an input changed the engine. Hosts can use this to decide whether to consume the
/// platform event (e.g. prevent default page scrolling).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    Applied,
    Ignored,
}

impl InputOutcome {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

impl<T> Engine<T> {
    pub fn handle_input(&mut self, event: InputEvent, now_ms: u64) -> InputOutcome {
        match event {
            InputEvent::Wheel { delta, position } => self.on_wheel(delta, position, now_ms),
            InputEvent::TouchStart { position } => self.on_touch_start(position, now_ms),
            InputEvent::TouchMove { position } => self.on_touch_move(position, now_ms),
            InputEvent::TouchEnd => self.on_touch_end(now_ms),
            InputEvent::Resize { bounds } => self.on_resize(bounds),
            InputEvent::SnapTo { index } => self.snap_to_index(index, now_ms),
            InputEvent::Step { by } => self.step(by, now_ms),
        }
    }

    /// Pointer input only counts when it lands on the primary surface. Before the first
    /// layout nothing does.
    fn accepts_pointer(&self, position: Point) -> bool {
        self.state.bounds.is_some_and(|b| b.contains(position))
    }

    pub fn on_wheel(&mut self, delta: f64, position: Point, now_ms: u64) -> InputOutcome {
        if !delta.is_finite() || !self.accepts_pointer(position) {
            return InputOutcome::Ignored;
        }
        let max = self.options.max_velocity;
        let step = (delta * self.options.scroll_speed).clamp(-max, max);
        self.snap.cancel();
        self.state.last_input_ms = Some(now_ms);
        self.state.target -= step;
        ctrace!(delta, step, offset = self.state.target, "wheel");
        InputOutcome::Applied
    }

    pub fn on_touch_start(&mut self, position: Point, now_ms: u64) -> InputOutcome {
        if !self.accepts_pointer(position) {
            return InputOutcome::Ignored;
        }
        self.snap.cancel();
        self.state.dragging = true;
        self.state.drag_anchor = Some(DragAnchor {
            pointer: position.y,
            offset: self.state.target,
        });
        self.state.last_input_ms = Some(now_ms);
        ctrace!(y = position.y, "drag start");
        InputOutcome::Applied
    }

    pub fn on_touch_move(&mut self, position: Point, now_ms: u64) -> InputOutcome {
        if !self.state.dragging || !self.accepts_pointer(position) {
            return InputOutcome::Ignored;
        }
        let Some(anchor) = self.state.drag_anchor else {
            return InputOutcome::Ignored;
        };
        self.state.target =
            anchor.offset + (position.y - anchor.pointer) * self.options.drag_multiplier;
        self.state.last_input_ms = Some(now_ms);
        InputOutcome::Applied
    }

    /// Ends a drag wherever the pointer is. Snapping is left to the inactivity timer.
    pub fn on_touch_end(&mut self, now_ms: u64) -> InputOutcome {
        if !self.state.dragging {
            return InputOutcome::Ignored;
        }
        self.state.dragging = false;
        self.state.drag_anchor = None;
        self.state.last_input_ms = Some(now_ms);
        ctrace!(offset = self.state.target, "drag end");
        InputOutcome::Applied
    }

    /// Records new primary bounds. The slot size follows the bounds height.
    ///
    /// Offsets are rescaled so the same fractional slot stays in view.
    pub fn on_resize(&mut self, bounds: Rect) -> InputOutcome {
        let prev = self.state.slot_size();
        let next = effective_slot(bounds.height);
        if next != prev {
            let ratio = next / prev;
            self.state.current *= ratio;
            self.state.target *= ratio;
            if let Some(anchor) = self.state.drag_anchor.as_mut() {
                anchor.offset *= ratio;
            }
            self.snap.rescale(ratio);
            cdebug!(prev, next, "slot size changed");
        }
        self.state.primary_slot_size = bounds.height;
        self.state.bounds = Some(bounds);
        InputOutcome::Applied
    }

    /// Eases the target onto slot `index`, cancelling any drag.
    pub fn snap_to_index(&mut self, index: VirtualIndex, now_ms: u64) -> InputOutcome {
        let to = -(index as f64) * self.slot_size();
        if !to.is_finite() {
            return InputOutcome::Ignored;
        }
        self.state.dragging = false;
        self.state.drag_anchor = None;
        self.state.last_input_ms = Some(now_ms);
        self.snap.start(self.state.target, to, now_ms);
        InputOutcome::Applied
    }

    /// Eases `by` slots away from the slot nearest to the target, or from the slot an
    /// in-flight snap is heading to.
    pub fn step(&mut self, by: i64, now_ms: u64) -> InputOutcome {
        let from = match self.snap.phase() {
            SnapPhase::Snapping(tween) => self.window.center_for(tween.to, self.slot_size()),
            SnapPhase::Idle => None,
        };
        let index = from
            .unwrap_or_else(|| self.current_index())
            .saturating_add(by);
        self.snap_to_index(index, now_ms)
    }
}
