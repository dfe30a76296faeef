use crate::{Easing, Tween, effective_slot};

/// The boundary of the slot nearest to `target`.
///
/// Offsets decrease as indices increase, so slot `i` starts at `-i * slot_size`. Ties round
/// away from zero on the slot index.
pub fn nearest_boundary(target: f64, slot_size: f64) -> f64 {
    let slot_size = effective_slot(slot_size);
    -(-target / slot_size).round() * slot_size
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnapPhase {
    #[default]
    Idle,
    Snapping(Tween),
}

/// Decides when to ease the target offset onto a slot boundary, and drives that ease.
///
/// The controller never reads input itself: the engine hands it the last input timestamp and
/// cancels it whenever the user scrolls or drags.
#[derive(Clone, Debug)]
pub struct SnapController {
    idle_ms: u64,
    duration_ms: u64,
    tolerance: f64,
    easing: Easing,
    phase: SnapPhase,
}

impl SnapController {
    pub fn new(idle_ms: u64, duration_ms: u64, tolerance: f64, easing: Easing) -> Self {
        Self {
            idle_ms,
            duration_ms,
            tolerance,
            easing,
            phase: SnapPhase::Idle,
        }
    }

    pub fn phase(&self) -> SnapPhase {
        self.phase
    }

    pub fn is_snapping(&self) -> bool {
        matches!(self.phase, SnapPhase::Snapping(_))
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Returns `true` if a snap was in flight.
    pub fn cancel(&mut self) -> bool {
        let was = self.is_snapping();
        self.phase = SnapPhase::Idle;
        was
    }

    /// Starts (or replaces) a snap from `from` to `to`.
    pub fn start(&mut self, from: f64, to: f64, now_ms: u64) {
        cdebug!(from, to, now_ms, "snap start");
        self.phase = SnapPhase::Snapping(Tween::new(
            from,
            to,
            now_ms,
            self.duration_ms,
            self.easing,
        ));
    }

    /// Scales an in-flight snap after the slot size changed by `ratio`.
    pub fn rescale(&mut self, ratio: f64) {
        if let SnapPhase::Snapping(tween) = &mut self.phase {
            tween.from *= ratio;
            tween.to *= ratio;
        }
    }

    /// Whether an idle snap should launch now.
    pub fn should_snap(
        &self,
        target: f64,
        slot_size: f64,
        dragging: bool,
        last_input_ms: Option<u64>,
        now_ms: u64,
    ) -> bool {
        if dragging || self.is_snapping() || !target.is_finite() {
            return false;
        }
        if let Some(last) = last_input_ms {
            if now_ms.saturating_sub(last) <= self.idle_ms {
                return false;
            }
        }
        (target - nearest_boundary(target, slot_size)).abs() > self.tolerance
    }

    /// Runs one frame of the state machine.
    ///
    /// Returns the new target offset while snapping, `None` when idle.
    pub fn update(
        &mut self,
        target: f64,
        slot_size: f64,
        dragging: bool,
        last_input_ms: Option<u64>,
        now_ms: u64,
    ) -> Option<f64> {
        if self.should_snap(target, slot_size, dragging, last_input_ms, now_ms) {
            self.start(target, nearest_boundary(target, slot_size), now_ms);
        }

        let SnapPhase::Snapping(tween) = self.phase else {
            return None;
        };
        let next = tween.sample(now_ms);
        if tween.is_done(now_ms) {
            ctrace!(to = tween.to, "snap done");
            self.phase = SnapPhase::Idle;
        }
        Some(next)
    }
}
