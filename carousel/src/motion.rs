/// What the current offset does while a drag is in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DragPolicy {
    /// Keep smoothing toward the dragged target. Slight lag, no visual discontinuity.
    #[default]
    Smooth,
    /// Jump to the dragged target every frame (1:1 feel).
    Follow,
    /// Freeze until the drag ends, then catch up.
    Hold,
}

pub fn lerp(start: f64, end: f64, factor: f64) -> f64 {
    start + (end - start) * factor
}

/// One exponential smoothing step that lands exactly on `target` once within `epsilon`.
pub(crate) fn approach(current: f64, target: f64, factor: f64, epsilon: f64) -> f64 {
    let next = lerp(current, target, factor);
    if (target - next).abs() <= epsilon {
        target
    } else {
        next
    }
}

/// Advances the smoothed current offset toward the target offset once per frame.
///
/// For `0 < factor <= 1` every step moves strictly toward the target without crossing it, and
/// the settle epsilon bounds the number of steps needed to arrive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionIntegrator {
    factor: f64,
    settle_epsilon: f64,
    policy: DragPolicy,
}

impl MotionIntegrator {
    pub fn new(factor: f64, settle_epsilon: f64, policy: DragPolicy) -> Self {
        Self {
            factor,
            settle_epsilon,
            policy,
        }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn policy(&self) -> DragPolicy {
        self.policy
    }

    pub fn step(&self, current: f64, target: f64, dragging: bool) -> f64 {
        if !target.is_finite() {
            return current;
        }
        if dragging {
            match self.policy {
                DragPolicy::Smooth => {}
                DragPolicy::Follow => return target,
                DragPolicy::Hold => return current,
            }
        }
        approach(current, target, self.factor, self.settle_epsilon)
    }

    /// Upper bound on the steps needed to settle from `distance` away.
    pub fn steps_to_settle(&self, distance: f64) -> u64 {
        let distance = distance.abs();
        if distance == 0.0 {
            return 0;
        }
        if self.factor >= 1.0 {
            return 1;
        }
        if self.settle_epsilon <= 0.0 {
            return u64::MAX;
        }
        let steps = (self.settle_epsilon / distance).ln() / (1.0 - self.factor).ln();
        // One extra step absorbs rounding in the repeated multiplication.
        steps.ceil() as u64 + 1
    }
}
