use std::collections::HashMap;
use std::ops::Range;

use crate::motion::approach;
use crate::{VirtualIndex, WindowDiff, effective_slot};

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParallaxSample {
    pub value: f64,
    /// The value has reached its target and will not move until the scroll offset does.
    pub settled: bool,
}

/// Per-element smoothed background drift for one surface.
///
/// Entries exist only for indices inside the virtualization window. This smoothing is
/// independent from the scroll smoothing: it chases a target derived from the already
/// smoothed surface offset, so images lag slightly behind their slides.
#[derive(Clone, Debug)]
pub struct ParallaxLayer {
    strength: f64,
    factor: f64,
    epsilon: f64,
    values: HashMap<VirtualIndex, ParallaxSample>,
}

impl ParallaxLayer {
    pub fn new(strength: f64, factor: f64, epsilon: f64) -> Self {
        Self {
            strength,
            factor,
            epsilon,
            values: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: VirtualIndex) -> Option<ParallaxSample> {
        self.values.get(&index).copied()
    }

    pub fn contains(&self, index: VirtualIndex) -> bool {
        self.values.contains_key(&index)
    }

    /// The value an element at `index` drifts toward.
    pub fn target(&self, index: VirtualIndex, surface_offset: f64, slot_size: f64) -> f64 {
        (-surface_offset - index as f64 * effective_slot(slot_size)) * self.strength
    }

    pub fn apply_diff(&mut self, diff: &WindowDiff) {
        self.remove_span(diff.exited.clone());
        for index in diff.entered.clone() {
            self.values.entry(index).or_insert(ParallaxSample {
                value: 0.0,
                settled: false,
            });
        }
    }

    fn remove_span(&mut self, span: Range<VirtualIndex>) {
        if span.is_empty() {
            return;
        }
        // A span can be far larger than the layer after a long jump.
        if span.end.saturating_sub(span.start) as u64 > self.values.len() as u64 {
            self.values.retain(|index, _| !span.contains(index));
        } else {
            for index in span {
                self.values.remove(&index);
            }
        }
    }

    /// Advances every live element one step toward its target.
    pub fn update(&mut self, surface_offset: f64, slot_size: f64) {
        let slot_size = effective_slot(slot_size);
        let (strength, factor, epsilon) = (self.strength, self.factor, self.epsilon);
        for (&index, sample) in self.values.iter_mut() {
            let target = (-surface_offset - index as f64 * slot_size) * strength;
            if !target.is_finite() {
                continue;
            }
            let value = approach(sample.value, target, factor, epsilon);
            *sample = ParallaxSample {
                value,
                settled: value == target,
            };
        }
    }

    pub fn is_settled(&self) -> bool {
        self.values.values().all(|s| s.settled)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}
