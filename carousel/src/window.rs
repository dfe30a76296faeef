use core::ops::Range;

use crate::{VirtualIndex, VisibleRange, effective_slot};

/// Indices that left and entered the window in one update.
///
/// Both windows have the same length, so each side of the diff is a single contiguous span.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WindowDiff {
    pub exited: Range<VirtualIndex>,
    pub entered: Range<VirtualIndex>,
}

impl WindowDiff {
    pub fn between(prev: Option<VisibleRange>, next: VisibleRange) -> Self {
        let Some(prev) = prev else {
            return Self {
                exited: 0..0,
                entered: next.span(),
            };
        };
        debug_assert_eq!(prev.len(), next.len(), "WindowDiff: window size changed");

        if next.min > prev.max || next.max < prev.min {
            Self {
                exited: prev.span(),
                entered: next.span(),
            }
        } else if next.min >= prev.min {
            Self {
                exited: prev.min..next.min,
                entered: prev.max + 1..next.max + 1,
            }
        } else {
            Self {
                exited: next.max + 1..prev.max + 1,
                entered: next.min..prev.min,
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.exited.is_empty() && self.entered.is_empty()
    }
}

/// Tracks the contiguous range of indices that must have live render state.
#[derive(Clone, Debug)]
pub struct VirtualWindow {
    buffer: i64,
    range: Option<VisibleRange>,
}

impl VirtualWindow {
    pub fn new(buffer_size: usize) -> Self {
        Self {
            buffer: buffer_size as i64,
            range: None,
        }
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer as usize
    }

    /// Number of live indices once the window is populated.
    pub fn capacity(&self) -> usize {
        2 * self.buffer_size() + 1
    }

    pub fn range(&self) -> Option<VisibleRange> {
        self.range
    }

    /// The slot nearest to `target`, clamped so the whole window stays representable.
    pub fn center_for(&self, target: f64, slot_size: f64) -> Option<VirtualIndex> {
        let center = (-target / effective_slot(slot_size)).round();
        if !center.is_finite() {
            return None;
        }
        let lo = VirtualIndex::MIN + self.buffer;
        let hi = VirtualIndex::MAX - self.buffer - 1;
        Some((center as VirtualIndex).clamp(lo, hi))
    }

    /// Recenters on `target` and reports what changed.
    ///
    /// A non-finite target keeps the previous window.
    pub fn update(&mut self, target: f64, slot_size: f64) -> WindowDiff {
        let Some(center) = self.center_for(target, slot_size) else {
            cwarn!(offset = target, "non-finite target offset; window unchanged");
            return WindowDiff::default();
        };
        let next = VisibleRange::centered(center, self.buffer);
        if self.range == Some(next) {
            return WindowDiff::default();
        }
        let diff = WindowDiff::between(self.range, next);
        ctrace!(min = next.min, max = next.max, "window moved");
        self.range = Some(next);
        diff
    }

    /// Empties the window, returning the range that was live.
    pub fn clear(&mut self) -> Option<VisibleRange> {
        self.range.take()
    }
}
