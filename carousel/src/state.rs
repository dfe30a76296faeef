use crate::{Rect, VisibleRange, effective_slot};

/// Where a drag started: the pointer position on the scroll axis and the target offset at
/// that moment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragAnchor {
    pub pointer: f64,
    pub offset: f64,
}

/// The engine's single mutable record.
///
/// Hosts get read access through [`crate::Engine::state`]; only input handlers and the frame
/// step write to it.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineState {
    /// Smoothed, rendered scroll offset.
    pub current: f64,
    /// Offset the engine is driving toward.
    pub target: f64,
    pub dragging: bool,
    pub drag_anchor: Option<DragAnchor>,
    /// `None` until the first input event.
    pub last_input_ms: Option<u64>,
    /// Raw primary slot size as reported by layout; may be zero before the first layout.
    pub primary_slot_size: f64,
    pub minimap_slot_size: f64,
    /// Primary surface bounds, used to filter pointer input. `None` before the first layout.
    pub bounds: Option<Rect>,
}

impl EngineState {
    pub(crate) fn new(offset: f64, minimap_slot_size: f64) -> Self {
        Self {
            current: offset,
            target: offset,
            dragging: false,
            drag_anchor: None,
            last_input_ms: None,
            primary_slot_size: 0.0,
            minimap_slot_size,
            bounds: None,
        }
    }

    /// Primary slot size safe to divide by.
    pub fn slot_size(&self) -> f64 {
        effective_slot(self.primary_slot_size)
    }
}

/// A lightweight snapshot of the scroll state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub current: f64,
    pub target: f64,
    pub dragging: bool,
    pub snapping: bool,
}

/// Scroll state plus the geometry and window it was rendered with.
///
/// Useful for debugging overlays and tests; the engine never persists it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameState {
    pub scroll: ScrollState,
    pub range: Option<VisibleRange>,
    pub primary_slot_size: f64,
    pub minimap_slot_size: f64,
}
