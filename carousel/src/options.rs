use crate::{CarouselError, DragPolicy, Easing, IndexMapping, VirtualIndex};

/// Upper bound for [`CarouselOptions::buffer_size`].
pub const MAX_BUFFER_SIZE: usize = 4096;

const MINIMAP_SLOT_SIZE: f64 = 250.0;
const COMPACT_MINIMAP_SLOT_SIZE: f64 = 180.0;

/// Configuration for [`crate::Engine`].
///
/// All fields are public so hosts can tweak a few and keep the rest. With `feature = "serde"`
/// this type implements `Serialize`/`Deserialize`; missing fields fall back to
/// [`CarouselOptions::new`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselOptions {
    /// Multiplier applied to raw wheel deltas.
    pub scroll_speed: f64,
    /// Maximum magnitude of a single (scaled) wheel step.
    pub max_velocity: f64,
    /// Multiplier applied to touch-drag distance. Must be greater than 1.
    pub drag_multiplier: f64,

    /// Fraction of the remaining distance the current offset covers each frame.
    pub lerp_factor: f64,
    /// Distance under which the current offset lands exactly on the target.
    pub settle_epsilon: f64,
    pub drag_policy: DragPolicy,

    /// Number of live slots on each side of the centered one.
    pub buffer_size: usize,

    /// Input inactivity (ms) after which an unaligned target is snapped.
    pub snap_idle_ms: u64,
    pub snap_duration_ms: u64,
    /// Distance from a slot boundary still considered aligned.
    pub snap_tolerance: f64,
    pub snap_easing: Easing,

    pub index_mapping: IndexMapping,

    /// Compact display mode. Only changes the minimap geometry.
    pub compact: bool,
    /// Slot size of the minimap and caption surfaces. `None` picks the default for the
    /// display mode.
    pub minimap_slot_size: Option<f64>,

    /// Parallax drift per unit of slide displacement.
    pub parallax_strength: f64,
    /// Smoothing factor of the per-element parallax layer.
    pub parallax_lerp: f64,
    pub parallax_epsilon: f64,
    /// Scale renderers should apply to parallax images so the drift never shows an edge.
    pub image_scale: f64,

    /// The slot centered on the primary surface before any input.
    pub initial_index: VirtualIndex,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl CarouselOptions {
    pub fn new() -> Self {
        Self {
            scroll_speed: 0.75,
            max_velocity: 150.0,
            drag_multiplier: 1.5,
            lerp_factor: 0.05,
            settle_epsilon: 0.01,
            drag_policy: DragPolicy::default(),
            buffer_size: 5,
            snap_idle_ms: 100,
            snap_duration_ms: 500,
            snap_tolerance: 1.0,
            snap_easing: Easing::EaseOutCubic,
            index_mapping: IndexMapping::default(),
            compact: false,
            minimap_slot_size: None,
            parallax_strength: 0.2,
            parallax_lerp: 0.1,
            parallax_epsilon: 0.01,
            image_scale: 1.5,
            initial_index: 0,
        }
    }

    /// Options for the compact display mode (smaller minimap).
    pub fn compact() -> Self {
        Self::new().with_compact(true)
    }

    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// The minimap slot size in effect: the explicit override, or the display mode default.
    pub fn minimap_slot(&self) -> f64 {
        self.minimap_slot_size.unwrap_or(if self.compact {
            COMPACT_MINIMAP_SLOT_SIZE
        } else {
            MINIMAP_SLOT_SIZE
        })
    }

    pub fn with_scroll_speed(mut self, scroll_speed: f64) -> Self {
        self.scroll_speed = scroll_speed;
        self
    }

    pub fn with_max_velocity(mut self, max_velocity: f64) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    pub fn with_drag_multiplier(mut self, drag_multiplier: f64) -> Self {
        self.drag_multiplier = drag_multiplier;
        self
    }

    pub fn with_lerp_factor(mut self, lerp_factor: f64) -> Self {
        self.lerp_factor = lerp_factor;
        self
    }

    pub fn with_drag_policy(mut self, drag_policy: DragPolicy) -> Self {
        self.drag_policy = drag_policy;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_snap_idle_ms(mut self, snap_idle_ms: u64) -> Self {
        self.snap_idle_ms = snap_idle_ms;
        self
    }

    pub fn with_snap_duration_ms(mut self, snap_duration_ms: u64) -> Self {
        self.snap_duration_ms = snap_duration_ms;
        self
    }

    pub fn with_snap_easing(mut self, snap_easing: Easing) -> Self {
        self.snap_easing = snap_easing;
        self
    }

    pub fn with_index_mapping(mut self, index_mapping: IndexMapping) -> Self {
        self.index_mapping = index_mapping;
        self
    }

    pub fn with_minimap_slot_size(mut self, minimap_slot_size: f64) -> Self {
        self.minimap_slot_size = Some(minimap_slot_size);
        self
    }

    pub fn with_parallax(mut self, strength: f64, lerp: f64) -> Self {
        self.parallax_strength = strength;
        self.parallax_lerp = lerp;
        self
    }

    pub fn with_initial_index(mut self, initial_index: VirtualIndex) -> Self {
        self.initial_index = initial_index;
        self
    }

    /// Rejects values that would break convergence or the window bounds.
    pub fn validate(&self) -> Result<(), CarouselError> {
        fn fraction(name: &'static str, value: f64) -> Result<(), CarouselError> {
            if value > 0.0 && value <= 1.0 {
                Ok(())
            } else {
                Err(CarouselError::InvalidOption { name, value })
            }
        }

        fn positive(name: &'static str, value: f64) -> Result<(), CarouselError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(CarouselError::InvalidOption { name, value })
            }
        }

        fn non_negative(name: &'static str, value: f64) -> Result<(), CarouselError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(CarouselError::InvalidOption { name, value })
            }
        }

        fraction("lerp_factor", self.lerp_factor)?;
        fraction("parallax_lerp", self.parallax_lerp)?;
        positive("scroll_speed", self.scroll_speed)?;
        positive("max_velocity", self.max_velocity)?;
        positive("minimap_slot_size", self.minimap_slot())?;
        positive("image_scale", self.image_scale)?;
        non_negative("settle_epsilon", self.settle_epsilon)?;
        non_negative("snap_tolerance", self.snap_tolerance)?;
        non_negative("parallax_epsilon", self.parallax_epsilon)?;
        if !self.parallax_strength.is_finite() {
            return Err(CarouselError::InvalidOption {
                name: "parallax_strength",
                value: self.parallax_strength,
            });
        }
        if !(self.drag_multiplier.is_finite() && self.drag_multiplier > 1.0) {
            return Err(CarouselError::InvalidOption {
                name: "drag_multiplier",
                value: self.drag_multiplier,
            });
        }
        if self.snap_duration_ms == 0 {
            return Err(CarouselError::InvalidOption {
                name: "snap_duration_ms",
                value: 0.0,
            });
        }
        if self.buffer_size > MAX_BUFFER_SIZE {
            return Err(CarouselError::InvalidOption {
                name: "buffer_size",
                value: self.buffer_size as f64,
            });
        }
        Ok(())
    }
}
