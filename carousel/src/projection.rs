use crate::{Surface, VirtualIndex, effective_slot};

/// Slot sizes of the render surfaces.
///
/// The primary surface scrolls by `current`; the minimap and caption surfaces scroll by the
/// same offset rescaled to their own slot size, so every surface shows the same slot at the
/// same time.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceGeometry {
    pub primary_slot: f64,
    pub minimap_slot: f64,
}

impl SurfaceGeometry {
    pub fn slot(&self, surface: Surface) -> f64 {
        match surface {
            Surface::Primary => effective_slot(self.primary_slot),
            Surface::Minimap | Surface::Caption => effective_slot(self.minimap_slot),
        }
    }

    pub fn scroll_offset(&self, surface: Surface, current: f64) -> f64 {
        match surface {
            Surface::Primary => current,
            Surface::Minimap | Surface::Caption => {
                current * self.slot(Surface::Minimap) / self.slot(Surface::Primary)
            }
        }
    }

    pub fn position(&self, surface: Surface, index: VirtualIndex, current: f64) -> f64 {
        index as f64 * self.slot(surface) + self.scroll_offset(surface, current)
    }
}
