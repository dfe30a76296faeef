use core::ops::{Range, RangeInclusive};

/// A slot in the infinite sequence. Any value is valid; see [`crate::ItemRing`].
pub type VirtualIndex = i64;

/// Treats a non-positive or non-finite slot size as `1.0`.
///
/// Slot sizes come from layout, which may not have happened yet (or may report zero for a
/// collapsed surface). Every division by a slot size goes through this.
pub fn effective_slot(size: f64) -> f64 {
    if size.is_finite() && size > 0.0 {
        size
    } else {
        1.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in host coordinates. The scroll axis is `y`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Edges are inclusive.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x
            && p.y >= self.y
            && p.x <= self.x + self.width
            && p.y <= self.y + self.height
    }
}

/// Inclusive range of virtual indices with live state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub min: VirtualIndex,
    pub max: VirtualIndex, // inclusive
}

impl VisibleRange {
    pub fn centered(center: VirtualIndex, buffer: i64) -> Self {
        Self {
            min: center - buffer,
            max: center + buffer,
        }
    }

    pub fn center(&self) -> VirtualIndex {
        self.min + (self.max - self.min) / 2
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        usize::try_from(self.max.abs_diff(self.min))
            .map_or(usize::MAX, |span| span.saturating_add(1))
    }

    pub fn is_empty(&self) -> bool {
        self.max < self.min
    }

    pub fn contains(&self, index: VirtualIndex) -> bool {
        index >= self.min && index <= self.max
    }

    pub fn iter(&self) -> RangeInclusive<VirtualIndex> {
        self.min..=self.max
    }

    /// The same indices as a half-open range.
    pub fn span(&self) -> Range<VirtualIndex> {
        self.min..self.max + 1
    }
}

/// A render surface the engine projects positions onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Surface {
    /// Full-bleed slides with background imagery.
    Primary,
    /// Compact thumbnails, scaled to the minimap slot size.
    Minimap,
    /// Text overlay sharing the minimap geometry.
    Caption,
}

impl Surface {
    pub const ALL: [Surface; 3] = [Surface::Primary, Surface::Minimap, Surface::Caption];

    /// Whether elements on this surface carry background imagery with a parallax layer.
    pub fn has_parallax(self) -> bool {
        matches!(self, Surface::Primary | Surface::Minimap)
    }
}

/// The per-frame output for one rendered element.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceTransform {
    pub surface: Surface,
    pub index: VirtualIndex,
    /// Translation along the scroll axis, relative to the surface origin.
    pub offset: f64,
    /// Translation of the element's background image, relative to the element.
    pub parallax: Option<f64>,
}
