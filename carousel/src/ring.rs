use crate::{CarouselError, VirtualIndex};

/// How a virtual index is folded onto the item list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IndexMapping {
    /// `i mod N` with a non-negative result. Periodic over every integer, so scrolling
    /// backwards from item 0 shows the last item.
    #[default]
    Circular,
    /// `|i| mod N`. Symmetric about zero: scrolling backwards from item 0 replays the list
    /// from item 1 onwards.
    Mirrored,
}

impl IndexMapping {
    /// Folds `index` onto `0..len`. `len` must be non-zero.
    pub fn wrap(self, index: VirtualIndex, len: usize) -> usize {
        debug_assert!(len > 0, "IndexMapping::wrap: empty ring");
        match self {
            Self::Circular => (index as i128).rem_euclid(len as i128) as usize,
            Self::Mirrored => (index.unsigned_abs() % len as u64) as usize,
        }
    }
}

/// A non-empty, immutable item list addressed by unbounded virtual indices.
#[derive(Clone, Debug)]
pub struct ItemRing<T> {
    items: Vec<T>,
    mapping: IndexMapping,
}

impl<T> ItemRing<T> {
    pub fn new(items: Vec<T>) -> Result<Self, CarouselError> {
        Self::with_mapping(items, IndexMapping::default())
    }

    pub fn with_mapping(items: Vec<T>, mapping: IndexMapping) -> Result<Self, CarouselError> {
        if items.is_empty() {
            return Err(CarouselError::EmptyItems);
        }
        Ok(Self { items, mapping })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn mapping(&self) -> IndexMapping {
        self.mapping
    }

    /// Position in `items()` of the item shown at `index`.
    pub fn wrap(&self, index: VirtualIndex) -> usize {
        self.mapping.wrap(index, self.items.len())
    }

    pub fn item_at(&self, index: VirtualIndex) -> &T {
        &self.items[self.wrap(index)]
    }

    /// 1-based ordinal of the item at `index`, zero-padded to two digits (`"01"`, `"12"`,
    /// `"100"`).
    pub fn label_of(&self, index: VirtualIndex) -> String {
        format!("{:02}", self.wrap(index) + 1)
    }
}

