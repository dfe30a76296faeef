use carousel::{Surface, SurfaceTransform, VirtualIndex};

/// A render handle was torn down by the host before the controller released it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("render handle for {surface:?} slot {index} is no longer attached")]
pub struct StaleHandle {
    pub surface: Surface,
    pub index: VirtualIndex,
}

/// The UI side of a carousel: creates, moves and destroys one element per live slot per
/// surface.
///
/// The controller guarantees that at most one handle exists per `(surface, index)` pair, that
/// every mounted handle is eventually passed to `release`, and that `apply` is only called with
/// handles that have not been released.
pub trait RenderHost<T> {
    type Handle;

    /// Creates the element for `index` on `surface`. `label` is the item's display ordinal.
    fn mount(
        &mut self,
        surface: Surface,
        index: VirtualIndex,
        label: &str,
        item: &T,
    ) -> Self::Handle;

    /// Moves an element. An error means the element is gone; the frame continues.
    fn apply(
        &mut self,
        handle: &Self::Handle,
        transform: SurfaceTransform,
    ) -> Result<(), StaleHandle>;

    fn release(&mut self, handle: Self::Handle);
}
