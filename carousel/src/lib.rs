//! A headless engine for infinite, virtualized, parallax carousels.
//!
//! For frame-loop and render-host plumbing, see the `carousel-adapter` crate.
//!
//! The engine maps an unbounded signed index space onto a finite, non-empty item list and
//! animates a single scroll offset through it: wheel and drag input move a target offset,
//! a smoothed current offset chases it every frame, and after a short pause the target is
//! eased onto the nearest item boundary. Only a fixed window of indices around the target
//! has live state at any time, no matter how far the user scrolls.
//!
//! It is UI-agnostic. A host is expected to provide:
//! - the primary surface bounds (on mount and on every resize)
//! - input events with their pointer positions
//! - a frame tick with a millisecond timestamp
//!
//! and in return reads one numeric offset per rendered element per surface.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod engine;
mod error;
mod input;
mod motion;
mod options;
mod parallax;
mod projection;
mod ring;
mod snap;
mod state;
mod tween;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use engine::{Engine, FrameReport};
pub use error::CarouselError;
pub use input::{InputEvent, InputOutcome};
pub use motion::{DragPolicy, MotionIntegrator, lerp};
pub use options::{CarouselOptions, MAX_BUFFER_SIZE};
pub use parallax::{ParallaxLayer, ParallaxSample};
pub use projection::SurfaceGeometry;
pub use ring::{IndexMapping, ItemRing};
pub use snap::{SnapController, SnapPhase, nearest_boundary};
pub use state::{DragAnchor, EngineState, FrameState, ScrollState};
pub use tween::{Easing, Tween};
pub use types::{Point, Rect, Surface, SurfaceTransform, VirtualIndex, VisibleRange, effective_slot};
pub use window::{VirtualWindow, WindowDiff};
