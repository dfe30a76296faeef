//! Frame-loop and render-host plumbing for the `carousel` crate.
//!
//! The `carousel` crate is UI-agnostic and focuses on the math and state. This crate provides
//! the framework-neutral pieces a host needs around it:
//!
//! - A cooperative frame ticker with RAII subscriptions (register once, deregister exactly once)
//! - A render-host trait plus keyed handle bookkeeping that follows the virtualization window
//! - A mount guard that wires a controller to a ticker and tears both down on drop
//!
//! This crate is intentionally framework-agnostic (no DOM/winit/egui bindings).
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod controller;
mod host;
mod mount;
mod ticker;


pub use controller::{Controller, FrameSummary, SharedController};
pub use host::{RenderHost, StaleHandle};
pub use mount::{Mounted, MountError};
pub use ticker::{Subscription, TickResult, Ticker};
