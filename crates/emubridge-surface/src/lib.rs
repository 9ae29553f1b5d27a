//! Window and surface state driven by the emulation engine.
//!
//! Provides:
//! - A software [`Canvas`] with separate logical and physical sizes
//! - A 2D [`DrawContext`] (scale transform, image smoothing)
//! - The per-window [`Window`] entity
//! - [`SurfaceManager`], which owns every live window and applies
//!   engine window operations, notifying a [`WindowObserver`] of
//!   structural changes

pub mod canvas;
pub mod context;
pub mod display;
pub mod manager;
pub mod window;

pub use canvas::Canvas;
pub use context::{DrawContext, Transform};
pub use display::{DisplayEnvironment, FixedDisplay, SharedDisplay};
pub use manager::{SurfaceManager, WindowObserver};
pub use window::{Window, WindowInfo};
