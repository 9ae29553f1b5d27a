//! Source of the device scale factor.

use std::cell::Cell;
use std::rc::Rc;

/// The presentation environment windows are shown in.
pub trait DisplayEnvironment {
    /// Physical pixels per logical unit, read at the moment of each resize.
    fn scale_factor(&self) -> f64;
}

/// A display whose scale factor never changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedDisplay(pub f64);

impl DisplayEnvironment for FixedDisplay {
    fn scale_factor(&self) -> f64 {
        self.0
    }
}

impl Default for FixedDisplay {
    fn default() -> Self {
        Self(1.0)
    }
}

/// A scale factor the host can change while the bridge holds a clone,
/// e.g. when the output moves to a monitor with a different density.
#[derive(Debug, Clone)]
pub struct SharedDisplay(Rc<Cell<f64>>);

impl SharedDisplay {
    pub fn new(scale_factor: f64) -> Self {
        Self(Rc::new(Cell::new(scale_factor)))
    }

    pub fn set(&self, scale_factor: f64) {
        self.0.set(scale_factor);
    }
}

impl DisplayEnvironment for SharedDisplay {
    fn scale_factor(&self) -> f64 {
        self.0.get()
    }
}
