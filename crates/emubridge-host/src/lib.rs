//! Host side of the emulator bridge.
//!
//! [`Emulator`] is the single dispatch target for everything the engine
//! sends: window operations go to its [`SurfaceManager`], and log, stdout
//! and exit signals go to the host callbacks. It also holds the outbound
//! proxy used to [`Emulator::start`] the engine.
//!
//! [`SurfaceManager`]: emubridge_surface::SurfaceManager

pub mod decoder;
pub mod diagnostics;
pub mod emulator;
pub mod host;

pub use decoder::Utf8StreamDecoder;
pub use diagnostics::{Diagnostics, MemoryDiagnostics, TracingDiagnostics};
pub use emulator::{init_worker, Emulator};
pub use host::EmulatorHost;
pub use emubridge_surface::WindowObserver;
