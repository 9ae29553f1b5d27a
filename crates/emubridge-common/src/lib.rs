//! Shared types and error taxonomy for the emubridge workspace.

pub mod bitmap;
pub mod errors;
pub mod types;

pub use bitmap::Bitmap;
pub use errors::{BridgeError, ConfigError, ProtocolError};
pub use types::{LogLevel, LogicalSize, PhysicalSize, WindowHandle};

pub type Result<T> = std::result::Result<T, BridgeError>;
