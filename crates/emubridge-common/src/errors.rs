use std::path::PathBuf;

use crate::types::WindowHandle;

/// A violation of the engine/bridge message contract.
///
/// These are fatal to the call that triggered them and are never reported
/// through the host error callback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("unknown method: {0}")]
    UnknownMethod(String),

    #[error("{method}: expected {expected} argument(s), got {got}")]
    Arity {
        method: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{method}: bad argument {index}: {reason}")]
    BadArgument {
        method: &'static str,
        index: usize,
        reason: String,
    },

    #[error("malformed message: {0}")]
    Malformed(String),

    #[error("no window with handle {0}")]
    UnknownWindow(WindowHandle),

    #[error("window {0} already exists")]
    DuplicateWindow(WindowHandle),

    #[error("unexpected log level {0}")]
    LogLevel(i64),

    #[error("bitmap {width}x{height} needs {expected} bytes, got {got}")]
    BitmapSize {
        width: u32,
        height: u32,
        expected: usize,
        got: usize,
    },

    #[error("surface {width}x{height} exceeds the {max}-pixel limit")]
    SurfaceTooLarge { width: u32, height: u32, max: u64 },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("engine channel closed")]
    ChannelClosed,

    #[error("export error: {0}")]
    Export(String),
}
