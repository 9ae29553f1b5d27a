use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ProtocolError;

/// Engine-assigned identifier of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowHandle(pub u32);

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Size in device-independent units, as requested by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalSize {
    pub width: u32,
    pub height: u32,
}

impl LogicalSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Size of a pixel buffer in physical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

impl PhysicalSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Physical dimensions for `logical` at `scale_factor`.
    ///
    /// Each axis is multiplied then truncated toward zero, so the same
    /// inputs always produce the same buffer size.
    pub fn from_logical(logical: LogicalSize, scale_factor: f64) -> Self {
        Self {
            width: scale_axis(logical.width, scale_factor),
            height: scale_axis(logical.height, scale_factor),
        }
    }

    /// Largest pixel count a surface or bitmap may have (8192 x 8192).
    pub const MAX_AREA: u64 = 8192 * 8192;

    /// Number of pixels in the buffer. Cannot overflow.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Reject sizes over [`Self::MAX_AREA`].
    pub fn check_limit(&self) -> Result<(), ProtocolError> {
        if self.area() > Self::MAX_AREA {
            return Err(ProtocolError::SurfaceTooLarge {
                width: self.width,
                height: self.height,
                max: Self::MAX_AREA,
            });
        }
        Ok(())
    }
}

fn scale_axis(units: u32, scale_factor: f64) -> u32 {
    // `as` saturates on overflow and maps NaN to 0.
    (units as f64 * scale_factor).trunc() as u32
}

/// Severity of an engine log message.
///
/// The engine sends these as ordinals 1 through 5. `Log` and `Info` are
/// distinct levels with no further meaning attached to either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Log,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Log,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    /// Parse the wire ordinal.
    pub fn from_ordinal(level: i64) -> Result<Self, ProtocolError> {
        match level {
            1 => Ok(LogLevel::Debug),
            2 => Ok(LogLevel::Log),
            3 => Ok(LogLevel::Info),
            4 => Ok(LogLevel::Warn),
            5 => Ok(LogLevel::Error),
            other => Err(ProtocolError::LogLevel(other)),
        }
    }

    /// The wire ordinal for this level.
    pub fn ordinal(self) -> i64 {
        match self {
            LogLevel::Debug => 1,
            LogLevel::Log => 2,
            LogLevel::Info => 3,
            LogLevel::Warn => 4,
            LogLevel::Error => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Log => "log",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
