//! Where engine log messages end up.

use tracing::{debug, error, info, warn};

use emubridge_common::LogLevel;

/// Sink for engine-originated log messages.
pub trait Diagnostics {
    fn record(&mut self, level: LogLevel, message: &str);
}

/// Emits engine logs as tracing events under the `engine` target, so they
/// can be filtered separately from the bridge's own output.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn record(&mut self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => debug!(target: "engine", "{message}"),
            LogLevel::Log | LogLevel::Info => info!(target: "engine", kind = %level, "{message}"),
            LogLevel::Warn => warn!(target: "engine", "{message}"),
            LogLevel::Error => error!(target: "engine", "{message}"),
        }
    }
}

/// Keeps every record in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryDiagnostics {
    pub records: Vec<(LogLevel, String)>,
}

impl Diagnostics for MemoryDiagnostics {
    fn record(&mut self, level: LogLevel, message: &str) {
        self.records.push((level, message.to_string()));
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for Box<D> {
    fn record(&mut self, level: LogLevel, message: &str) {
        (**self).record(level, message);
    }
}
