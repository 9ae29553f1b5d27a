//! Log, stdout and exit signals from the engine.

use tracing::info;

use emubridge_common::LogLevel;

use super::Emulator;
use crate::diagnostics::Diagnostics;
use crate::host::EmulatorHost;

impl<H: EmulatorHost, D: Diagnostics> Emulator<H, D> {
    /// Record an engine log message. Errors are also reported to the host.
    pub fn log(&mut self, level: LogLevel, message: &str) {
        self.diagnostics.record(level, message);
        if level == LogLevel::Error {
            self.host.on_error(message);
        }
    }

    /// Decode a chunk of engine stdout and pass it on.
    ///
    /// Characters split across writes are completed by the next write, so
    /// the host may see a shorter string (or nothing) for a given chunk.
    pub fn write(&mut self, bytes: &[u8]) {
        let text = self.decoder.decode(bytes);
        if !text.is_empty() {
            self.host.on_stdout(&text);
        }
    }

    pub fn exit(&mut self, code: i32) {
        info!(code, "engine exited");
        self.exit_code = Some(code);
        let tail = self.decoder.finish();
        if !tail.is_empty() {
            self.host.on_stdout(&tail);
        }
        self.host.exit(code);
    }
}
