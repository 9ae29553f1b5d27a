//! Host that forwards engine output to the terminal.

use std::io::Write;

use tracing::{debug, info, warn};

use emubridge_host::{EmulatorHost, WindowObserver};

#[derive(Debug, Default)]
pub struct ConsoleHost {
    echo_stdout: bool,
    window_changes: usize,
    errors: Vec<String>,
    exit_code: Option<i32>,
}

impl ConsoleHost {
    pub fn new(echo_stdout: bool) -> Self {
        Self {
            echo_stdout,
            ..Self::default()
        }
    }

    pub fn window_changes(&self) -> usize {
        self.window_changes
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }
}

impl WindowObserver for ConsoleHost {
    fn on_window_changed(&mut self) {
        self.window_changes += 1;
        debug!(changes = self.window_changes, "window set changed");
    }
}

impl EmulatorHost for ConsoleHost {
    fn exit(&mut self, code: i32) {
        info!(code, "engine requested exit");
        self.exit_code = Some(code);
    }

    fn on_error(&mut self, message: &str) {
        warn!(message, "engine reported an error");
        self.errors.push(message.to_string());
    }

    fn on_stdout(&mut self, text: &str) {
        if !self.echo_stdout {
            return;
        }
        let mut out = std::io::stdout().lock();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            warn!(error = %e, "failed to echo engine output");
        }
    }
}
