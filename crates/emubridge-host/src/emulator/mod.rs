//! The bridge entry point: one object the engine's calls are routed to.

mod init;
mod signals;

#[cfg(test)]
mod tests;

pub use init::init_worker;

use tracing::{info, warn};

use emubridge_common::{Bitmap, BridgeError, ProtocolError, WindowHandle};
use emubridge_proxy::{dispatch_frame, Dispatch, EngineCall, Inbox, Proxy, Worker};
use emubridge_surface::{DisplayEnvironment, SurfaceManager, WindowInfo};

use crate::decoder::Utf8StreamDecoder;
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::host::EmulatorHost;

/// Host-side bridge to a running engine.
///
/// Owns the window set, the stdout decoder and the outbound proxy.
/// Every inbound call is handled to completion, callbacks included,
/// before the next frame is looked at.
pub struct Emulator<H, D = TracingDiagnostics> {
    proxy: Proxy,
    inbox: Inbox,
    windows: SurfaceManager,
    decoder: Utf8StreamDecoder,
    host: H,
    diagnostics: D,
    exit_code: Option<i32>,
}

impl<H: EmulatorHost> Emulator<H> {
    /// Bridge to `worker`, logging engine messages through tracing.
    pub fn new(worker: Worker, host: H, display: Box<dyn DisplayEnvironment>) -> Self {
        Self::with_diagnostics(worker, host, display, TracingDiagnostics)
    }
}

impl<H: EmulatorHost, D: Diagnostics> Emulator<H, D> {
    pub fn with_diagnostics(
        worker: Worker,
        host: H,
        display: Box<dyn DisplayEnvironment>,
        diagnostics: D,
    ) -> Self {
        let (proxy, inbox) = worker.split();
        Self {
            proxy,
            inbox,
            windows: SurfaceManager::new(display),
            decoder: Utf8StreamDecoder::new(),
            host,
            diagnostics,
            exit_code: None,
        }
    }

    /// Tell the engine to begin executing.
    pub fn start(&self) -> Result<(), BridgeError> {
        info!("starting engine");
        self.proxy.start()
    }

    /// Outbound proxy, for hosts that need to message the engine after
    /// a callback has returned.
    pub fn proxy(&self) -> &Proxy {
        &self.proxy
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    pub fn windows(&self) -> &SurfaceManager {
        &self.windows
    }

    pub fn window_infos(&self) -> Vec<WindowInfo> {
        self.windows.snapshot()
    }

    /// Code from the engine's last `exit`, if it has exited.
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// Decode and apply one raw frame.
    pub fn handle_frame(&mut self, frame: &str) -> Result<(), BridgeError> {
        dispatch_frame(self, frame)
    }

    /// Apply every frame already queued, without waiting. Returns how
    /// many were handled.
    pub fn pump(&mut self) -> Result<usize, BridgeError> {
        let mut handled = 0;
        while let Some(frame) = self.inbox.try_recv() {
            self.handle_frame(&frame)?;
            handled += 1;
        }
        Ok(handled)
    }

    /// Process frames until the engine side closes.
    ///
    /// Stops at the first protocol error; frames queued behind it are
    /// left unread.
    pub async fn run(&mut self) -> Result<(), BridgeError> {
        while let Some(frame) = self.inbox.recv().await {
            if let Err(e) = self.handle_frame(&frame) {
                warn!(error = %e, "engine sent an invalid call");
                return Err(e);
            }
        }
        info!(exit_code = ?self.exit_code, "engine channel closed");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Window operations
    // -------------------------------------------------------------------------

    pub fn window_create(&mut self, handle: WindowHandle) -> Result<(), ProtocolError> {
        self.windows.window_create(handle, &mut self.host)
    }

    pub fn window_set_title(
        &mut self,
        handle: WindowHandle,
        title: String,
    ) -> Result<(), ProtocolError> {
        self.windows.window_set_title(handle, title, &mut self.host)
    }

    pub fn window_set_size(
        &mut self,
        handle: WindowHandle,
        width: u32,
        height: u32,
    ) -> Result<(), ProtocolError> {
        self.windows
            .window_set_size(handle, width, height, &mut self.host)
    }

    pub fn window_show(&mut self, handle: WindowHandle, bitmap: &Bitmap) -> Result<(), ProtocolError> {
        self.windows.window_show(handle, bitmap)
    }

    pub fn window_destroy(&mut self, handle: WindowHandle) -> Result<(), ProtocolError> {
        self.windows.window_destroy(handle, &mut self.host)
    }
}

impl<H: EmulatorHost, D: Diagnostics> Dispatch for Emulator<H, D> {
    fn dispatch(&mut self, call: EngineCall) -> Result<(), BridgeError> {
        match call {
            EngineCall::WindowCreate { handle } => self.window_create(handle)?,
            EngineCall::WindowSetTitle { handle, title } => self.window_set_title(handle, title)?,
            EngineCall::WindowSetSize {
                handle,
                width,
                height,
            } => self.window_set_size(handle, width, height)?,
            EngineCall::WindowShow { handle, bitmap } => self.window_show(handle, &bitmap)?,
            EngineCall::WindowDestroy { handle } => self.window_destroy(handle)?,
            EngineCall::Log { level, message } => self.log(level, &message),
            EngineCall::Write { bytes } => self.write(&bytes),
            EngineCall::Exit { code } => self.exit(code),
        }
        Ok(())
    }
}
