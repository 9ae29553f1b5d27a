//! The two ends of the host/engine link.
//!
//! Frames are JSON text carried over unbounded tokio channels, one per
//! direction. Nothing is shared between the two contexts besides the
//! channels themselves.

use tokio::sync::mpsc;
use tracing::trace;

use emubridge_common::{BridgeError, ProtocolError};

use crate::call::{EngineCall, HostCall};
use crate::message::WireMessage;
use crate::proxy::{Inbox, Proxy};

/// Create a connected host/engine pair.
pub fn channel() -> (Worker, EnginePort) {
    let (to_engine, from_host) = mpsc::unbounded_channel();
    let (to_host, from_engine) = mpsc::unbounded_channel();
    (
        Worker {
            tx: to_engine,
            rx: from_engine,
        },
        EnginePort {
            tx: to_host,
            rx: from_host,
        },
    )
}

/// Host side of the link to a running engine.
pub struct Worker {
    tx: mpsc::UnboundedSender<String>,
    rx: mpsc::UnboundedReceiver<String>,
}

impl Worker {
    /// Wait for the next raw frame from the engine. `None` once the engine
    /// side is gone and every queued frame has been received.
    pub async fn recv(&mut self) -> Option<String> {
        self.rx.recv().await
    }

    /// Split into the outbound proxy and the inbound frame queue.
    pub fn split(self) -> (Proxy, Inbox) {
        (Proxy::new(self.tx), Inbox::new(self.rx))
    }
}

/// Engine side of the link.
pub struct EnginePort {
    tx: mpsc::UnboundedSender<String>,
    rx: mpsc::UnboundedReceiver<String>,
}

impl EnginePort {
    /// Send a call to the host.
    pub fn send(&self, call: &EngineCall) -> Result<(), BridgeError> {
        self.post(call.to_wire().to_json())
    }

    /// Send a raw frame, bypassing encoding. Used for the ready signal and
    /// by tests that need to put arbitrary text on the wire.
    pub fn post(&self, frame: String) -> Result<(), BridgeError> {
        trace!(len = frame.len(), "engine -> host frame");
        self.tx.send(frame).map_err(|_| BridgeError::ChannelClosed)
    }

    /// Wait for the next call from the host. `None` once the host is gone.
    pub async fn recv(&mut self) -> Option<Result<HostCall, ProtocolError>> {
        let frame = self.rx.recv().await?;
        Some(WireMessage::from_json(&frame).and_then(|msg| HostCall::decode(&msg)))
    }
}
