//! Outbound calls and inbound dispatch.

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use emubridge_common::BridgeError;

use crate::call::{EngineCall, HostCall};
use crate::message::WireMessage;

/// Receiver of every decoded engine call.
///
/// Exactly one dispatch target exists per link; it handles calls one at a
/// time in arrival order. An `Err` is a contract violation and is never
/// swallowed by the proxy.
pub trait Dispatch {
    fn dispatch(&mut self, call: EngineCall) -> Result<(), BridgeError>;
}

/// Parse, decode and dispatch one raw frame.
pub fn dispatch_frame<D: Dispatch + ?Sized>(target: &mut D, frame: &str) -> Result<(), BridgeError> {
    trace!(len = frame.len(), "engine frame");
    let msg = WireMessage::from_json(frame)?;
    let call = EngineCall::decode(&msg)?;
    debug!(method = call.method(), "dispatching engine call");
    target.dispatch(call)
}

/// Sends host calls to the engine. Fire-and-forget: nothing is awaited.
#[derive(Clone)]
pub struct Proxy {
    tx: mpsc::UnboundedSender<String>,
}

impl Proxy {
    pub(crate) fn new(tx: mpsc::UnboundedSender<String>) -> Self {
        Self { tx }
    }

    /// Serialize `method(args...)` and send it.
    pub fn call(&self, method: &str, args: Vec<Value>) -> Result<(), BridgeError> {
        let frame = WireMessage::new(method, args).to_json();
        debug!(method, "host -> engine call");
        self.tx.send(frame).map_err(|_| BridgeError::ChannelClosed)
    }

    /// Send a typed host call.
    pub fn send(&self, call: HostCall) -> Result<(), BridgeError> {
        let wire = call.to_wire();
        self.call(&wire.method, wire.args)
    }

    /// Tell the engine to begin execution.
    pub fn start(&self) -> Result<(), BridgeError> {
        self.send(HostCall::Start)
    }
}

/// Inbound frames from the engine, in delivery order.
pub struct Inbox {
    rx: mpsc::UnboundedReceiver<String>,
}

impl Inbox {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<String>) -> Self {
        Self { rx }
    }

    /// Wait for the next frame; `None` once the engine is gone and drained.
    pub async fn recv(&mut self) -> Option<String> {
        self.rx.recv().await
    }

    /// Take the next frame if one is already queued.
    pub fn try_recv(&mut self) -> Option<String> {
        self.rx.try_recv().ok()
    }
}
