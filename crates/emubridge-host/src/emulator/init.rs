use tracing::debug;

use emubridge_common::BridgeError;
use emubridge_proxy::{channel, EnginePort, Worker};

/// Start an engine and wait until it is ready.
///
/// `launch` receives the engine's end of a fresh channel and must hand it
/// to whatever runs the engine. The engine's first frame only signals
/// readiness; it is discarded and never dispatched.
pub async fn init_worker<F>(launch: F) -> Result<Worker, BridgeError>
where
    F: FnOnce(EnginePort),
{
    let (mut worker, port) = channel();
    launch(port);

    match worker.recv().await {
        Some(ready) => {
            debug!(len = ready.len(), "engine ready");
            Ok(worker)
        }
        None => Err(BridgeError::ChannelClosed),
    }
}
