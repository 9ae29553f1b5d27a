//! Message proxy between the host bridge and the emulation engine.
//!
//! The engine runs in its own task and the two sides only exchange JSON
//! text frames over a channel:
//! - **Engine -> host**: each frame names a method and its arguments; the
//!   host decodes it into an [`EngineCall`] and hands it to its single
//!   [`Dispatch`] target.
//! - **Host -> engine**: the host invokes methods on a [`Proxy`], which
//!   serializes them into frames. No reply is awaited.

pub mod call;
pub mod channel;
pub mod message;
pub mod proxy;

pub use call::{EngineCall, HostCall};
pub use channel::{channel, EnginePort, Worker};
pub use message::WireMessage;
pub use proxy::{dispatch_frame, Dispatch, Inbox, Proxy};
