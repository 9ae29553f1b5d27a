//! Typed views of the methods each side may invoke on the other.

use serde_json::{json, Value};

use emubridge_common::{Bitmap, LogLevel, ProtocolError, WindowHandle};

use crate::message::{encode_bitmap, encode_bytes, Args, WireMessage};

/// A method the engine invokes on the host.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    WindowCreate {
        handle: WindowHandle,
    },
    WindowSetTitle {
        handle: WindowHandle,
        title: String,
    },
    WindowSetSize {
        handle: WindowHandle,
        width: u32,
        height: u32,
    },
    WindowShow {
        handle: WindowHandle,
        bitmap: Bitmap,
    },
    WindowDestroy {
        handle: WindowHandle,
    },
    Log {
        level: LogLevel,
        message: String,
    },
    Write {
        bytes: Vec<u8>,
    },
    Exit {
        code: i32,
    },
}

impl EngineCall {
    /// Every method name the host accepts from the engine.
    pub const METHODS: &'static [&'static str] = &[
        "window_create",
        "window_set_title",
        "window_set_size",
        "window_show",
        "window_destroy",
        "log",
        "write",
        "exit",
    ];

    /// Decode a wire message, checking name, arity, and argument types.
    pub fn decode(msg: &WireMessage) -> Result<Self, ProtocolError> {
        let args = &msg.args;
        match msg.method.as_str() {
            "window_create" => {
                let a = Args::exact("window_create", args, 1)?;
                Ok(EngineCall::WindowCreate {
                    handle: WindowHandle(a.u32(0)?),
                })
            }
            "window_set_title" => {
                let a = Args::exact("window_set_title", args, 2)?;
                Ok(EngineCall::WindowSetTitle {
                    handle: WindowHandle(a.u32(0)?),
                    title: a.string(1)?,
                })
            }
            "window_set_size" => {
                let a = Args::exact("window_set_size", args, 3)?;
                Ok(EngineCall::WindowSetSize {
                    handle: WindowHandle(a.u32(0)?),
                    width: a.u32(1)?,
                    height: a.u32(2)?,
                })
            }
            "window_show" => {
                let a = Args::exact("window_show", args, 2)?;
                Ok(EngineCall::WindowShow {
                    handle: WindowHandle(a.u32(0)?),
                    bitmap: a.bitmap(1)?,
                })
            }
            "window_destroy" => {
                let a = Args::exact("window_destroy", args, 1)?;
                Ok(EngineCall::WindowDestroy {
                    handle: WindowHandle(a.u32(0)?),
                })
            }
            "log" => {
                let a = Args::exact("log", args, 2)?;
                Ok(EngineCall::Log {
                    level: LogLevel::from_ordinal(a.i64(0)?)?,
                    message: a.string(1)?,
                })
            }
            "write" => {
                let a = Args::exact("write", args, 1)?;
                Ok(EngineCall::Write { bytes: a.bytes(0)? })
            }
            "exit" => {
                let a = Args::exact("exit", args, 1)?;
                Ok(EngineCall::Exit { code: a.i32(0)? })
            }
            other => Err(ProtocolError::UnknownMethod(other.to_string())),
        }
    }

    /// Method name on the wire.
    pub fn method(&self) -> &'static str {
        match self {
            EngineCall::WindowCreate { .. } => "window_create",
            EngineCall::WindowSetTitle { .. } => "window_set_title",
            EngineCall::WindowSetSize { .. } => "window_set_size",
            EngineCall::WindowShow { .. } => "window_show",
            EngineCall::WindowDestroy { .. } => "window_destroy",
            EngineCall::Log { .. } => "log",
            EngineCall::Write { .. } => "write",
            EngineCall::Exit { .. } => "exit",
        }
    }

    /// Encode for sending from the engine side.
    pub fn to_wire(&self) -> WireMessage {
        let args = match self {
            EngineCall::WindowCreate { handle } | EngineCall::WindowDestroy { handle } => {
                vec![json!(handle.0)]
            }
            EngineCall::WindowSetTitle { handle, title } => vec![json!(handle.0), json!(title)],
            EngineCall::WindowSetSize {
                handle,
                width,
                height,
            } => vec![json!(handle.0), json!(width), json!(height)],
            EngineCall::WindowShow { handle, bitmap } => {
                vec![json!(handle.0), encode_bitmap(bitmap)]
            }
            EngineCall::Log { level, message } => vec![json!(level.ordinal()), json!(message)],
            EngineCall::Write { bytes } => vec![encode_bytes(bytes)],
            EngineCall::Exit { code } => vec![json!(code)],
        };
        WireMessage::new(self.method(), args)
    }
}

/// A method the host invokes on the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCall {
    /// Begin execution.
    Start,
}

impl HostCall {
    pub fn decode(msg: &WireMessage) -> Result<Self, ProtocolError> {
        match msg.method.as_str() {
            "start" => {
                Args::exact("start", &msg.args, 0)?;
                Ok(HostCall::Start)
            }
            other => Err(ProtocolError::UnknownMethod(other.to_string())),
        }
    }

    pub fn method(&self) -> &'static str {
        match self {
            HostCall::Start => "start",
        }
    }

    pub fn to_wire(&self) -> WireMessage {
        let args: Vec<Value> = match self {
            HostCall::Start => Vec::new(),
        };
        WireMessage::new(self.method(), args)
    }
}
