//! Wire framing shared by both directions.
//!
//! A frame is a JSON object `{"method": "...", "args": [...]}`. Byte
//! payloads travel as base64 strings and bitmaps as
//! `{"width": w, "height": h, "data": "<base64 RGBA>"}`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use emubridge_common::{Bitmap, ProtocolError};

/// One method invocation on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMessage {
    /// Name of the method to invoke on the peer.
    pub method: String,
    /// Positional arguments.
    #[serde(default)]
    pub args: Vec<Value>,
}

impl WireMessage {
    pub fn new(method: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            args,
        }
    }

    /// Parse a frame received from the peer.
    pub fn from_json(raw: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(raw).map_err(|e| ProtocolError::Malformed(e.to_string()))
    }

    /// Serialize for sending.
    pub fn to_json(&self) -> String {
        // A struct of a String and JSON values always serializes.
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Encode a byte payload.
pub fn encode_bytes(bytes: &[u8]) -> Value {
    Value::String(STANDARD.encode(bytes))
}

/// Encode a bitmap payload.
pub fn encode_bitmap(bitmap: &Bitmap) -> Value {
    json!({
        "width": bitmap.width(),
        "height": bitmap.height(),
        "data": STANDARD.encode(bitmap.pixels()),
    })
}

/// Positional argument reader for one decoded message.
pub(crate) struct Args<'a> {
    method: &'static str,
    values: &'a [Value],
}

impl<'a> Args<'a> {
    /// Check arity up front so every accessor can index directly.
    pub(crate) fn exact(
        method: &'static str,
        values: &'a [Value],
        expected: usize,
    ) -> Result<Self, ProtocolError> {
        if values.len() != expected {
            return Err(ProtocolError::Arity {
                method,
                expected,
                got: values.len(),
            });
        }
        Ok(Self { method, values })
    }

    fn bad(&self, index: usize, reason: impl Into<String>) -> ProtocolError {
        ProtocolError::BadArgument {
            method: self.method,
            index,
            reason: reason.into(),
        }
    }

    pub(crate) fn i64(&self, index: usize) -> Result<i64, ProtocolError> {
        self.values[index]
            .as_i64()
            .ok_or_else(|| self.bad(index, "expected an integer"))
    }

    pub(crate) fn i32(&self, index: usize) -> Result<i32, ProtocolError> {
        let value = self.i64(index)?;
        i32::try_from(value).map_err(|_| self.bad(index, format!("{value} does not fit in i32")))
    }

    pub(crate) fn u32(&self, index: usize) -> Result<u32, ProtocolError> {
        let value = self.i64(index)?;
        u32::try_from(value).map_err(|_| self.bad(index, format!("{value} does not fit in u32")))
    }

    pub(crate) fn string(&self, index: usize) -> Result<String, ProtocolError> {
        self.values[index]
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| self.bad(index, "expected a string"))
    }

    pub(crate) fn bytes(&self, index: usize) -> Result<Vec<u8>, ProtocolError> {
        let encoded = self.values[index]
            .as_str()
            .ok_or_else(|| self.bad(index, "expected a base64 string"))?;
        STANDARD
            .decode(encoded)
            .map_err(|e| self.bad(index, format!("invalid base64: {e}")))
    }

    pub(crate) fn bitmap(&self, index: usize) -> Result<Bitmap, ProtocolError> {
        let obj = self.values[index]
            .as_object()
            .ok_or_else(|| self.bad(index, "expected a bitmap object"))?;

        let dim = |key: &str| -> Result<u32, ProtocolError> {
            obj.get(key)
                .and_then(Value::as_u64)
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| self.bad(index, format!("bitmap.{key} missing or invalid")))
        };
        let width = dim("width")?;
        let height = dim("height")?;

        let data = obj
            .get("data")
            .and_then(Value::as_str)
            .ok_or_else(|| self.bad(index, "bitmap.data missing"))?;
        let pixels = STANDARD
            .decode(data)
            .map_err(|e| self.bad(index, format!("invalid base64: {e}")))?;

        Bitmap::new(width, height, pixels)
    }
}
