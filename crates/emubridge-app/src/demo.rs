//! A scripted stand-in engine.
//!
//! Speaks the same protocol a real engine would: reports ready, waits for
//! `start`, opens a window, paints a few frames, writes to stdout and exits.

use tracing::{debug, warn};

use emubridge_common::{Bitmap, BridgeError, LogLevel, ProtocolError, WindowHandle};
use emubridge_config::{DemoProgram, EngineConfig};
use emubridge_proxy::{EngineCall, EnginePort, HostCall, WireMessage};

const WINDOW: WindowHandle = WindowHandle(1);

/// Run the demo engine on its own task.
pub fn spawn(port: EnginePort, config: EngineConfig) {
    tokio::spawn(async move {
        if let Err(e) = run(port, config).await {
            warn!(error = %e, "demo engine stopped");
        }
    });
}

/// Drive the script to completion. Returns early, without error, if the
/// host closes its side while the engine is waiting for `start`.
pub async fn run(mut port: EnginePort, config: EngineConfig) -> Result<(), BridgeError> {
    port.post(WireMessage::new("ready", Vec::new()).to_json())?;

    match port.recv().await {
        Some(Ok(HostCall::Start)) => debug!("demo engine started"),
        Some(Err(e)) => return Err(e.into()),
        None => return Ok(()),
    }

    let title = match config.program {
        DemoProgram::Hello => "Hello",
        DemoProgram::Gradient => "Gradient",
    };
    port.send(&EngineCall::WindowCreate { handle: WINDOW })?;
    port.send(&EngineCall::WindowSetTitle {
        handle: WINDOW,
        title: title.to_string(),
    })?;
    port.send(&EngineCall::WindowSetSize {
        handle: WINDOW,
        width: config.width,
        height: config.height,
    })?;

    for frame in 0..config.frames {
        let bitmap = render(config.program, config.width, config.height, frame)?;
        port.send(&EngineCall::WindowShow {
            handle: WINDOW,
            bitmap,
        })?;
        write_split(&port, &format!("{title}: frame {} \u{2713}\n", frame + 1))?;
        port.send(&EngineCall::Log {
            level: LogLevel::Debug,
            message: format!("presented frame {}", frame + 1),
        })?;
        tokio::task::yield_now().await;
    }

    port.send(&EngineCall::Log {
        level: LogLevel::Info,
        message: format!("{} frames rendered", config.frames),
    })?;
    port.send(&EngineCall::Exit { code: 0 })?;
    Ok(())
}

/// Send `text` as two writes, cut inside its last multi-byte character
/// when there is one.
fn write_split(port: &EnginePort, text: &str) -> Result<(), BridgeError> {
    let bytes = text.as_bytes();
    let cut = text
        .char_indices()
        .rev()
        .find(|(_, c)| c.len_utf8() > 1)
        .map(|(i, _)| i + 1)
        .unwrap_or(bytes.len());

    port.send(&EngineCall::Write {
        bytes: bytes[..cut].to_vec(),
    })?;
    if cut < bytes.len() {
        port.send(&EngineCall::Write {
            bytes: bytes[cut..].to_vec(),
        })?;
    }
    Ok(())
}

/// Paint one frame in logical pixels.
pub fn render(
    program: DemoProgram,
    width: u32,
    height: u32,
    frame: u32,
) -> Result<Bitmap, ProtocolError> {
    let mut pixels = Vec::with_capacity(width as usize * height as usize * Bitmap::BYTES_PER_PIXEL);
    for y in 0..height {
        for x in 0..width {
            let rgba = match program {
                DemoProgram::Hello => checker(x, y, frame),
                DemoProgram::Gradient => gradient(x, y, width, height, frame),
            };
            pixels.extend_from_slice(&rgba);
        }
    }
    Bitmap::new(width, height, pixels)
}

fn checker(x: u32, y: u32, frame: u32) -> [u8; 4] {
    const CELL: u32 = 8;
    if ((x + frame) / CELL + y / CELL) % 2 == 0 {
        [0x20, 0x24, 0x30, 0xff]
    } else {
        [0xe0, 0xc8, 0x40, 0xff]
    }
}

fn gradient(x: u32, y: u32, width: u32, height: u32, frame: u32) -> [u8; 4] {
    let r = (x * 255 / width.max(1)) as u8;
    let g = (y * 255 / height.max(1)) as u8;
    let b = (frame.wrapping_mul(40) % 256) as u8;
    [r, g, b, 0xff]
}
